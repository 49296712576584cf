/*
 * Fish School Simulation - Module Definitions
 *
 * This file defines the module structure for the fish school simulation.
 * The simulation core (vector, fish, school, zones, steering, boundary,
 * params, simulation) does not depend on a window; the remaining modules
 * wire it into a nannou app.
 */

// Re-export key components for easier access
pub use app::Model;
pub use boundary::WallMode;
pub use camera::Camera;
pub use debug::{DebugInfo, SchoolStats};
pub use fish::Fish;
pub use params::{ParamsError, SimulationParams, SpeciesId, SpeciesParams, Zone, MAX_FISH};
pub use school::School;
pub use simulation::{Simulation, SimulationError};
pub use zones::ZoneRanges;

// Define modules
pub mod app;
pub mod boundary;
pub mod camera;
pub mod debug;
pub mod fish;
pub mod input;
pub mod params;
pub mod renderer;
pub mod school;
pub mod simulation;
pub mod steering;
pub mod ui;
pub mod vector;
pub mod zones;
