/*
 * Application Module
 *
 * This module defines the main application model and logic for the fish
 * school viewer. It handles the initialization, update, and event wiring of
 * the nannou app.
 *
 * Each frame the control panel edits a working copy of the parameters. When
 * that copy differs from the live parameters it is validated and handed to
 * the simulation, then the simulation advances one tick.
 */

use std::sync::OnceLock;

use nannou::prelude::*;
use nannou_egui::Egui;
use tracing::{info, warn};

use crate::camera::Camera;
use crate::debug::{DebugInfo, SchoolStats};
use crate::input::{self, key_pressed, raw_window_event, received_character, Command};
use crate::params::SimulationParams;
use crate::renderer::view;
use crate::simulation::Simulation;
use crate::ui;

// Used when the primary monitor size is not available
const DEFAULT_WINDOW_SIZE: (u32, u32) = (1280, 960);

// Parameters handed over from the command line before the app starts
static STARTUP_PARAMS: OnceLock<SimulationParams> = OnceLock::new();

// Main model for the application
pub struct Model {
    pub simulation: Simulation,
    // Working copy edited by the control panel
    pub ui_params: SimulationParams,
    pub egui: Egui,
    pub camera: Camera,
    pub debug_info: DebugInfo,
}

// Open the window and run the simulation until it is closed
pub fn run(params: SimulationParams) -> Result<(), crate::simulation::SimulationError> {
    params.validate()?;
    if STARTUP_PARAMS.set(params).is_err() {
        warn!("Viewer already started, keeping the first parameters");
    }
    nannou::app(model).update(update).run();
    Ok(())
}

// Initialize the model
pub fn model(app: &App) -> Model {
    let (window_width, window_height) = app
        .primary_monitor()
        .map(|monitor| {
            let size = monitor.size();
            (
                (size.width as f32 * 0.8) as u32,
                (size.height as f32 * 0.8) as u32,
            )
        })
        .unwrap_or(DEFAULT_WINDOW_SIZE);

    let window_id = app
        .new_window()
        .title("Fish School Simulation")
        .size(window_width, window_height)
        .view(view)
        .received_character(received_character)
        .key_pressed(key_pressed)
        .raw_event(raw_window_event)
        .build()
        .expect("Failed to build window");

    let window = app.window(window_id).expect("Window closed during start-up");
    let egui = Egui::from_window(&window);

    let params = STARTUP_PARAMS.get().cloned().unwrap_or_default();
    let camera = Camera::new(params.box_edge_size);
    let simulation = Simulation::new(params.clone()).expect("Start-up parameters were validated");
    info!(window_width, window_height, "Opened viewer");

    Model {
        simulation,
        ui_params: params,
        egui,
        camera,
        debug_info: DebugInfo::default(),
    }
}

// Update the model
pub fn update(app: &App, model: &mut Model, update: Update) {
    model.debug_info.fps = app.fps();
    model.debug_info.frame_time = update.since_last;
    model.debug_info.tick = model.simulation.tick();

    let stats: Vec<SchoolStats> = model
        .simulation
        .params()
        .enabled_species()
        .iter()
        .map(|&species| SchoolStats::measure(model.simulation.school(species)))
        .collect();

    let should_reset = ui::update_ui(
        &mut model.egui,
        &mut model.ui_params,
        &model.debug_info,
        &stats,
    );

    if model.ui_params != *model.simulation.params() {
        if let Err(err) = model.simulation.apply_params(model.ui_params.clone()) {
            warn!(%err, "Rejected parameter change");
            model.ui_params = model.simulation.params().clone();
        }
    }

    if should_reset {
        input::run_command(model, Command::Reset);
    }

    model.simulation.step();
}
