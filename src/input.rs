/*
 * Input Module
 *
 * This module turns keyboard input into simulation commands.
 * Character keys adjust the simulation (counts, zone ranges, turning
 * angles, walls, species, pause, reset); arrow keys change the viewpoint
 * and the size of the box.
 *
 * The key map is a pure function so it can be tested without a window.
 * Every step is one unit (or one degree) and is clamped to the same bounds
 * the UI sliders use.
 */

use nannou::prelude::*;
use tracing::debug;

use crate::app::Model;
use crate::boundary::WallMode;
use crate::camera::Camera;
use crate::params::{SimulationParams, SpeciesId, Zone};
use crate::simulation::Simulation;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Decrease,
    Increase,
}

impl Step {
    fn apply_f32(self, value: f32, range: std::ops::RangeInclusive<f32>) -> f32 {
        let stepped = match self {
            Step::Decrease => value - 1.0,
            Step::Increase => value + 1.0,
        };
        stepped.clamp(*range.start(), *range.end())
    }

    fn apply_usize(self, value: usize, range: std::ops::RangeInclusive<usize>) -> usize {
        let stepped = match self {
            Step::Decrease => value.saturating_sub(1),
            Step::Increase => value.saturating_add(1),
        };
        stepped.clamp(*range.start(), *range.end())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Reset,
    ToggleWalls,
    ToggleSpecies,
    TogglePause,
    Count(SpeciesId, Step),
    Range {
        species: SpeciesId,
        target: SpeciesId,
        zone: Zone,
        step: Step,
    },
    TurningAngle(SpeciesId, Step),
    BoxSize(Step),
}

// Map a typed character to a command
pub fn command_for_char(c: char) -> Option<Command> {
    use SpeciesId::{One, Two};
    use Step::{Decrease, Increase};
    use Zone::{Attraction, Orientation, Repulsion};

    let range = |species, target, zone, step| Command::Range {
        species,
        target,
        zone,
        step,
    };

    let command = match c {
        'q' => Command::Reset,
        'a' => Command::ToggleWalls,
        'z' => Command::ToggleSpecies,
        'p' => Command::TogglePause,
        '[' => Command::Count(One, Decrease),
        ']' => Command::Count(One, Increase),
        '{' => Command::Count(Two, Decrease),
        '}' => Command::Count(Two, Increase),
        // Species one toward species one
        'e' => range(One, One, Repulsion, Decrease),
        'r' => range(One, One, Repulsion, Increase),
        'd' => range(One, One, Orientation, Decrease),
        'f' => range(One, One, Orientation, Increase),
        'c' => range(One, One, Attraction, Decrease),
        'v' => range(One, One, Attraction, Increase),
        // Species one toward species two
        'E' => range(One, Two, Repulsion, Decrease),
        'R' => range(One, Two, Repulsion, Increase),
        'D' => range(One, Two, Orientation, Decrease),
        'F' => range(One, Two, Orientation, Increase),
        'C' => range(One, Two, Attraction, Decrease),
        'V' => range(One, Two, Attraction, Increase),
        // Species two toward species one
        'y' => range(Two, One, Repulsion, Decrease),
        'u' => range(Two, One, Repulsion, Increase),
        'h' => range(Two, One, Orientation, Decrease),
        'j' => range(Two, One, Orientation, Increase),
        'n' => range(Two, One, Attraction, Decrease),
        'm' => range(Two, One, Attraction, Increase),
        // Species two toward species two
        'Y' => range(Two, Two, Repulsion, Decrease),
        'U' => range(Two, Two, Repulsion, Increase),
        'H' => range(Two, Two, Orientation, Decrease),
        'J' => range(Two, Two, Orientation, Increase),
        'N' => range(Two, Two, Attraction, Decrease),
        'M' => range(Two, Two, Attraction, Increase),
        ',' => Command::TurningAngle(One, Decrease),
        '.' => Command::TurningAngle(One, Increase),
        '<' => Command::TurningAngle(Two, Decrease),
        '>' => Command::TurningAngle(Two, Increase),
        _ => return None,
    };
    Some(command)
}

// Apply a command to the simulation; takes effect at the next tick
pub fn apply_command(simulation: &mut Simulation, command: Command) {
    let params = simulation.params().clone();
    match command {
        // Restart from the initial state: fresh fish, hard walls, running
        Command::Reset => {
            simulation.set_wall_mode(WallMode::Hard);
            simulation.set_paused(false);
            simulation.reset();
        }
        Command::ToggleWalls => simulation.set_wall_mode(params.wall_mode.toggled()),
        Command::ToggleSpecies => simulation.set_two_species(!params.two_species),
        Command::TogglePause => simulation.set_paused(!params.pause_simulation),
        Command::Count(species, step) => {
            // The second species' count only changes while it is shown
            if species == SpeciesId::Two && !params.two_species {
                return;
            }
            let count = step.apply_usize(
                params.species(species).count,
                SimulationParams::get_count_range(),
            );
            simulation.set_count(species, count);
        }
        Command::Range {
            species,
            target,
            zone,
            step,
        } => {
            let mut species_params = *params.species(species);
            let value = species_params.range_mut(target, zone);
            *value = step.apply_f32(*value, params.get_zone_range());
            simulation.set_ranges(species, target, species_params.ranges_toward(target));
        }
        Command::TurningAngle(species, step) => {
            let degrees = step.apply_f32(
                params.species(species).turning_angle,
                SimulationParams::get_turning_angle_range(),
            );
            simulation.set_turning_angle(species, degrees);
        }
        Command::BoxSize(step) => {
            let half_extent = step.apply_f32(params.box_edge_size, SimulationParams::get_box_edge_range());
            simulation.set_half_extent(half_extent);
        }
    }
}

// Character typed in the window
pub fn received_character(_app: &App, model: &mut Model, c: char) {
    // Leave typing to the UI while one of its widgets has focus
    if model.egui.ctx().wants_keyboard_input() {
        return;
    }
    if let Some(command) = command_for_char(c) {
        debug!(?command, key = %c, "Keyboard command");
        run_command(model, command);
    }
}

// Apply a command and bring the panel copy and the camera in line with it
pub fn run_command(model: &mut Model, command: Command) {
    apply_command(&mut model.simulation, command);
    if command == Command::Reset {
        model.camera = Camera::new(model.simulation.params().box_edge_size);
    }
    model.ui_params = model.simulation.params().clone();
}

// Arrow keys: Left/Right change the viewpoint, Up/Down resize the box
pub fn key_pressed(_app: &App, model: &mut Model, key: Key) {
    if model.egui.ctx().wants_keyboard_input() {
        return;
    }
    match key {
        Key::Left => model.camera.cycle_left(),
        Key::Right => model.camera.cycle_right(),
        Key::Up => apply_command(&mut model.simulation, Command::BoxSize(Step::Increase)),
        Key::Down => apply_command(&mut model.simulation, Command::BoxSize(Step::Decrease)),
        _ => return,
    }
    model.ui_params = model.simulation.params().clone();
}

// Pass raw window events to egui
pub fn raw_window_event(_app: &App, model: &mut Model, event: &nannou::winit::event::WindowEvent) {
    model.egui.handle_raw_event(event);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{MAX_BOX_EDGE, MIN_BOX_EDGE};

    fn simulation() -> Simulation {
        let params = SimulationParams {
            rng_seed: Some(1),
            ..SimulationParams::default()
        };
        Simulation::new(params).unwrap()
    }

    #[test]
    fn key_map_covers_every_zone_pair() {
        let keys = "erdfcvERDFCVyuhjnmYUHJNM";
        let commands: Vec<Command> = keys.chars().filter_map(command_for_char).collect();
        assert_eq!(commands.len(), keys.len());
        assert_eq!(
            command_for_char('H'),
            Some(Command::Range {
                species: SpeciesId::Two,
                target: SpeciesId::Two,
                zone: Zone::Orientation,
                step: Step::Decrease,
            })
        );
        assert_eq!(command_for_char('x'), None);
    }

    #[test]
    fn toggles_flip_state() {
        let mut sim = simulation();
        apply_command(&mut sim, command_for_char('a').unwrap());
        assert_eq!(sim.params().wall_mode, WallMode::Periodic);
        apply_command(&mut sim, command_for_char('z').unwrap());
        assert!(sim.params().two_species);
        apply_command(&mut sim, command_for_char('p').unwrap());
        assert!(sim.is_paused());
    }

    #[test]
    fn restart_restores_hard_walls_and_unpauses() {
        let mut sim = simulation();
        let before = sim.school(SpeciesId::One).fish().to_vec();
        for c in ['a', 'p', 'q'] {
            apply_command(&mut sim, command_for_char(c).unwrap());
        }
        assert_eq!(sim.params().wall_mode, WallMode::Hard);
        assert!(!sim.is_paused());
        assert_ne!(sim.school(SpeciesId::One).fish(), &before[..]);
    }

    #[test]
    fn ranges_step_and_clamp_at_zero_and_box_width() {
        let mut sim = simulation();
        // ZOR(1-1) starts at 2
        for _ in 0..5 {
            apply_command(&mut sim, command_for_char('e').unwrap());
        }
        assert_eq!(sim.params().species[0].range(SpeciesId::One, Zone::Repulsion), 0.0);

        for _ in 0..150 {
            apply_command(&mut sim, command_for_char('v').unwrap());
        }
        assert_eq!(sim.params().species[0].range(SpeciesId::One, Zone::Attraction), 100.0);
    }

    #[test]
    fn second_species_count_is_locked_while_disabled() {
        let mut sim = simulation();
        apply_command(&mut sim, command_for_char('}').unwrap());
        assert_eq!(sim.params().species[1].count, 100);

        apply_command(&mut sim, command_for_char('z').unwrap());
        apply_command(&mut sim, command_for_char('}').unwrap());
        assert_eq!(sim.params().species[1].count, 101);
        assert_eq!(sim.school(SpeciesId::Two).active(), 101);
    }

    #[test]
    fn turning_angle_stays_between_one_and_ten_degrees() {
        let mut sim = simulation();
        for _ in 0..20 {
            apply_command(&mut sim, command_for_char('.').unwrap());
        }
        assert_eq!(sim.params().species[0].turning_angle, 10.0);
        for _ in 0..20 {
            apply_command(&mut sim, command_for_char(',').unwrap());
        }
        assert_eq!(sim.params().species[0].turning_angle, 1.0);
        assert!((sim.params().species[0].turning_radians() - 1.0f32.to_radians()).abs() < 1.0e-7);
    }

    #[test]
    fn box_size_is_bounded() {
        let mut sim = simulation();
        apply_command(&mut sim, Command::BoxSize(Step::Increase));
        assert_eq!(sim.params().box_edge_size, MAX_BOX_EDGE);
        for _ in 0..40 {
            apply_command(&mut sim, Command::BoxSize(Step::Decrease));
        }
        assert_eq!(sim.params().box_edge_size, MIN_BOX_EDGE);
    }
}
