/*
 * UI Module
 *
 * This module contains the nannou_egui control panel and the text HUD.
 * The panel edits a working copy of the parameters; the app hands that copy
 * to the simulation when it differs from the live parameters, so changes
 * take effect at the next tick.
 */

use nannou::prelude::*;
use nannou_egui::{egui, Egui};

use crate::boundary::WallMode;
use crate::debug::{DebugInfo, SchoolStats};
use crate::params::{SimulationParams, SpeciesId, Zone};

const ZONES: [Zone; 3] = [Zone::Repulsion, Zone::Orientation, Zone::Attraction];

// Update the UI and return whether the school should be reset
pub fn update_ui(
    egui: &mut Egui,
    params: &mut SimulationParams,
    debug_info: &DebugInfo,
    stats: &[SchoolStats],
) -> bool {
    let mut should_reset = false;
    let zone_range = params.get_zone_range();

    let ctx = egui.begin_frame();

    egui::Window::new("Simulation Controls")
        .default_pos([10.0, 10.0])
        .show(&ctx, |ui| {
            ui.collapsing("Domain", |ui| {
                ui.add(
                    egui::Slider::new(&mut params.box_edge_size, SimulationParams::get_box_edge_range())
                        .text("Box half-size"),
                );
                ui.add(
                    egui::Slider::new(&mut params.blind_angle, SimulationParams::get_blind_angle_range())
                        .text("Blind angle"),
                );
                ui.horizontal(|ui| {
                    ui.radio_value(&mut params.wall_mode, WallMode::Hard, WallMode::Hard.label());
                    ui.radio_value(&mut params.wall_mode, WallMode::Periodic, WallMode::Periodic.label());
                });
                ui.checkbox(&mut params.two_species, "Second species");
                if ui.button("Reset School").clicked() {
                    should_reset = true;
                }
            });

            for species in SpeciesId::ALL {
                if species == SpeciesId::Two && !params.two_species {
                    continue;
                }
                ui.collapsing(format!("Species {}", species.number()), |ui| {
                    let species_params = params.species_mut(species);
                    ui.add(
                        egui::Slider::new(&mut species_params.count, SimulationParams::get_count_range())
                            .text("Fish"),
                    );
                    ui.add(
                        egui::Slider::new(
                            &mut species_params.turning_angle,
                            SimulationParams::get_turning_angle_range(),
                        )
                        .text("Turn angle"),
                    );
                    for target in SpeciesId::ALL {
                        for zone in ZONES {
                            let label = format!(
                                "{}({}-{})",
                                zone.abbreviation(),
                                species.number(),
                                target.number()
                            );
                            ui.add(
                                egui::Slider::new(species_params.range_mut(target, zone), zone_range.clone())
                                    .text(label),
                            );
                        }
                    }
                });
            }

            ui.collapsing("Performance", |ui| {
                ui.checkbox(&mut params.enable_parallel, "Parallel sensing");
                ui.separator();
                ui.label(format!("FPS: {:.1}", debug_info.fps));
                ui.label(format!("Frame time: {:.2} ms", debug_info.frame_time.as_secs_f64() * 1000.0));
                ui.label(format!("Tick: {}", debug_info.tick));
                for (i, s) in stats.iter().enumerate() {
                    ui.label(format!(
                        "Species {}: {} fish, polarization {:.2}",
                        i + 1,
                        s.count,
                        s.polarization
                    ));
                }
            });

            ui.checkbox(&mut params.pause_simulation, "Pause Simulation");
        });

    should_reset
}

// Lines of the parameter readout, species two only while it is shown
pub fn hud_lines(params: &SimulationParams) -> Vec<String> {
    let mut lines = Vec::new();
    for &species in params.enabled_species() {
        let p = params.species(species);
        lines.push(format!("Spec {}#: {}", species.number(), p.count));
        lines.push(format!("  Turn angle: {:.1}", p.turning_angle));
        for &target in params.enabled_species() {
            for zone in ZONES {
                lines.push(format!(
                    "  {}({}-{}): {}",
                    zone.abbreviation(),
                    species.number(),
                    target.number(),
                    p.range(target, zone)
                ));
            }
        }
    }
    lines.push(format!("{}{}", params.wall_mode.label(), if params.pause_simulation { " (paused)" } else { "" }));
    lines
}

const CONTROLS: &[&str] = &[
    "Controls -",
    "  ZOR(1-1): 'e,r'   ZOR(1-2): 'E,R'",
    "  ZOO(1-1): 'd,f'   ZOO(1-2): 'D,F'",
    "  ZOA(1-1): 'c,v'   ZOA(1-2): 'C,V'",
    "  ZOR(2-1): 'y,u'   ZOR(2-2): 'Y,U'",
    "  ZOO(2-1): 'h,j'   ZOO(2-2): 'H,J'",
    "  ZOA(2-1): 'n,m'   ZOA(2-2): 'N,M'",
    "  Turn angle 1: ', .'",
    "  Turn angle 2: '< >'",
    "  Species 1 count: '[ ]'",
    "  Species 2 count: '{ }'",
    "  Change view: Left & Right",
    "  Change size: Up & Down",
    "  Restart: 'q'",
    "  Toggle walls: 'a'",
    "  Toggle species: 'z'",
    "  Pause: 'p'",
];

// Draw the parameter readout top-left and the controls bottom-left
pub fn draw_hud(draw: &Draw, params: &SimulationParams, window_rect: Rect) {
    let margin = 20.0;
    let line_height = 15.0;
    let text_x = window_rect.left() + margin;

    for (i, text) in hud_lines(params).iter().enumerate() {
        let y = window_rect.top() - margin - i as f32 * line_height;
        draw.text(text)
            .x_y(text_x + 150.0, y)
            .w(300.0)
            .left_justify()
            .color(BLACK)
            .font_size(12);
    }

    for (i, text) in CONTROLS.iter().enumerate() {
        let y = window_rect.bottom() + margin + (CONTROLS.len() - i) as f32 * line_height;
        draw.text(text)
            .x_y(text_x + 150.0, y)
            .w(300.0)
            .left_justify()
            .color(BLACK)
            .font_size(12);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hud_hides_second_species_until_enabled() {
        let mut params = SimulationParams::default();
        let lines = hud_lines(&params);
        assert_eq!(lines[0], "Spec 1#: 100");
        assert!(lines.iter().any(|l| l.contains("ZOA(1-1): 20")));
        assert!(!lines.iter().any(|l| l.contains("(1-2)") || l.contains("Spec 2#")));

        params.two_species = true;
        let lines = hud_lines(&params);
        assert!(lines.iter().any(|l| l.contains("ZOO(2-2): 10")));
        assert!(lines.iter().any(|l| l.contains("Spec 2#: 100")));
    }
}
