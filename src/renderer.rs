/*
 * Renderer Module
 *
 * This module handles the rendering of the fish school.
 * It draws the box the fish live in, grids on four of its walls, every active fish
 * as a small sphere and the parameter HUD. Fish are projected through the
 * camera and drawn far-to-near so closer fish cover farther ones.
 *
 * Rendering only reads fish positions and headings between ticks.
 */

use nannou::prelude::*;

use crate::app::Model;
use crate::camera::Camera;
use crate::params::SpeciesId;
use crate::ui;

// Radius of a fish in world units
const FISH_RADIUS: f32 = 0.5;
// Spacing of the wall grids in world units
const GRID_SPACING: f32 = 2.0;

// Color of species one while both species are shown (orange)
const SPECIES_ONE_COLOUR: (f32, f32, f32) = (1.0, 0.5, 0.0);
// Color of species two (blue)
const SPECIES_TWO_COLOUR: (f32, f32, f32) = (0.2, 0.4, 1.0);

// Render the model
pub fn view(app: &App, model: &Model, frame: Frame) {
    let draw = app.draw();
    draw.background().color(WHITE);

    let window_rect = app.window_rect();
    let params = model.simulation.params();
    let half = params.box_edge_size;

    draw_box(&draw, &model.camera, half, window_rect);

    // Collect every visible fish with its color, then paint back to front
    let mut sprites = Vec::new();
    for &species in params.enabled_species() {
        for fish in model.simulation.school(species) {
            let Some(projected) = model.camera.project(fish.position(), half, window_rect) else {
                continue;
            };
            let colour = if params.two_species {
                species_colour(species)
            } else {
                position_colour(fish.position(), half)
            };
            sprites.push((projected, colour));
        }
    }
    sprites.sort_by(|a, b| b.0.depth.total_cmp(&a.0.depth));

    for (projected, (r, g, b)) in sprites {
        draw.ellipse()
            .xy(projected.screen)
            .radius((FISH_RADIUS * projected.scale).max(1.0))
            .color(rgb(r, g, b));
    }

    ui::draw_hud(&draw, params, window_rect);

    if let Err(err) = draw.to_frame(app, &frame) {
        tracing::warn!(?err, "Failed to draw frame");
    }
    if let Err(err) = model.egui.draw_to_frame(&frame) {
        tracing::warn!(?err, "Failed to draw UI");
    }
}

fn species_colour(species: SpeciesId) -> (f32, f32, f32) {
    match species {
        SpeciesId::One => SPECIES_ONE_COLOUR,
        SpeciesId::Two => SPECIES_TWO_COLOUR,
    }
}

// Map a position to an RGB color so neighbors in space share a hue
pub fn position_colour(position: Vec3, half_extent: f32) -> (f32, f32, f32) {
    let channel = |v: f32| (v / half_extent * 2.0 + 0.5).clamp(0.0, 1.0);
    (channel(position.x), channel(position.y), channel(position.z))
}

// Draw the twelve edges of the box and the wall grids
fn draw_box(draw: &Draw, camera: &Camera, half: f32, window_rect: Rect) {
    let edge_colour = rgba(0.2, 0.2, 0.2, 1.0);
    let grid_colour = rgba(0.2, 0.2, 0.2, 0.3);

    let segment = |a: Vec3, b: Vec3, colour: Rgba, weight: f32| {
        if let (Some(pa), Some(pb)) = (
            camera.project(a, half, window_rect),
            camera.project(b, half, window_rect),
        ) {
            draw.line()
                .start(pa.screen)
                .end(pb.screen)
                .weight(weight)
                .color(colour);
        }
    };

    let corners = [-half, half];
    for &a in &corners {
        for &b in &corners {
            segment(vec3(-half, a, b), vec3(half, a, b), edge_colour, 1.5);
            segment(vec3(a, -half, b), vec3(a, half, b), edge_colour, 1.5);
            segment(vec3(a, b, -half), vec3(a, b, half), edge_colour, 1.5);
        }
    }

    // Floor, back, right and top walls, each with lines along both of its axes
    let walls: [fn(f32, f32, f32) -> Vec3; 4] = [
        |u, v, h| vec3(u, -h, v),
        |u, v, h| vec3(u, v, -h),
        |u, v, h| vec3(h, v, u),
        |u, v, h| vec3(u, h, v),
    ];
    let offsets = grid_offsets(half);
    for wall in walls {
        for &offset in &offsets {
            segment(wall(offset, -half, half), wall(offset, half, half), grid_colour, 1.0);
            segment(wall(-half, offset, half), wall(half, offset, half), grid_colour, 1.0);
        }
    }
}

// Grid line positions from one wall to the other, GRID_SPACING apart
fn grid_offsets(half: f32) -> Vec<f32> {
    let steps = (2.0 * half / GRID_SPACING).floor() as i32;
    (0..=steps).map(|i| -half + i as f32 * GRID_SPACING).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_colour_is_clamped() {
        assert_eq!(position_colour(Vec3::ZERO, 50.0), (0.5, 0.5, 0.5));
        assert_eq!(position_colour(vec3(50.0, -50.0, -12.5), 50.0), (1.0, 0.0, 0.0));
    }

    #[test]
    fn grid_spans_the_box_every_two_units() {
        let offsets = grid_offsets(25.0);
        assert_eq!(offsets.len(), 26);
        assert_eq!(offsets[0], -25.0);
        assert_eq!(offsets[25], 25.0);
        assert!(offsets.windows(2).all(|w| w[1] - w[0] == GRID_SPACING));
    }
}
