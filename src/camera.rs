/*
 * Camera Module
 *
 * This module defines the Camera struct: where the viewer stands relative
 * to the box and how world points are projected onto the window.
 * The camera always looks at the center of the box with +y up. There are
 * three viewpoints: a corner view (the default), a front view on the z axis
 * and a side view on the x axis, all at the same distance.
 */

use nannou::prelude::*;

use crate::vector;

// Distance kept between the box walls and the corner viewpoint
const VIEW_MARGIN: f32 = 65.0;
// Vertical field of view in degrees
const FIELD_OF_VIEW: f32 = 50.0;
const NEAR_PLANE: f32 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Viewpoint {
    Corner,
    Front,
    Side,
}

// A world point as seen on screen
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projected {
    pub screen: Vec2,
    // Screen pixels per world unit at this depth
    pub scale: f32,
    pub depth: f32,
}

pub struct Camera {
    pub viewpoint: Viewpoint,
    // Viewing distance, fixed from the box size at start-up
    pub distance: f32,
}

impl Camera {
    pub fn new(box_edge_size: f32) -> Self {
        let corner = box_edge_size + VIEW_MARGIN;
        Self {
            viewpoint: Viewpoint::Corner,
            distance: (corner * corner * 2.0).sqrt(),
        }
    }

    // Right arrow: side view goes back to the corner, otherwise look down the z axis
    pub fn cycle_right(&mut self) {
        self.viewpoint = match self.viewpoint {
            Viewpoint::Side => Viewpoint::Corner,
            Viewpoint::Corner | Viewpoint::Front => Viewpoint::Front,
        };
    }

    // Left arrow: front view goes back to the corner, otherwise look down the x axis
    pub fn cycle_left(&mut self) {
        self.viewpoint = match self.viewpoint {
            Viewpoint::Front => Viewpoint::Corner,
            Viewpoint::Corner | Viewpoint::Side => Viewpoint::Side,
        };
    }

    pub fn eye(&self, box_edge_size: f32) -> Vec3 {
        match self.viewpoint {
            Viewpoint::Corner => vec3(
                -box_edge_size - VIEW_MARGIN,
                0.0,
                box_edge_size + VIEW_MARGIN,
            ),
            Viewpoint::Front => vec3(0.0, 0.0, self.distance),
            Viewpoint::Side => vec3(-self.distance, 0.0, 0.0),
        }
    }

    // Perspective projection of a world point; None when it is behind the viewer
    pub fn project(&self, point: Vec3, box_edge_size: f32, window_rect: Rect) -> Option<Projected> {
        let eye = self.eye(box_edge_size);
        let forward = vector::try_normalize(-eye)?;
        let right = vector::try_normalize(vector::cross(forward, Vec3::Y))?;
        let up = vector::cross(right, forward);

        let relative = point - eye;
        let depth = vector::dot(relative, forward);
        if depth <= NEAR_PLANE {
            return None;
        }

        let focal = 1.0 / (FIELD_OF_VIEW.to_radians() * 0.5).tan();
        let scale = focal / depth * window_rect.h() * 0.5;
        let screen = vec2(vector::dot(relative, right), vector::dot(relative, up)) * scale;
        Some(Projected {
            screen: screen + window_rect.xy(),
            scale,
            depth,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window() -> Rect {
        Rect::from_w_h(1280.0, 960.0)
    }

    #[test]
    fn arrow_keys_cycle_like_the_classic_viewer() {
        let mut camera = Camera::new(50.0);
        camera.cycle_right();
        assert_eq!(camera.viewpoint, Viewpoint::Front);
        camera.cycle_right();
        assert_eq!(camera.viewpoint, Viewpoint::Front);
        camera.cycle_left();
        assert_eq!(camera.viewpoint, Viewpoint::Corner);
        camera.cycle_left();
        assert_eq!(camera.viewpoint, Viewpoint::Side);
        camera.cycle_right();
        assert_eq!(camera.viewpoint, Viewpoint::Corner);
    }

    #[test]
    fn viewpoints_share_one_distance() {
        let camera = Camera::new(50.0);
        let corner = vector::magnitude(camera.eye(50.0));
        assert!((corner - camera.distance).abs() < 1.0e-3);
    }

    #[test]
    fn center_projects_to_window_center() {
        let camera = Camera::new(50.0);
        let projected = camera.project(Vec3::ZERO, 50.0, window()).unwrap();
        assert!(projected.screen.length() < 1.0e-3);
        assert!(projected.scale > 0.0);
    }

    #[test]
    fn front_view_maps_axes_directly() {
        let mut camera = Camera::new(50.0);
        camera.cycle_right();
        let right = camera.project(vec3(10.0, 0.0, 0.0), 50.0, window()).unwrap();
        let up = camera.project(vec3(0.0, 10.0, 0.0), 50.0, window()).unwrap();
        assert!(right.screen.x > 0.0 && right.screen.y.abs() < 1.0e-3);
        assert!(up.screen.y > 0.0 && up.screen.x.abs() < 1.0e-3);
    }

    #[test]
    fn points_behind_the_viewer_are_culled() {
        let mut camera = Camera::new(50.0);
        camera.cycle_right();
        assert!(camera.project(vec3(0.0, 0.0, 1000.0), 50.0, window()).is_none());
    }
}
