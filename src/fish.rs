/*
 * Fish Module
 *
 * This module defines the Fish struct and its movement.
 * Every tick a fish:
 * 1. Turns toward the heading it decided on during the previous tick,
 *    limited by its species' turning angle
 * 2. Swims one unit along its heading
 * 3. Is kept inside the domain by the wall policy
 *
 * Deciding the next heading is the job of the zones module.
 */

use nannou::prelude::*;
use rand::Rng;

use crate::boundary::{self, WallMode};
use crate::steering;
use crate::vector;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fish {
    position: Vec3,
    // Always unit length between ticks
    direction: Vec3,
    // Desired heading for the next move, zero means "keep going"
    next_direction: Vec3,
}

impl Fish {
    // A fish at `position` heading along `direction` (normalized here).
    // A zero `direction` falls back to +x.
    pub fn new(position: Vec3, direction: Vec3) -> Self {
        Self {
            position,
            direction: vector::try_normalize(direction).unwrap_or(Vec3::X),
            next_direction: Vec3::ZERO,
        }
    }

    // Random position inside the domain and random heading
    pub fn random<R: Rng + ?Sized>(half_extent: f32, rng: &mut R) -> Self {
        Self {
            position: vector::random_point_in_cube(rng, half_extent),
            direction: vector::random_unit_vector(rng),
            next_direction: Vec3::ZERO,
        }
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    pub fn next_direction(&self) -> Vec3 {
        self.next_direction
    }

    pub(crate) fn set_next_direction(&mut self, next_direction: Vec3) {
        self.next_direction = next_direction;
    }

    // Rotate toward the pending heading, swim one unit and apply the walls
    pub fn swim<R: Rng + ?Sized>(
        &mut self,
        max_turn: f32,
        half_extent: f32,
        wall_mode: WallMode,
        rng: &mut R,
    ) {
        self.direction = steering::turn_toward(self.direction, self.next_direction, max_turn, rng);
        self.position += self.direction;
        boundary::enforce(&mut self.position, &mut self.direction, half_extent, wall_mode);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn new_normalizes_heading() {
        let fish = Fish::new(Vec3::ZERO, vec3(0.0, 3.0, 4.0));
        assert!((vector::magnitude(fish.direction()) - 1.0).abs() < 1.0e-6);
        assert_eq!(Fish::new(Vec3::ZERO, Vec3::ZERO).direction(), Vec3::X);
    }

    #[test]
    fn swim_without_pending_heading_goes_straight() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut fish = Fish::new(vec3(1.0, 2.0, 3.0), vec3(0.0, 0.0, 1.0));
        fish.swim(0.1, 50.0, WallMode::Hard, &mut rng);
        assert_eq!(fish.position(), vec3(1.0, 2.0, 4.0));
        assert_eq!(fish.direction(), vec3(0.0, 0.0, 1.0));
    }

    #[test]
    fn swim_turns_then_moves() {
        let mut rng = StdRng::seed_from_u64(12);
        let mut fish = Fish::new(Vec3::ZERO, vec3(1.0, 0.0, 0.0));
        fish.set_next_direction(vec3(0.0, 1.0, 0.0));
        fish.swim(0.1, 50.0, WallMode::Hard, &mut rng);
        assert!((vector::angle_between(vec3(1.0, 0.0, 0.0), fish.direction()) - 0.1).abs() < 1.0e-4);
        assert_eq!(fish.position(), fish.direction());
    }

    #[test]
    fn random_fish_is_inside_the_domain() {
        let mut rng = StdRng::seed_from_u64(13);
        for _ in 0..100 {
            let fish = Fish::random(30.0, &mut rng);
            let p = fish.position();
            assert!(p.x.abs() <= 30.0 && p.y.abs() <= 30.0 && p.z.abs() <= 30.0);
            assert_eq!(fish.next_direction(), Vec3::ZERO);
        }
    }
}
