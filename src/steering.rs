/*
 * Steering Module
 *
 * Turn-rate limiting: a fish rotates its heading toward the desired heading
 * by at most its species' turning angle per tick. When the desired heading
 * is within reach it is adopted exactly, so headings settle instead of
 * oscillating around the target.
 *
 * Parallel or antiparallel headings leave the rotation axis undefined
 * (the cross product vanishes). Those cases rotate about an axis built
 * from a random unit vector instead.
 */

use nannou::prelude::*;
use rand::Rng;
use tracing::trace;

use crate::vector;

// New heading after turning `direction` toward `target` by at most `max_turn` radians.
// A zero `target` means "no behavioral change" and returns `direction` as is.
pub fn turn_toward<R: Rng + ?Sized>(direction: Vec3, target: Vec3, max_turn: f32, rng: &mut R) -> Vec3 {
    if vector::is_zero(target) {
        return direction;
    }

    if vector::angle_between(direction, target) <= max_turn {
        return target;
    }

    let axis = match vector::try_normalize(vector::cross(direction, target)) {
        Some(axis) => axis,
        None => {
            trace!("antiparallel heading, rotating about a random axis");
            random_perpendicular_axis(direction, rng)
        }
    };

    let rotated = vector::rotate_about_axis(axis, direction, max_turn);
    // Rotation about a perpendicular unit axis keeps the length; renormalize
    // to absorb rounding drift
    vector::try_normalize(rotated).unwrap_or(direction)
}

// Unit axis perpendicular to `direction`, derived from random unit vectors
// until one is not (anti)parallel to `direction`
fn random_perpendicular_axis<R: Rng + ?Sized>(direction: Vec3, rng: &mut R) -> Vec3 {
    loop {
        let candidate = vector::random_unit_vector(rng);
        if candidate == direction {
            continue;
        }
        if let Some(axis) = vector::try_normalize(vector::cross(direction, candidate)) {
            return axis;
        }
    }
}
