/*
 * Vector Math Module
 *
 * Pure helper functions over 3D vectors used by the schooling model:
 * magnitude, normalization, cross/dot products, inter-vector angles,
 * distances and rotation about an axis (Rodrigues' formula).
 *
 * None of these functions hold state. Normalization of the zero vector is
 * undefined, so callers either check with `is_zero` first or use
 * `try_normalize`.
 */

use nannou::prelude::*;
use rand::Rng;

// Length of the given vector
#[inline]
pub fn magnitude(v: Vec3) -> f32 {
    (v.x * v.x + v.y * v.y + v.z * v.z).sqrt()
}

// Unit vector in the direction of `v`. `v` must not be the zero vector.
#[inline]
pub fn normalize(v: Vec3) -> Vec3 {
    debug_assert!(!is_zero(v), "normalize called on the zero vector");
    v / magnitude(v)
}

// Unit vector in the direction of `v`, or None when `v` is too small to
// produce a finite result
#[inline]
pub fn try_normalize(v: Vec3) -> Option<Vec3> {
    let m = magnitude(v);
    if m > 0.0 && m.is_finite() {
        let unit = v / m;
        if unit.is_finite() {
            return Some(unit);
        }
    }
    None
}

// Exact zero test, the accumulators start from an exact zero
#[inline]
pub fn is_zero(v: Vec3) -> bool {
    v.x == 0.0 && v.y == 0.0 && v.z == 0.0
}

#[inline]
pub fn cross(a: Vec3, b: Vec3) -> Vec3 {
    vec3(
        a.y * b.z - a.z * b.y,
        a.z * b.x - a.x * b.z,
        a.x * b.y - a.y * b.x,
    )
}

#[inline]
pub fn dot(a: Vec3, b: Vec3) -> f32 {
    a.x * b.x + a.y * b.y + a.z * b.z
}

// Angle in radians between two vectors, in [0, PI].
// The cosine is clamped to [-1, 1] so rounding can never produce NaN.
// A zero-length input has no defined angle and yields 0.
pub fn angle_between(a: Vec3, b: Vec3) -> f32 {
    let denominator = magnitude(a) * magnitude(b);
    if denominator == 0.0 {
        return 0.0;
    }
    (dot(a, b) / denominator).clamp(-1.0, 1.0).acos()
}

// Vector pointing from `start` to `end`
#[inline]
pub fn direction(start: Vec3, end: Vec3) -> Vec3 {
    end - start
}

#[inline]
pub fn distance(a: Vec3, b: Vec3) -> f32 {
    magnitude(a - b)
}

// Rodrigues' rotation of `v` about the unit `axis` by `radians`.
//
// The rotation happens in the plane spanned by `v` and `axis x v`, which is
// exact when `axis` is perpendicular to `v` (the only way the turn limiter
// calls it).
pub fn rotate_about_axis(axis: Vec3, v: Vec3, radians: f32) -> Vec3 {
    let c = cross(axis, v);
    v * radians.cos() + c * radians.sin()
}

// Uniformly distributed random unit vector (rejection sampled from the unit ball)
pub fn random_unit_vector<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    loop {
        let candidate = vec3(
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
        );
        let m = magnitude(candidate);
        if m > 1.0e-3 && m <= 1.0 {
            return candidate / m;
        }
    }
}

// Random point uniformly distributed in the cube [-half_extent, half_extent]^3
pub fn random_point_in_cube<R: Rng + ?Sized>(rng: &mut R, half_extent: f32) -> Vec3 {
    if half_extent <= 0.0 {
        return Vec3::ZERO;
    }
    vec3(
        rng.gen_range(-half_extent..=half_extent),
        rng.gen_range(-half_extent..=half_extent),
        rng.gen_range(-half_extent..=half_extent),
    )
}
