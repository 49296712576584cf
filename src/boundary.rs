/*
 * Boundary Module
 *
 * Keeps fish inside the cubic domain [-half_extent, half_extent]^3.
 * Each axis is handled independently: an overshooting component is clamped
 * back onto the wall, then either the heading component is reflected
 * (hard wall) or the fish is relocated to the opposite wall (periodic).
 *
 * The periodic mode is a teleport to the opposite face, not a modular wrap:
 * the overshoot distance is discarded.
 */

use nannou::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WallMode {
    // Reflect the heading component that hit the wall
    #[default]
    Hard,
    // Jump to the opposite wall on that axis
    Periodic,
}

impl WallMode {
    pub fn toggled(self) -> Self {
        match self {
            WallMode::Hard => WallMode::Periodic,
            WallMode::Periodic => WallMode::Hard,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            WallMode::Hard => "Hard walls",
            WallMode::Periodic => "Periodic walls",
        }
    }
}

// Apply the wall policy to every axis of one fish
pub fn enforce(position: &mut Vec3, direction: &mut Vec3, half_extent: f32, mode: WallMode) {
    for axis in 0..3 {
        if position[axis].abs() > half_extent {
            // Exactly onto the wall, keeping the side
            position[axis] = half_extent.copysign(position[axis]);
            match mode {
                WallMode::Hard => direction[axis] = -direction[axis],
                WallMode::Periodic => position[axis] = -position[axis],
            }
        }
    }
}
