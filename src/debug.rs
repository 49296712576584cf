/*
 * Debug Information Module
 *
 * Frame timing shown in the UI, and a few statistics describing the state
 * of a school:
 * - Polarization: length of the mean heading, 1 when every fish swims the
 *   same way and close to 0 for a disordered swarm
 * - Centroid: mean position of the school
 */

use std::time::Duration;

use nannou::prelude::*;

use crate::school::School;
use crate::vector;

// Debug information to display
#[derive(Debug, Clone, Default)]
pub struct DebugInfo {
    pub fps: f32,
    pub frame_time: Duration,
    pub tick: u64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SchoolStats {
    pub count: usize,
    pub polarization: f32,
    pub centroid: Vec3,
}

impl SchoolStats {
    pub fn measure(school: &School) -> Self {
        let count = school.active();
        if count == 0 {
            return Self {
                count,
                polarization: 0.0,
                centroid: Vec3::ZERO,
            };
        }

        let (heading_sum, position_sum) = school
            .iter()
            .fold((Vec3::ZERO, Vec3::ZERO), |(h, p), fish| {
                (h + fish.direction(), p + fish.position())
            });
        let n = count as f32;
        Self {
            count,
            polarization: vector::magnitude(heading_sum / n),
            centroid: position_sum / n,
        }
    }
}
