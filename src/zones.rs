/*
 * Zones Module
 *
 * Zonal classification of neighbors (Couzin's model) and resolution of the
 * desired heading for the next tick.
 *
 * Every visible neighbor is sorted into one of three concentric zones:
 * 1. Repulsion: too close, steer directly away from it
 * 2. Orientation: close, match its heading
 * 3. Attraction: farther, steer toward it
 *
 * Repulsion has absolute priority. The orientation/attraction pass only runs
 * when no neighbor in any scanned population fell inside the repulsion zone.
 * Neighbors inside the rear blind cone are never seen.
 */

use nannou::prelude::*;
use serde::{Deserialize, Serialize};

use crate::fish::Fish;
use crate::vector;

// Interaction radii of one species toward one target species
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoneRanges {
    pub repulsion: f32,
    pub orientation: f32,
    pub attraction: f32,
}

impl ZoneRanges {
    pub const fn new(repulsion: f32, orientation: f32, attraction: f32) -> Self {
        Self {
            repulsion,
            orientation,
            attraction,
        }
    }
}

// Which zones were hit during one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ZoneFlags {
    pub repulsion: bool,
    pub orientation: bool,
    pub attraction: bool,
}

impl ZoneFlags {
    pub fn any(&self) -> bool {
        self.repulsion || self.orientation || self.attraction
    }
}

// The half-angle of the visible cone: PI minus half the blind angle
pub fn blind_radian_segment(blind_angle_degrees: f32) -> f32 {
    std::f32::consts::PI - blind_angle_degrees.to_radians() * 0.5
}

// One population a fish scans, with the radii that apply to it
#[derive(Debug, Clone, Copy)]
pub struct Neighborhood<'a> {
    pub fish: &'a [Fish],
    pub ranges: ZoneRanges,
    // Index of the scanning fish when it belongs to this population
    pub skip: Option<usize>,
}

impl<'a> Neighborhood<'a> {
    pub fn new(fish: &'a [Fish], ranges: ZoneRanges, skip: Option<usize>) -> Self {
        Self { fish, ranges, skip }
    }

    // Visible neighbors with their offset (scanner -> neighbor) and distance
    fn visible_from(
        &self,
        scanner: &'a Fish,
        blind_segment: f32,
    ) -> impl Iterator<Item = (&'a Fish, Vec3, f32)> + 'a {
        let skip = self.skip;
        let fish: &'a [Fish] = self.fish;
        fish.iter()
            .enumerate()
            .filter(move |(j, _)| Some(*j) != skip)
            .filter_map(move |(_, other)| {
                let offset = vector::direction(scanner.position(), other.position());
                // A coincident neighbor has no bearing
                if vector::is_zero(offset) {
                    return None;
                }
                if vector::angle_between(scanner.direction(), offset) < blind_segment {
                    Some((other, offset, vector::magnitude(offset)))
                } else {
                    None
                }
            })
    }
}

// Running sum of directional influences for one fish during one tick
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ZoneAccumulator {
    pub next_direction: Vec3,
    pub flags: ZoneFlags,
}

impl ZoneAccumulator {
    // Add a unit vector away from every visible neighbor inside the repulsion radius
    pub fn accumulate_repulsion(&mut self, fish: &Fish, hood: &Neighborhood, blind_segment: f32) {
        for (_, offset, d) in hood.visible_from(fish, blind_segment) {
            if d < hood.ranges.repulsion {
                self.flags.repulsion = true;
                self.next_direction += -offset / d;
            }
        }
    }

    // Orientation adds the neighbor's heading, attraction a unit vector toward it
    pub fn accumulate_orientation_attraction(
        &mut self,
        fish: &Fish,
        hood: &Neighborhood,
        blind_segment: f32,
    ) {
        for (other, offset, d) in hood.visible_from(fish, blind_segment) {
            if d < hood.ranges.orientation {
                self.flags.orientation = true;
                self.next_direction += other.direction();
            } else if d < hood.ranges.attraction {
                self.flags.attraction = true;
                self.next_direction += offset / d;
            }
        }
    }

    // Final desired heading: zero when no zone was hit, otherwise a unit vector.
    //
    // Orientation also counts the fish's own heading once so that an
    // alignment-only neighborhood keeps some of its momentum. An exact
    // cancellation falls back to the current heading.
    pub fn resolve(mut self, own_direction: Vec3) -> Vec3 {
        if self.flags.orientation {
            self.next_direction += own_direction;
        }
        if !self.flags.any() {
            return Vec3::ZERO;
        }
        vector::try_normalize(self.next_direction).unwrap_or(own_direction)
    }
}

// Run both passes for one fish over every population, in order
pub fn classify(fish: &Fish, hoods: &[Neighborhood], blind_segment: f32) -> ZoneAccumulator {
    let mut acc = ZoneAccumulator::default();
    for hood in hoods {
        acc.accumulate_repulsion(fish, hood, blind_segment);
    }
    // Only do orientation/attraction work if nothing was in the repulsion zone
    if !acc.flags.repulsion {
        for hood in hoods {
            acc.accumulate_orientation_attraction(fish, hood, blind_segment);
        }
    }
    acc
}

// Desired heading for the next move
pub fn sense(fish: &Fish, hoods: &[Neighborhood], blind_segment: f32) -> Vec3 {
    classify(fish, hoods, blind_segment).resolve(fish.direction())
}

#[cfg(test)]
mod tests {
    use super::*;

    const NO_BLIND: f32 = std::f32::consts::PI;

    fn ranges() -> ZoneRanges {
        ZoneRanges::new(2.0, 10.0, 20.0)
    }

    #[test]
    fn blind_segment_from_degrees() {
        assert!((blind_radian_segment(90.0) - 0.75 * std::f32::consts::PI).abs() < 1.0e-6);
        assert_eq!(blind_radian_segment(0.0), std::f32::consts::PI);
    }

    #[test]
    fn neighbor_in_blind_cone_is_ignored() {
        let school = [
            Fish::new(vec3(0.0, 0.0, 0.0), vec3(1.0, 0.0, 0.0)),
            // Directly behind
            Fish::new(vec3(-1.0, 0.0, 0.0), vec3(1.0, 0.0, 0.0)),
        ];
        let hood = Neighborhood::new(&school, ranges(), Some(0));
        let acc = classify(&school[0], &[hood], blind_radian_segment(90.0));
        assert!(!acc.flags.any());
        assert_eq!(sense(&school[0], &[hood], blind_radian_segment(90.0)), Vec3::ZERO);
    }

    #[test]
    fn repulsion_sums_unnormalized_unit_vectors() {
        let school = [
            Fish::new(vec3(0.0, 0.0, 0.0), vec3(1.0, 0.0, 0.0)),
            Fish::new(vec3(1.0, 0.0, 0.0), vec3(1.0, 0.0, 0.0)),
            Fish::new(vec3(0.0, 1.5, 0.0), vec3(1.0, 0.0, 0.0)),
        ];
        let hood = Neighborhood::new(&school, ranges(), Some(0));
        let acc = classify(&school[0], &[hood], NO_BLIND);

        assert!(acc.flags.repulsion);
        assert_eq!(acc.next_direction, vec3(-1.0, -1.0, 0.0));
    }

    #[test]
    fn repulsion_suppresses_orientation_and_attraction() {
        let school = [
            Fish::new(vec3(0.0, 0.0, 0.0), vec3(1.0, 0.0, 0.0)),
            Fish::new(vec3(1.0, 0.0, 0.0), vec3(0.0, 1.0, 0.0)),
            Fish::new(vec3(5.0, 0.0, 0.0), vec3(0.0, 0.0, 1.0)),
            Fish::new(vec3(15.0, 0.0, 0.0), vec3(0.0, 0.0, 1.0)),
        ];
        let hood = Neighborhood::new(&school, ranges(), Some(0));
        let acc = classify(&school[0], &[hood], NO_BLIND);

        assert!(acc.flags.repulsion);
        assert!(!acc.flags.orientation);
        assert!(!acc.flags.attraction);
    }

    #[test]
    fn repulsion_in_another_population_also_takes_priority() {
        let own = [
            Fish::new(vec3(0.0, 0.0, 0.0), vec3(1.0, 0.0, 0.0)),
            Fish::new(vec3(5.0, 0.0, 0.0), vec3(0.0, 1.0, 0.0)),
        ];
        let other = [Fish::new(vec3(0.0, 1.0, 0.0), vec3(1.0, 0.0, 0.0))];
        let hoods = [
            Neighborhood::new(&own, ranges(), Some(0)),
            Neighborhood::new(&other, ranges(), None),
        ];
        let acc = classify(&own[0], &hoods, NO_BLIND);
        assert!(acc.flags.repulsion);
        assert!(!acc.flags.orientation);
        assert_eq!(acc.next_direction, vec3(0.0, -1.0, 0.0));
    }

    #[test]
    fn orientation_includes_own_heading_once() {
        let school = [
            Fish::new(vec3(0.0, 0.0, 0.0), vec3(1.0, 0.0, 0.0)),
            Fish::new(vec3(5.0, 0.0, 0.0), vec3(0.0, 1.0, 0.0)),
        ];
        let hood = Neighborhood::new(&school, ranges(), Some(0));
        let acc = classify(&school[0], &[hood], NO_BLIND);
        assert!(acc.flags.orientation);
        assert_eq!(acc.next_direction, vec3(0.0, 1.0, 0.0));

        let resolved = acc.resolve(school[0].direction());
        let expected = vector::normalize(vec3(1.0, 1.0, 0.0));
        assert!((resolved - expected).length() < 1.0e-6);
    }

    #[test]
    fn attraction_pulls_toward_neighbor() {
        let school = [
            Fish::new(vec3(0.0, 0.0, 0.0), vec3(1.0, 0.0, 0.0)),
            Fish::new(vec3(0.0, 0.0, 12.0), vec3(1.0, 0.0, 0.0)),
        ];
        let hood = Neighborhood::new(&school, ranges(), Some(0));
        let acc = classify(&school[0], &[hood], NO_BLIND);
        assert!(acc.flags.attraction);
        assert!(!acc.flags.orientation);
        assert_eq!(acc.resolve(school[0].direction()), vec3(0.0, 0.0, 1.0));
    }

    #[test]
    fn zone_boundaries_are_half_open() {
        let school = [
            Fish::new(vec3(0.0, 0.0, 0.0), vec3(1.0, 0.0, 0.0)),
            // Exactly on the orientation radius counts as attraction
            Fish::new(vec3(10.0, 0.0, 0.0), vec3(0.0, 1.0, 0.0)),
            // Exactly on the attraction radius has no influence
            Fish::new(vec3(0.0, 20.0, 0.0), vec3(0.0, 1.0, 0.0)),
        ];
        let hood = Neighborhood::new(&school, ranges(), Some(0));
        let acc = classify(&school[0], &[hood], NO_BLIND);
        assert!(acc.flags.attraction);
        assert!(!acc.flags.orientation);
        assert_eq!(acc.next_direction, vec3(1.0, 0.0, 0.0));
    }

    #[test]
    fn coincident_neighbor_is_not_seen() {
        let school = [
            Fish::new(vec3(3.0, 3.0, 3.0), vec3(1.0, 0.0, 0.0)),
            Fish::new(vec3(3.0, 3.0, 3.0), vec3(0.0, 1.0, 0.0)),
        ];
        let hood = Neighborhood::new(&school, ranges(), Some(0));
        let acc = classify(&school[0], &[hood], NO_BLIND);
        assert!(!acc.flags.any());
    }

    #[test]
    fn exact_cancellation_keeps_current_heading() {
        let school = [
            Fish::new(vec3(0.0, 0.0, 0.0), vec3(1.0, 0.0, 0.0)),
            Fish::new(vec3(0.0, 1.0, 0.0), vec3(1.0, 0.0, 0.0)),
            Fish::new(vec3(0.0, -1.0, 0.0), vec3(1.0, 0.0, 0.0)),
        ];
        let hood = Neighborhood::new(&school, ranges(), Some(0));
        let heading = sense(&school[0], &[hood], NO_BLIND);
        assert_eq!(heading, vec3(1.0, 0.0, 0.0));
    }
}
