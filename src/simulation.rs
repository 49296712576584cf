/*
 * Simulation Module
 *
 * The Simulation owns the parameters, both species' schools and the random
 * number generator, and advances everything one tick at a time.
 *
 * A tick runs in a fixed order:
 * 1. Move species one, then species two (if enabled), using the headings
 *    decided during the previous tick
 * 2. Sense species one, then species two (if enabled): classify neighbors
 *    into zones and resolve the heading for the next tick
 *
 * Sensing therefore lags moving by one tick. The sense pass only reads
 * positions and headings, which nothing writes during that pass, so it can
 * run on the rayon pool without changing the result.
 */

use nannou::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use thiserror::Error;
use tracing::{debug, info, trace};

use crate::boundary::WallMode;
use crate::fish::Fish;
use crate::params::{ParamsError, SimulationParams, SpeciesId, MAX_FISH};
use crate::school::School;
use crate::zones::{self, Neighborhood, ZoneRanges};

#[derive(Debug, Error)]
pub enum SimulationError {
    #[error("invalid parameters")]
    Params(#[from] ParamsError),
    #[error("{species} has no fish {index} ({active} active)")]
    FishOutOfRange {
        species: SpeciesId,
        index: usize,
        active: usize,
    },
    #[error("position {position:?} lies outside the domain of half-extent {half_extent}")]
    OutsideDomain { position: [f32; 3], half_extent: f32 },
    #[error("fish heading must be non-zero and finite")]
    InvalidHeading,
}

pub struct Simulation {
    params: SimulationParams,
    schools: [School; 2],
    rng: StdRng,
    tick: u64,
}

impl Simulation {
    pub fn new(params: SimulationParams) -> Result<Self, SimulationError> {
        params.validate()?;
        let mut rng = match params.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let half_extent = params.box_edge_size;
        let schools = [
            School::new(MAX_FISH, params.species[0].count, half_extent, &mut rng),
            School::new(MAX_FISH, params.species[1].count, half_extent, &mut rng),
        ];
        info!(
            species_one = params.species[0].count,
            species_two = params.species[1].count,
            two_species = params.two_species,
            seed = ?params.rng_seed,
            "Created fish school simulation"
        );
        Ok(Self {
            params,
            schools,
            rng,
            tick: 0,
        })
    }

    pub fn params(&self) -> &SimulationParams {
        &self.params
    }

    pub fn school(&self, species: SpeciesId) -> &School {
        &self.schools[species.index()]
    }

    // Number of ticks that actually advanced the simulation
    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn is_paused(&self) -> bool {
        self.params.pause_simulation
    }

    // Advance the simulation by one tick
    pub fn step(&mut self) {
        if self.params.pause_simulation {
            return;
        }

        let enabled = self.params.enabled_species();
        for &species in enabled {
            self.move_school(species);
        }
        for &species in enabled {
            self.sense_school(species);
        }

        self.tick += 1;
        trace!(tick = self.tick, "Stepped simulation");
    }

    // Turn, swim and apply the walls for every active fish of one species
    fn move_school(&mut self, species: SpeciesId) {
        let max_turn = self.params.species(species).turning_radians();
        let half_extent = self.params.box_edge_size;
        let wall_mode = self.params.wall_mode;
        let rng = &mut self.rng;

        for fish in self.schools[species.index()].fish_mut() {
            fish.swim(max_turn, half_extent, wall_mode, rng);
        }
    }

    // Decide the next heading of every active fish of one species
    fn sense_school(&mut self, species: SpeciesId) {
        let blind_segment = zones::blind_radian_segment(self.params.blind_angle);
        let species_params = *self.params.species(species);
        // Enabled species are always a prefix of SpeciesId::ALL
        let scanned = self.params.enabled_species().len();
        let hoods = SpeciesId::ALL.map(|target| {
            Neighborhood::new(
                self.schools[target.index()].fish(),
                species_params.ranges_toward(target),
                None,
            )
        });

        let scanners = self.schools[species.index()].fish();
        let sense_one = |(i, fish): (usize, &Fish)| {
            // The scanning fish never sees itself
            let mut hoods = hoods;
            hoods[species.index()].skip = Some(i);
            zones::sense(fish, &hoods[..scanned], blind_segment)
        };

        let headings: Vec<Vec3> = if self.params.enable_parallel {
            scanners.par_iter().enumerate().map(sense_one).collect()
        } else {
            scanners.iter().enumerate().map(sense_one).collect()
        };

        for (fish, heading) in self.schools[species.index()]
            .fish_mut()
            .iter_mut()
            .zip(headings)
        {
            fish.set_next_direction(heading);
        }
    }

    // Re-randomize every fish of both pools
    pub fn reset(&mut self) {
        let half_extent = self.params.box_edge_size;
        for school in self.schools.iter_mut() {
            school.randomize(half_extent, &mut self.rng);
        }
        info!(tick = self.tick, "Reset fish school");
    }

    // Change the active count of one species. Returns the count applied.
    pub fn set_count(&mut self, species: SpeciesId, count: usize) -> usize {
        let applied = self.schools[species.index()].set_active(count);
        self.params.species_mut(species).count = applied;
        debug!(%species, count = applied, "Changed fish count");
        applied
    }

    pub fn set_ranges(&mut self, species: SpeciesId, target: SpeciesId, ranges: ZoneRanges) {
        let sanitize = |v: f32| if v.is_finite() { v.max(0.0) } else { 0.0 };
        let ranges = ZoneRanges::new(
            sanitize(ranges.repulsion),
            sanitize(ranges.orientation),
            sanitize(ranges.attraction),
        );
        self.params.species_mut(species).ranges[target.index()] = ranges;
        debug!(%species, %target, ?ranges, "Changed zone ranges");
    }

    pub fn set_turning_angle(&mut self, species: SpeciesId, degrees: f32) {
        if degrees.is_nan() {
            return;
        }
        let degrees = degrees.clamp(f32::EPSILON, 180.0);
        self.params.species_mut(species).turning_angle = degrees;
        debug!(%species, degrees, "Changed turning angle");
    }

    pub fn set_blind_angle(&mut self, degrees: f32) {
        if degrees.is_nan() {
            return;
        }
        self.params.blind_angle = degrees.clamp(0.0, 360.0);
        debug!(degrees = self.params.blind_angle, "Changed blind angle");
    }

    pub fn set_wall_mode(&mut self, wall_mode: WallMode) {
        self.params.wall_mode = wall_mode;
        debug!(?wall_mode, "Changed wall mode");
    }

    pub fn set_two_species(&mut self, enabled: bool) {
        self.params.two_species = enabled;
        debug!(enabled, "Toggled second species");
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.params.pause_simulation = paused;
    }

    // Fish left outside a smaller box are pulled back by the next move
    pub fn set_half_extent(&mut self, half_extent: f32) {
        if half_extent.is_finite() && half_extent > 0.0 {
            self.params.box_edge_size = half_extent;
            debug!(half_extent, "Changed box size");
        }
    }

    pub fn set_parallel(&mut self, enabled: bool) {
        self.params.enable_parallel = enabled;
    }

    // Replace all parameters at once
    pub fn apply_params(&mut self, params: SimulationParams) -> Result<(), SimulationError> {
        params.validate()?;
        for species in SpeciesId::ALL {
            self.schools[species.index()].set_active(params.species(species).count);
        }
        if params != self.params {
            debug!("Applied new simulation parameters");
        }
        self.params = params;
        Ok(())
    }

    // Put one active fish at a given position and heading, with no pending turn
    pub fn place_fish(
        &mut self,
        species: SpeciesId,
        index: usize,
        position: Vec3,
        direction: Vec3,
    ) -> Result<(), SimulationError> {
        let half_extent = self.params.box_edge_size;
        if !position.is_finite() || position.abs().max_element() > half_extent {
            return Err(SimulationError::OutsideDomain {
                position: [position.x, position.y, position.z],
                half_extent,
            });
        }
        if crate::vector::try_normalize(direction).is_none() {
            return Err(SimulationError::InvalidHeading);
        }
        let school = &mut self.schools[species.index()];
        let active = school.active();
        let fish = school
            .get_mut(index)
            .ok_or(SimulationError::FishOutOfRange {
                species,
                index,
                active,
            })?;
        *fish = Fish::new(position, direction);
        Ok(())
    }
}
