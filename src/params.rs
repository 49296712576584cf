/*
 * Simulation Parameters Module
 *
 * This module defines the SimulationParams struct that contains all the
 * adjustable parameters of the fish school: per-species counts, zone ranges
 * and turning angles, plus the shared domain settings (box size, blind angle,
 * wall mode). Parameters can be loaded from a TOML file, edited through the
 * UI or the keyboard, and are validated before the simulation adopts them.
 */

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::boundary::WallMode;
use crate::zones::ZoneRanges;

// Capacity of each species' pool
pub const MAX_FISH: usize = 1000;
// Bounds on the half-extent of the box
pub const MIN_BOX_EDGE: f32 = 25.0;
pub const MAX_BOX_EDGE: f32 = 50.0;

#[derive(Debug, Error)]
pub enum ParamsError {
    #[error("{name} must be finite and non-negative, got {value}")]
    NegativeRange { name: String, value: f32 },
    #[error("turning angle for {species} must be in (0, 180] degrees, got {value}")]
    InvalidTurningAngle { species: SpeciesId, value: f32 },
    #[error("blind angle must be in [0, 360] degrees, got {0}")]
    InvalidBlindAngle(f32),
    #[error("box edge size must be finite and positive, got {0}")]
    InvalidBoxEdge(f32),
    #[error("{species} count {count} exceeds pool capacity {capacity}")]
    CountOverCapacity {
        species: SpeciesId,
        count: usize,
        capacity: usize,
    },
    #[error("failed to read config file {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpeciesId {
    One,
    Two,
}

impl SpeciesId {
    pub const ALL: [SpeciesId; 2] = [SpeciesId::One, SpeciesId::Two];

    pub fn index(self) -> usize {
        match self {
            SpeciesId::One => 0,
            SpeciesId::Two => 1,
        }
    }

    pub fn number(self) -> usize {
        self.index() + 1
    }
}

impl fmt::Display for SpeciesId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "species {}", self.number())
    }
}

// Which zone radius a setting refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Zone {
    Repulsion,
    Orientation,
    Attraction,
}

impl Zone {
    pub fn abbreviation(self) -> &'static str {
        match self {
            Zone::Repulsion => "ZOR",
            Zone::Orientation => "ZOO",
            Zone::Attraction => "ZOA",
        }
    }
}

// Parameters of one species
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeciesParams {
    pub count: usize,
    // Degrees per tick
    pub turning_angle: f32,
    // Zone radii toward species one and species two
    pub ranges: [ZoneRanges; 2],
}

impl SpeciesParams {
    pub fn turning_radians(&self) -> f32 {
        self.turning_angle.to_radians()
    }

    pub fn ranges_toward(&self, target: SpeciesId) -> ZoneRanges {
        self.ranges[target.index()]
    }

    pub fn range_mut(&mut self, target: SpeciesId, zone: Zone) -> &mut f32 {
        let ranges = &mut self.ranges[target.index()];
        match zone {
            Zone::Repulsion => &mut ranges.repulsion,
            Zone::Orientation => &mut ranges.orientation,
            Zone::Attraction => &mut ranges.attraction,
        }
    }

    pub fn range(&self, target: SpeciesId, zone: Zone) -> f32 {
        let ranges = self.ranges[target.index()];
        match zone {
            Zone::Repulsion => ranges.repulsion,
            Zone::Orientation => ranges.orientation,
            Zone::Attraction => ranges.attraction,
        }
    }
}

impl Default for SpeciesParams {
    fn default() -> Self {
        Self {
            count: 100,
            turning_angle: 5.0,
            ranges: [ZoneRanges::new(2.0, 10.0, 20.0), ZoneRanges::new(2.0, 0.0, 0.0)],
        }
    }
}

// Parameters for the simulation that can be adjusted via UI, keyboard or config file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationParams {
    // Half the width of the cubic domain
    pub box_edge_size: f32,
    // Width of the rear cone in which neighbors are invisible, in degrees
    pub blind_angle: f32,
    pub wall_mode: WallMode,
    pub two_species: bool,
    pub pause_simulation: bool,
    // Run the sense pass on the rayon thread pool
    pub enable_parallel: bool,
    // Fixed seed for reproducible runs
    pub rng_seed: Option<u64>,
    pub species: [SpeciesParams; 2],
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            box_edge_size: MAX_BOX_EDGE,
            blind_angle: 90.0,
            wall_mode: WallMode::Hard,
            two_species: false,
            pause_simulation: false,
            enable_parallel: true,
            rng_seed: None,
            species: [
                SpeciesParams::default(),
                SpeciesParams {
                    ranges: [ZoneRanges::new(2.0, 0.0, 0.0), ZoneRanges::new(2.0, 10.0, 20.0)],
                    ..SpeciesParams::default()
                },
            ],
        }
    }
}

impl SimulationParams {
    pub fn from_toml_str(text: &str) -> Result<Self, ParamsError> {
        let params: Self = toml::from_str(text)?;
        params.validate()?;
        Ok(params)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ParamsError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ParamsError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn species(&self, species: SpeciesId) -> &SpeciesParams {
        &self.species[species.index()]
    }

    pub fn species_mut(&mut self, species: SpeciesId) -> &mut SpeciesParams {
        &mut self.species[species.index()]
    }

    // Species taking part in the simulation, in update order
    pub fn enabled_species(&self) -> &'static [SpeciesId] {
        if self.two_species {
            &SpeciesId::ALL
        } else {
            &SpeciesId::ALL[..1]
        }
    }

    pub fn validate(&self) -> Result<(), ParamsError> {
        if !(self.box_edge_size.is_finite() && self.box_edge_size > 0.0) {
            return Err(ParamsError::InvalidBoxEdge(self.box_edge_size));
        }
        if !(0.0..=360.0).contains(&self.blind_angle) {
            return Err(ParamsError::InvalidBlindAngle(self.blind_angle));
        }
        for species in SpeciesId::ALL {
            let p = self.species(species);
            if p.count > MAX_FISH {
                return Err(ParamsError::CountOverCapacity {
                    species,
                    count: p.count,
                    capacity: MAX_FISH,
                });
            }
            if !(p.turning_angle > 0.0 && p.turning_angle <= 180.0) {
                return Err(ParamsError::InvalidTurningAngle {
                    species,
                    value: p.turning_angle,
                });
            }
            for target in SpeciesId::ALL {
                for zone in [Zone::Repulsion, Zone::Orientation, Zone::Attraction] {
                    let value = p.range(target, zone);
                    if !(value.is_finite() && value >= 0.0) {
                        return Err(ParamsError::NegativeRange {
                            name: format!(
                                "{}({}-{})",
                                zone.abbreviation(),
                                species.number(),
                                target.number()
                            ),
                            value,
                        });
                    }
                }
            }
        }
        Ok(())
    }

    // Parameter ranges for UI sliders and keyboard steps
    pub fn get_count_range() -> std::ops::RangeInclusive<usize> {
        0..=MAX_FISH
    }

    pub fn get_turning_angle_range() -> std::ops::RangeInclusive<f32> {
        1.0..=10.0
    }

    pub fn get_box_edge_range() -> std::ops::RangeInclusive<f32> {
        MIN_BOX_EDGE..=MAX_BOX_EDGE
    }

    pub fn get_blind_angle_range() -> std::ops::RangeInclusive<f32> {
        0.0..=360.0
    }

    // Zone radii can span the whole box
    pub fn get_zone_range(&self) -> std::ops::RangeInclusive<f32> {
        0.0..=2.0 * self.box_edge_size
    }
}
