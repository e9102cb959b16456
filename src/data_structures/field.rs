//! Procedural grid layout.
//!
//! Walks the lattice `[-grid_size, grid_size)²` and turns every surviving cell
//! into an [`AnimatedObject`]. Randomness is always injected so that a seeded
//! generator reproduces the same field.

use cgmath::Vector3;
use rand::{Rng, distr::uniform::SampleUniform};
use serde::{Deserialize, Serialize};

use crate::{config::FieldConfig, data_structures::animated::AnimatedObject};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GridCell {
    pub x: i32,
    pub z: i32,
}

impl GridCell {
    pub fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// Checkerboard parity, `(|x| + |z|) mod 2`.
    pub fn parity(&self) -> u32 {
        (self.x.unsigned_abs() + self.z.unsigned_abs()) % 2
    }

    /// Material a cell gets when it isn't picked as an accent.
    pub fn checker(&self) -> MaterialClass {
        if self.parity() == 0 {
            MaterialClass::Primary
        } else {
            MaterialClass::Secondary
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaterialClass {
    Primary,
    Secondary,
    Accent,
}

impl MaterialClass {
    pub const ALL: [MaterialClass; 3] = [
        MaterialClass::Primary,
        MaterialClass::Secondary,
        MaterialClass::Accent,
    ];

    pub fn index(self) -> usize {
        match self {
            MaterialClass::Primary => 0,
            MaterialClass::Secondary => 1,
            MaterialClass::Accent => 2,
        }
    }
}

/// All lattice cells in x-major order. Empty for `grid_size <= 0`.
pub fn cells(grid_size: i32) -> impl Iterator<Item = GridCell> {
    let bound = grid_size.max(0);
    (-bound..bound).flat_map(move |x| (-bound..bound).map(move |z| GridCell::new(x, z)))
}

/// Number of lattice cells for `grid_size`, before skipping.
pub fn cell_count(grid_size: i32) -> u64 {
    (2 * grid_size.max(0) as u64).pow(2)
}

/// World position of a cell before any animation.
pub fn base_position(cell: GridCell, config: &FieldConfig) -> Vector3<f32> {
    let (x, z) = (cell.x as f32, cell.z as f32);
    let wave = (x * config.wave_frequency + z * config.wave_frequency).sin();
    Vector3::new(
        x * config.spacing,
        wave * config.wave_amplitude,
        z * config.spacing - config.depth_bias,
    )
}

/// Uniform draw from `[low, high)`. An empty or inverted range yields `low` and draws nothing.
pub fn uniform<T, R>(rng: &mut R, low: T, high: T) -> T
where
    T: SampleUniform + PartialOrd + Copy,
    R: Rng + ?Sized,
{
    if low < high {
        rng.random_range(low..high)
    } else {
        low
    }
}

/// Generates the field.
///
/// Per cell the generator draws, in order: the skip roll, then (only for kept
/// cells) the accent roll, the phase offset and the speed.
pub fn generate<R: Rng + ?Sized>(config: &FieldConfig, rng: &mut R) -> Vec<AnimatedObject> {
    if config.grid_size <= 0 {
        return Vec::new();
    }
    let mut objects = Vec::new();
    for cell in cells(config.grid_size) {
        if rng.random::<f64>() < config.skip_probability {
            continue;
        }
        let material = if rng.random::<f64>() < config.accent_probability {
            MaterialClass::Accent
        } else {
            cell.checker()
        };
        let (phase, speed) = (config.phase(), config.speed());
        let phase_offset = uniform(rng, phase.start, phase.end);
        let speed = uniform(rng, speed.start, speed.end);
        objects.push(AnimatedObject::new(
            cell,
            base_position(cell, config),
            phase_offset,
            speed,
            material,
        ));
    }
    log::debug!(
        "generated {} of {} cells",
        objects.len(),
        cell_count(config.grid_size)
    );
    objects
}
