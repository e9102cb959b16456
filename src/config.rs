//! Tuning knobs for both scenes.
//!
//! Defaults give the stock look of both scenes. Hosts may override any
//! subset through JSON, e.g. `{"seed": 7, "board": {"field": {"grid_size": 10}}}`.

use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::{
    data_structures::{light::Fog, mesh::Colour},
    error::ConfigError,
};

/// Layout of the procedural grid. See [`crate::data_structures::field`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    /// Cells span `[-grid_size, grid_size)` on both axes.
    pub grid_size: i32,
    pub spacing: f32,
    /// Chance that a cell is left out entirely.
    pub skip_probability: f64,
    /// Chance that a surviving cell uses the accent material.
    pub accent_probability: f64,
    /// Subtracted from every world z.
    pub depth_bias: f32,
    pub wave_frequency: f32,
    pub wave_amplitude: f32,
    pub phase_range: [f64; 2],
    pub speed_range: [f64; 2],
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            grid_size: 20,
            spacing: 4.0,
            skip_probability: 0.3,
            accent_probability: 0.01,
            depth_bias: 50.0,
            wave_frequency: 0.5,
            wave_amplitude: 2.0,
            phase_range: [0.0, 100.0],
            speed_range: [0.001, 0.003],
        }
    }
}

impl FieldConfig {
    pub fn phase(&self) -> Range<f64> {
        self.phase_range[0]..self.phase_range[1]
    }

    pub fn speed(&self) -> Range<f64> {
        self.speed_range[0]..self.speed_range[1]
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        probability("board.field.skip_probability", self.skip_probability)?;
        probability("board.field.accent_probability", self.accent_probability)?;
        if !(self.spacing > 0.0) {
            return Err(invalid("board.field.spacing", "must be positive"));
        }
        ordered("board.field.phase_range", self.phase_range)?;
        ordered("board.field.speed_range", self.speed_range)
    }
}

/// The hero background: a floating, fragmented checkerboard.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub container: String,
    pub field: FieldConfig,
    /// Box dimensions of a single tile.
    pub tile: [f32; 3],
    pub bob_amplitude: f32,
    /// Angular frequency of the camera sway, per millisecond.
    pub camera_drift: f64,
    pub camera_swing: f32,
    pub camera_position: [f32; 3],
    /// Initial pitch in radians, before the first look-at.
    pub camera_pitch: f32,
    pub look_at: [f32; 3],
    pub fov_degrees: f32,
    pub znear: f32,
    pub zfar: f32,
    pub fog: Option<Fog>,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            container: "canvas-container".to_string(),
            field: FieldConfig::default(),
            tile: [2.0, 0.5, 2.0],
            bob_amplitude: 5.0,
            camera_drift: 0.0001,
            camera_swing: 10.0,
            camera_position: [0.0, 20.0, 50.0],
            camera_pitch: -0.5,
            look_at: [0.0, 0.0, -50.0],
            fov_degrees: 75.0,
            znear: 0.1,
            zfar: 1000.0,
            fog: Some(Fog {
                colour: Colour(0xf9f9f7),
                density: 0.002,
            }),
        }
    }
}

/// Orbiting fragments around the piece's crown.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HaloConfig {
    pub count: usize,
    pub size: f32,
    /// Radians added to each fragment's angle per reference frame.
    pub angular_speed: f32,
    pub base_radius: f32,
    pub radius_amplitude: f32,
    pub height: f32,
    pub bob_amplitude: f32,
    /// Self-rotation on x and y per reference frame.
    pub spin_per_frame: f32,
    pub vertical_offset_range: [f32; 2],
}

impl Default for HaloConfig {
    fn default() -> Self {
        Self {
            count: 5,
            size: 0.3,
            angular_speed: 0.02,
            base_radius: 3.0,
            radius_amplitude: 0.5,
            height: 4.0,
            bob_amplitude: 0.5,
            spin_per_frame: 0.05,
            vertical_offset_range: [0.0, 2.0],
        }
    }
}

/// The abstract king piece with its halo.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PieceConfig {
    pub container: String,
    /// Radians added to the group's yaw per reference frame.
    pub spin_per_frame: f32,
    pub swing_amplitude: f32,
    /// Tilt at the viewport edges, in radians.
    pub tilt_max: f32,
    pub camera_distance: f32,
    pub fov_degrees: f32,
    pub znear: f32,
    pub zfar: f32,
    pub halo: HaloConfig,
}

impl Default for PieceConfig {
    fn default() -> Self {
        Self {
            container: "chess-piece-container".to_string(),
            spin_per_frame: 0.005,
            swing_amplitude: 0.1,
            tilt_max: 0.2,
            camera_distance: 15.0,
            fov_degrees: 50.0,
            znear: 0.1,
            zfar: 1000.0,
            halo: HaloConfig::default(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableauConfig {
    /// Seed for scene generation. `None` derives one from the clock.
    pub seed: Option<u64>,
    pub board: BoardConfig,
    pub piece: PieceConfig,
}

impl TableauConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: TableauConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.board.field.validate()?;
        if self.board.bob_amplitude < 0.0 {
            return Err(invalid("board.bob_amplitude", "must not be negative"));
        }
        ordered(
            "piece.halo.vertical_offset_range",
            self.piece.halo.vertical_offset_range.map(f64::from),
        )
    }
}

fn invalid(field: &'static str, reason: &str) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.to_string(),
    }
}

fn probability(field: &'static str, p: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&p) {
        Ok(())
    } else {
        Err(invalid(field, &format!("{} is not within [0, 1]", p)))
    }
}

fn ordered(field: &'static str, [start, end]: [f64; 2]) -> Result<(), ConfigError> {
    if start < end {
        Ok(())
    } else {
        Err(invalid(field, &format!("empty range {}..{}", start, end)))
    }
}
