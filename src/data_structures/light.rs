use serde::{Deserialize, Serialize};

use crate::data_structures::mesh::Colour;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Light {
    Ambient {
        colour: Colour,
        intensity: f32,
    },
    Point {
        colour: Colour,
        intensity: f32,
        position: [f32; 3],
        // 0.0 means unlimited range
        distance: f32,
    },
}

impl Light {
    pub fn to_uniform(&self) -> LightUniform {
        match self {
            Light::Ambient { colour, intensity } => LightUniform {
                position: [0.0; 3],
                kind: 0,
                colour: colour.rgb(),
                intensity: *intensity,
                distance: 0.0,
                _padding: [0; 3],
            },
            Light::Point {
                colour,
                intensity,
                position,
                distance,
            } => LightUniform {
                position: *position,
                kind: 1,
                colour: colour.rgb(),
                intensity: *intensity,
                distance: *distance,
                _padding: [0; 3],
            },
        }
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightUniform {
    pub position: [f32; 3],
    // 0 = ambient, 1 = point
    pub kind: u32,
    pub colour: [f32; 3],
    pub intensity: f32,
    pub distance: f32,
    // Uniforms require 16 byte spacing
    _padding: [u32; 3],
}

/// Exponential squared fog.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Fog {
    pub colour: Colour,
    pub density: f32,
}
