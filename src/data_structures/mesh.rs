//! Mesh descriptions: which primitive to build and how to shade it.
//!
//! The engine never touches vertex data. A [`Mesh`] only names a parametric
//! primitive plus a material, and the host renderer turns that into geometry
//! once at mount time (see [`Mesh`]'s `Serialize` impl).

use serde::{Deserialize, Serialize};

/// Packed `0xRRGGBB` colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Colour(pub u32);

impl Colour {
    pub const WHITE: Colour = Colour(0xffffff);
    pub const INK: Colour = Colour(0x111111);
    pub const OXBLOOD: Colour = Colour(0x8b0000);

    /// Linear `[r, g, b]` in `0.0..=1.0`.
    pub fn rgb(self) -> [f32; 3] {
        let channel = |shift: u32| ((self.0 >> shift) & 0xff) as f32 / 255.0;
        [channel(16), channel(8), channel(0)]
    }
}

/// Parametric primitives. Field names follow the usual radius/height/segment conventions.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Primitive {
    Box {
        width: f32,
        height: f32,
        depth: f32,
    },
    Cylinder {
        radius_top: f32,
        radius_bottom: f32,
        height: f32,
        radial_segments: u32,
    },
    Cone {
        radius: f32,
        height: f32,
        radial_segments: u32,
    },
    Torus {
        radius: f32,
        tube: f32,
        radial_segments: u32,
        tubular_segments: u32,
    },
}

impl Primitive {
    pub fn cube(size: f32) -> Self {
        Primitive::Box {
            width: size,
            height: size,
            depth: size,
        }
    }
}

/// Shading model the host should use.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Shading {
    /// Unlit, flat colour.
    Basic,
    /// Physically based: reacts to the scene's lights.
    Standard,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub shading: Shading,
    pub colour: Colour,
    pub opacity: f32,
    pub roughness: f32,
    pub metalness: f32,
    pub emissive: Colour,
    pub flat_shading: bool,
}

impl Material {
    pub fn basic(colour: Colour) -> Self {
        Self {
            shading: Shading::Basic,
            colour,
            opacity: 1.0,
            roughness: 1.0,
            metalness: 0.0,
            emissive: Colour(0),
            flat_shading: false,
        }
    }

    pub fn standard(colour: Colour) -> Self {
        Self {
            shading: Shading::Standard,
            ..Self::basic(colour)
        }
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn with_roughness(mut self, roughness: f32) -> Self {
        self.roughness = roughness;
        self
    }

    pub fn with_metalness(mut self, metalness: f32) -> Self {
        self.metalness = metalness;
        self
    }

    pub fn with_emissive(mut self, emissive: Colour) -> Self {
        self.emissive = emissive;
        self
    }

    pub fn flat(mut self) -> Self {
        self.flat_shading = true;
        self
    }

    pub fn is_transparent(&self) -> bool {
        self.opacity < 1.0
    }
}

/// A primitive paired with its material, identified by `id` within its scene.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Mesh {
    pub id: u32,
    pub name: String,
    pub primitive: Primitive,
    pub material: Material,
}

impl Mesh {
    pub fn new(id: u32, name: &str, primitive: Primitive, material: Material) -> Self {
        Self {
            id,
            name: name.to_string(),
            primitive,
            material,
        }
    }
}
