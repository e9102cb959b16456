//! Animated elements and their frozen per-object parameters.

use cgmath::Vector3;

use crate::{config::HaloConfig, data_structures::field::{GridCell, MaterialClass}};

/// A grid element that bobs vertically around its base height.
///
/// Everything except the derived height is fixed at creation.
#[derive(Clone, Debug, PartialEq)]
pub struct AnimatedObject {
    cell: GridCell,
    base_position: Vector3<f32>,
    phase_offset: f64,
    speed: f64,
    material: MaterialClass,
}

impl AnimatedObject {
    pub fn new(
        cell: GridCell,
        base_position: Vector3<f32>,
        phase_offset: f64,
        speed: f64,
        material: MaterialClass,
    ) -> Self {
        Self {
            cell,
            base_position,
            phase_offset,
            speed,
            material,
        }
    }

    pub fn cell(&self) -> GridCell {
        self.cell
    }

    pub fn base_position(&self) -> Vector3<f32> {
        self.base_position
    }

    pub fn phase_offset(&self) -> f64 {
        self.phase_offset
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn material(&self) -> MaterialClass {
        self.material
    }

    /// Height at time `t` (in the same unit `speed` was tuned for).
    pub fn height_at(&self, t: f64, bob_amplitude: f32) -> f32 {
        let wave = (t * self.speed + self.phase_offset).sin() as f32;
        self.base_position.y + wave * bob_amplitude
    }

    pub fn position_at(&self, t: f64, bob_amplitude: f32) -> Vector3<f32> {
        Vector3::new(
            self.base_position.x,
            self.height_at(t, bob_amplitude),
            self.base_position.z,
        )
    }
}

/// A halo piece orbiting the crown of the piece scene.
#[derive(Clone, Debug, PartialEq)]
pub struct FragmentObject {
    /// Ordinal among the halo fragments; staggers the orbit phases.
    pub index: usize,
    /// Accumulated orbit angle. Never wrapped so it stays monotonic.
    pub angle: f64,
    pub angular_speed: f64,
    /// Drawn once at creation.
    pub vertical_offset: f32,
    /// Accumulated self-rotation on x and y.
    pub spin: f64,
}

impl FragmentObject {
    /// Fragments start evenly spaced on the circle.
    pub fn new(index: usize, count: usize, angular_speed: f64, vertical_offset: f32) -> Self {
        let angle = std::f64::consts::TAU / count.max(1) as f64 * index as f64;
        Self {
            index,
            angle,
            angular_speed,
            vertical_offset,
            spin: 0.0,
        }
    }

    /// The fragment after `frames` reference frames have passed.
    pub fn advanced(&self, frames: f64, spin_per_frame: f64) -> Self {
        Self {
            angle: self.angle + self.angular_speed * frames,
            spin: self.spin + spin_per_frame * frames,
            ..self.clone()
        }
    }

    /// Orbit radius at time `t` seconds.
    pub fn radius_at(&self, t: f64, halo: &HaloConfig) -> f32 {
        let phase = (2.0 * t + self.index as f64).sin() as f32;
        halo.base_radius + phase * halo.radius_amplitude
    }

    /// Position in the group's space at time `t` seconds.
    pub fn position_at(&self, t: f64, halo: &HaloConfig) -> Vector3<f32> {
        let radius = self.radius_at(t, halo);
        let bob = (t + self.index as f64).sin() as f32;
        Vector3::new(
            self.angle.cos() as f32 * radius,
            halo.height + bob * halo.bob_amplitude,
            self.angle.sin() as f32 * radius,
        )
    }
}
