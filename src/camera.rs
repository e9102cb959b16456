//! Camera and projection.
//!
//! The camera is a position plus a look-at target; the projection carries the
//! viewport-dependent parameters. Both are folded into a [`CameraUniform`]
//! each frame. Matrices follow OpenGL clip-space conventions because the
//! host renderer on the web is WebGL.

use cgmath::{Matrix4, Point3, Rad, SquareMatrix, Vector3};

#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub position: Point3<f32>,
    pub target: Point3<f32>,
    pub up: Vector3<f32>,
}

impl Camera {
    pub fn new<P: Into<Point3<f32>>>(position: P, target: P) -> Self {
        Self {
            position: position.into(),
            target: target.into(),
            up: Vector3::unit_y(),
        }
    }

    /// A camera looking down -z, tilted by `pitch` around the x axis.
    pub fn with_pitch<P: Into<Point3<f32>>, A: Into<Rad<f32>>>(position: P, pitch: A) -> Self {
        let position = position.into();
        let Rad(pitch) = pitch.into();
        let forward = Vector3::new(0.0, pitch.sin(), -pitch.cos());
        Self {
            position,
            target: position + forward,
            up: Vector3::unit_y(),
        }
    }

    pub fn look_at<P: Into<Point3<f32>>>(&mut self, target: P) {
        self.target = target.into();
    }

    pub fn calc_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(self.position, self.target, self.up)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Projection {
    aspect: f32,
    fovy: Rad<f32>,
    znear: f32,
    zfar: f32,
}

impl Projection {
    pub fn new<F: Into<Rad<f32>>>(width: u32, height: u32, fovy: F, znear: f32, zfar: f32) -> Self {
        Self {
            aspect: width as f32 / height.max(1) as f32,
            fovy: fovy.into(),
            znear,
            zfar,
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.aspect = width as f32 / height.max(1) as f32;
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    pub fn fovy(&self) -> Rad<f32> {
        self.fovy
    }

    pub fn calc_matrix(&self) -> Matrix4<f32> {
        cgmath::perspective(self.fovy, self.aspect, self.znear, self.zfar)
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    pub view_position: [f32; 4],
    pub view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
}

impl CameraUniform {
    pub fn new() -> Self {
        Self {
            view_position: [0.0; 4],
            view: Matrix4::identity().into(),
            projection: Matrix4::identity().into(),
        }
    }

    pub fn update_view_proj(&mut self, camera: &Camera, projection: &Projection) {
        self.view_position = camera.position.to_homogeneous().into();
        self.view = camera.calc_matrix().into();
        self.projection = projection.calc_matrix().into();
    }

    pub fn from_camera(camera: &Camera, projection: &Projection) -> Self {
        let mut uniform = Self::new();
        uniform.update_view_proj(camera, projection);
        uniform
    }
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self::new()
    }
}
