//! Per-scene context and the host boundary.
//!
//! Each mounted scene owns exactly one [`Context`]: its camera, projection,
//! lights, viewport and render surface. Nothing in here is shared between
//! scenes. The [`Host`] trait is everything the engine needs from the
//! embedding environment.

use cgmath::Deg;

use crate::{
    camera::{Camera, CameraUniform, Projection},
    data_structures::{
        light::{Fog, Light},
        mesh::Mesh,
    },
    error::HostError,
    render::{Frame, Render, RenderSurface},
};

/// Drawing buffer dimensions in CSS pixels plus the device pixel ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
    pub pixel_ratio: f64,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixel_ratio: 1.0,
        }
    }

    pub fn with_pixel_ratio(mut self, pixel_ratio: f64) -> Self {
        self.pixel_ratio = pixel_ratio;
        self
    }

    /// Zero-sized viewports (collapsed or hidden containers) are never applied.
    pub fn is_drawable(&self) -> bool {
        self.width > 0 && self.height > 0
    }

    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }
}

/// What a scene asks of its drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceOptions {
    /// Transparent background so the page shows through.
    pub alpha: bool,
    pub antialias: bool,
}

impl Default for SurfaceOptions {
    fn default() -> Self {
        Self {
            alpha: true,
            antialias: true,
        }
    }
}

/// Where a scene takes its viewport size from on resize.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sizing {
    Window,
    Container,
}

/// The embedding environment.
pub trait Host {
    fn window_viewport(&self) -> Viewport;

    /// `None` if no element with this id exists.
    fn container_viewport(&self, container: &str) -> Option<Viewport>;

    /// Attach a rendering surface to `container`, prepared for `meshes`.
    fn create_surface(
        &self,
        container: &str,
        options: SurfaceOptions,
        meshes: &[&Mesh],
    ) -> Result<Box<dyn RenderSurface>, HostError>;
}

pub struct Context {
    pub camera: Camera,
    pub projection: Projection,
    pub lights: Vec<Light>,
    pub fog: Option<Fog>,
    viewport: Viewport,
    is_surface_configured: bool,
    surface: Box<dyn RenderSurface>,
}

impl Context {
    pub fn new(surface: Box<dyn RenderSurface>, viewport: Viewport) -> Self {
        let camera = Camera::new((0.0f32, 0.0, 10.0), (0.0, 0.0, 0.0));
        let projection = Projection::new(viewport.width, viewport.height, Deg(45.0), 0.1, 1000.0);
        let mut ctx = Self {
            camera,
            projection,
            lights: Vec::new(),
            fog: None,
            viewport,
            is_surface_configured: false,
            surface,
        };
        ctx.configure(viewport);
        ctx
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn is_surface_configured(&self) -> bool {
        self.is_surface_configured
    }

    /// Applies a new viewport. Returns `false` if nothing changed.
    pub fn resize(&mut self, viewport: Viewport) -> bool {
        if !viewport.is_drawable() {
            return false;
        }
        if self.is_surface_configured && viewport == self.viewport {
            return false;
        }
        self.configure(viewport);
        true
    }

    fn configure(&mut self, viewport: Viewport) {
        if !viewport.is_drawable() {
            log::debug!(
                "deferring surface configuration for a {}x{} viewport",
                viewport.width,
                viewport.height
            );
            return;
        }
        self.viewport = viewport;
        self.projection.resize(viewport.width, viewport.height);
        self.surface.resize(&viewport);
        self.is_surface_configured = true;
    }

    /// Replaces the projection's field of view and clip planes, keeping the current aspect.
    pub fn set_lens<F: Into<cgmath::Rad<f32>>>(&mut self, fovy: F, znear: f32, zfar: f32) {
        self.projection = Projection::new(
            self.viewport.width,
            self.viewport.height,
            fovy,
            znear,
            zfar,
        );
    }

    /// Hands `render` to the surface together with camera, lights and fog.
    pub fn present(&mut self, render: Render<'_>) -> anyhow::Result<()> {
        // Rendering requires the surface to be configured
        if !self.is_surface_configured {
            return Ok(());
        }
        let mut opaque = Vec::new();
        let mut transparent = Vec::new();
        render.collect(&mut opaque, &mut transparent);
        let frame = Frame {
            camera: CameraUniform::from_camera(&self.camera, &self.projection),
            lights: &self.lights,
            fog: self.fog,
            opaque,
            transparent,
        };
        self.surface.present(&frame)
    }
}
