//! Render composition and submission.
//!
//! Scenes describe what to draw as a [`Render`] tree. The driver flattens it
//! into a [`Frame`] (opaque batches first, transparent batches after) and
//! hands the frame to the scene's [`RenderSurface`], which is implemented by
//! the host and owns every rasterization concern.
//!
//! # Key types
//!
//! - [`Instanced<'a>`] is one mesh plus the packed transforms of all its instances
//! - [`Render<'a>`] composes instanced batches
//! - [`Frame<'a>`] is everything a surface needs for one image
//! - [`RenderSurface`] is the host-side sink

use crate::{
    camera::CameraUniform,
    context::Viewport,
    data_structures::{
        instance::InstanceRaw,
        light::{Fog, Light},
        mesh::Mesh,
    },
};

/// Data for instanced object rendering: a mesh and the transforms to draw it with.
#[derive(Clone, Copy, Debug)]
pub struct Instanced<'a> {
    pub mesh: &'a Mesh,
    pub instances: &'a [InstanceRaw],
}

impl<'a> Instanced<'a> {
    pub fn amount(&self) -> usize {
        self.instances.len()
    }

    /// The transforms as a flat `f32` slice, 16 floats per instance.
    pub fn as_floats(&self) -> &'a [f32] {
        bytemuck::cast_slice(self.instances)
    }
}

/// Specifies how a scene's objects should be rendered.
///
/// # Variants
///
/// - `None` renders nothing
/// - `Default(Instanced)` renders a single opaque instanced object
/// - `Defaults(Vec<Instanced>)` renders a batch of opaque instanced objects
/// - `Transparent(Instanced)` renders a single transparent instanced object
/// - `Transparents(Vec<Instanced>)` renders a batch of transparent objects
/// - `Composed(Vec<Render>)` recursively renders composition of multiple renders
pub enum Render<'a> {
    None,
    Default(Instanced<'a>),
    Defaults(Vec<Instanced<'a>>),
    Transparent(Instanced<'a>),
    Transparents(Vec<Instanced<'a>>),
    Composed(Vec<Render<'a>>),
}

impl<'a> Render<'a> {
    /// Routes every batch by its material's opacity.
    pub fn by_material(batches: Vec<Instanced<'a>>) -> Self {
        let (transparent, opaque): (Vec<_>, Vec<_>) = batches
            .into_iter()
            .partition(|batch| batch.mesh.material.is_transparent());
        Render::Composed(vec![
            Render::Defaults(opaque),
            Render::Transparents(transparent),
        ])
    }

    /// Sorts this render tree into opaque and transparent queues.
    pub fn collect(self, opaque: &mut Vec<Instanced<'a>>, transparent: &mut Vec<Instanced<'a>>) {
        match self {
            Render::None => (),
            Render::Default(instanced) => opaque.push(instanced),
            Render::Defaults(mut instanced) => opaque.append(&mut instanced),
            Render::Transparent(instanced) => transparent.push(instanced),
            Render::Transparents(mut instanced) => transparent.append(&mut instanced),
            Render::Composed(renders) => renders
                .into_iter()
                .for_each(|render| render.collect(opaque, transparent)),
        }
    }
}

/// One image worth of scene data.
#[derive(Debug)]
pub struct Frame<'a> {
    pub camera: CameraUniform,
    pub lights: &'a [Light],
    pub fog: Option<Fog>,
    pub opaque: Vec<Instanced<'a>>,
    pub transparent: Vec<Instanced<'a>>,
}

impl<'a> Frame<'a> {
    pub fn batches(&self) -> impl Iterator<Item = &Instanced<'a>> {
        self.opaque.iter().chain(self.transparent.iter())
    }
}

/// A host-provided rendering surface.
///
/// Surfaces are only ever driven from the frame loop's thread.
pub trait RenderSurface {
    /// Match the drawing buffer to the viewport.
    fn resize(&mut self, viewport: &Viewport);

    /// Draw `frame`. Errors are logged by the driver; the next frame tries again.
    fn present(&mut self, frame: &Frame<'_>) -> anyhow::Result<()>;
}
