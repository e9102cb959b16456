//! The abstract king: a faceted piece that turns slowly, sways, leans towards
//! the pointer and carries a halo of orbiting fragments.
//!
//! All piece formulas take time in seconds.

use std::{f32::consts::FRAC_PI_2, f64::consts::TAU};

use cgmath::Deg;
use rand::Rng;

use crate::{
    camera::Camera,
    clock::FrameTime,
    config::{HaloConfig, PieceConfig},
    context::{Context, Viewport},
    data_structures::{
        animated::FragmentObject,
        field,
        instance::{EulerXyz, Instance},
        light::Light,
        mesh::{Colour, Material, Mesh, Primitive},
        scene_graph::{ContainerNode, MeshNode, SceneNode},
    },
    flow::{PointerSample, SceneFlow},
    render::Render,
};

/// Everything about the piece that changes between frames.
#[derive(Clone, Debug, PartialEq)]
pub struct PieceState {
    /// Accumulated rotation around y.
    pub yaw: f64,
    /// Pointer lean as `(x, z)` targets; replaced on every pointer sample.
    /// Only the z lean is applied: the sway owns rotation on x.
    pub tilt: (f32, f32),
    pub fragments: Vec<FragmentObject>,
}

impl PieceState {
    pub fn new<R: Rng + ?Sized>(halo: &HaloConfig, rng: &mut R) -> Self {
        let [low, high] = halo.vertical_offset_range;
        let fragments = (0..halo.count)
            .map(|index| {
                FragmentObject::new(
                    index,
                    halo.count,
                    halo.angular_speed as f64,
                    field::uniform(rng, low, high),
                )
            })
            .collect();
        Self {
            yaw: 0.0,
            tilt: (0.0, 0.0),
            fragments,
        }
    }

    /// The state after `time.delta` has passed.
    pub fn advanced(&self, time: &FrameTime, config: &PieceConfig) -> Self {
        let frames = time.frames() as f64;
        Self {
            yaw: self.yaw + config.spin_per_frame as f64 * frames,
            tilt: self.tilt,
            fragments: self
                .fragments
                .iter()
                .map(|fragment| fragment.advanced(frames, config.halo.spin_per_frame as f64))
                .collect(),
        }
    }

    /// The state leaning towards a pointer at `ndc`.
    pub fn leaning(&self, (x, y): (f32, f32), tilt_max: f32) -> Self {
        Self {
            tilt: (y * tilt_max, -x * tilt_max),
            ..self.clone()
        }
    }

    /// Orientation of the whole piece at `t` seconds: sway on x, spin on y, lean on z.
    pub fn group_rotation(&self, t: f64, config: &PieceConfig) -> EulerXyz {
        let sway = t.sin() as f32 * config.swing_amplitude;
        // wrapped before narrowing; f32 can't resolve a per-frame step on a large angle
        EulerXyz::new(sway, self.yaw.rem_euclid(TAU) as f32, self.tilt.1)
    }
}

pub struct PieceScene {
    config: PieceConfig,
    state: PieceState,
    group: ContainerNode,
    halo: MeshNode,
    last_secs: f64,
}

impl PieceScene {
    pub fn new<R: Rng + ?Sized>(config: PieceConfig, rng: &mut R) -> Self {
        let state = PieceState::new(&config.halo, rng);
        let mut group = ContainerNode::new(1);
        for (mesh, placement) in body() {
            group.add_child(Box::new(MeshNode::from_instances(mesh, vec![placement])));
        }
        let fragment = Mesh::new(
            5,
            "halo_fragment",
            Primitive::cube(config.halo.size),
            Material::basic(Colour::OXBLOOD),
        );
        let halo = MeshNode::new(fragment, config.halo.count);
        let mut scene = Self {
            config,
            state,
            group,
            halo,
            last_secs: 0.0,
        };
        scene.place(0.0);
        scene
    }

    pub fn state(&self) -> &PieceState {
        &self.state
    }

    pub fn group_transform(&self) -> Option<Instance> {
        self.group.get_local_transform(0)
    }

    /// World transforms of the halo fragments, in fragment order.
    pub fn fragment_transforms(&self) -> Vec<Instance> {
        self.halo.get_world_transforms()
    }

    /// Rebuilds every transform from the current state at `t` seconds.
    fn place(&mut self, t: f64) {
        let rotation = self.state.group_rotation(t, &self.config);
        let group = Instance::new().with_rotation(rotation);
        self.group.set_local_transform(0, group.clone());
        self.group.update_world_transform_all();

        let halo = &self.config.halo;
        let fragments = &self.state.fragments;
        self.halo.set_local_transform_all(&mut |idx, local| {
            if let Some(fragment) = fragments.get(idx) {
                let spin = fragment.spin.rem_euclid(TAU) as f32;
                *local = Instance::from(fragment.position_at(t, halo))
                    .with_rotation(EulerXyz::new(spin, spin, 0.0));
            }
        });
        let parents = vec![group; self.halo.instance_count()];
        self.halo
            .update_world_transforms(0..parents.len(), &parents);

        self.group.write_to_buffers();
        self.halo.write_to_buffers();
    }
}

/// Base, body, neck ring, top and crossbar, with their placement inside the group.
fn body() -> Vec<(Mesh, Instance)> {
    let dark = |roughness: f32, metalness: f32| {
        Material::standard(Colour::INK)
            .with_roughness(roughness)
            .with_metalness(metalness)
    };
    vec![
        (
            Mesh::new(
                0,
                "base",
                Primitive::Cylinder {
                    radius_top: 2.0,
                    radius_bottom: 2.5,
                    height: 1.0,
                    radial_segments: 32,
                },
                dark(0.3, 0.8),
            ),
            Instance::at(0.0, -3.0, 0.0),
        ),
        (
            Mesh::new(
                1,
                "body",
                Primitive::Cone {
                    radius: 1.5,
                    height: 6.0,
                    radial_segments: 8,
                },
                dark(0.2, 0.9).flat(),
            ),
            Instance::at(0.0, 0.5, 0.0),
        ),
        (
            Mesh::new(
                2,
                "neck",
                Primitive::Torus {
                    radius: 1.0,
                    tube: 0.3,
                    radial_segments: 16,
                    tubular_segments: 100,
                },
                Material::standard(Colour::OXBLOOD).with_emissive(Colour(0x330000)),
            ),
            Instance::at(0.0, 3.0, 0.0).with_rotation(EulerXyz::new(FRAC_PI_2, 0.0, 0.0)),
        ),
        (
            Mesh::new(
                3,
                "top",
                Primitive::Box {
                    width: 0.5,
                    height: 1.5,
                    depth: 0.5,
                },
                dark(1.0, 1.0),
            ),
            Instance::at(0.0, 4.5, 0.0),
        ),
        (
            Mesh::new(
                4,
                "crossbar",
                Primitive::Box {
                    width: 1.2,
                    height: 0.4,
                    depth: 0.4,
                },
                dark(1.0, 1.0),
            ),
            Instance::at(0.0, 4.5, 0.0),
        ),
    ]
}

impl SceneFlow for PieceScene {
    fn on_init(&mut self, ctx: &mut Context) {
        ctx.camera = Camera::new((0.0f32, 0.0, self.config.camera_distance), (0.0, 0.0, 0.0));
        ctx.set_lens(Deg(self.config.fov_degrees), self.config.znear, self.config.zfar);
        ctx.fog = None;
        ctx.lights = vec![
            Light::Ambient {
                colour: Colour::WHITE,
                intensity: 0.5,
            },
            Light::Point {
                colour: Colour::WHITE,
                intensity: 1.0,
                position: [10.0, 10.0, 10.0],
                distance: 0.0,
            },
            Light::Point {
                colour: Colour::OXBLOOD,
                intensity: 2.0,
                position: [-5.0, 0.0, 5.0],
                distance: 20.0,
            },
        ];
    }

    fn on_update(&mut self, _: &mut Context, time: &FrameTime) {
        self.state = self.state.advanced(time, &self.config);
        self.last_secs = time.secs();
        self.place(self.last_secs);
    }

    fn on_pointer_move(&mut self, _: &mut Context, pointer: &PointerSample) {
        if let Some(ndc) = pointer.ndc() {
            self.state = self.state.leaning(ndc, self.config.tilt_max);
            self.place(self.last_secs);
        }
    }

    fn on_resize(&mut self, _: &mut Context, _: &Viewport) {}

    fn meshes(&self) -> Vec<&Mesh> {
        let mut meshes = self.group.meshes();
        meshes.push(self.halo.mesh());
        meshes
    }

    fn on_render(&self) -> Render<'_> {
        let mut batches = self.group.get_render();
        batches.extend(self.halo.get_render());
        Render::by_material(batches)
    }
}
