//! The hero background: a fragmented checkerboard of tiles bobbing on a wave,
//! watched by a slowly swaying camera.
//!
//! Tiles are grouped into one instanced [`MeshNode`] per [`MaterialClass`].
//! All board formulas take time in milliseconds.

use cgmath::{Deg, Point3, Rad};
use rand::Rng;

use crate::{
    camera::Camera,
    clock::FrameTime,
    config::BoardConfig,
    context::{Context, Viewport},
    data_structures::{
        animated::AnimatedObject,
        field::{self, MaterialClass},
        instance::Instance,
        mesh::{Colour, Material, Mesh, Primitive},
        scene_graph::{MeshNode, SceneNode},
    },
    flow::{PointerSample, SceneFlow},
    render::Render,
};

pub struct BoardScene {
    config: BoardConfig,
    objects: Vec<AnimatedObject>,
    // index of each object's instance within its material's tile node
    slots: Vec<usize>,
    tiles: Vec<MeshNode>,
}

impl BoardScene {
    pub fn new<R: Rng + ?Sized>(config: BoardConfig, rng: &mut R) -> Self {
        let objects = field::generate(&config.field, rng);
        let mut per_class: [Vec<Instance>; 3] = Default::default();
        let slots = objects
            .iter()
            .map(|object| {
                let instances = &mut per_class[object.material().index()];
                instances.push(object.base_position().into());
                instances.len() - 1
            })
            .collect();
        let [width, height, depth] = config.tile;
        let tile = Primitive::Box {
            width,
            height,
            depth,
        };
        let tiles = MaterialClass::ALL
            .into_iter()
            .zip(per_class)
            .map(|(class, instances)| {
                let mesh = Mesh::new(class.index() as u32, tile_name(class), tile.clone(), tile_material(class));
                MeshNode::from_instances(mesh, instances)
            })
            .collect();
        Self {
            config,
            objects,
            slots,
            tiles,
        }
    }

    pub fn objects(&self) -> &[AnimatedObject] {
        &self.objects
    }

    pub fn tiles(&self, class: MaterialClass) -> &MeshNode {
        &self.tiles[class.index()]
    }

    /// Current local position of the `idx`th generated object.
    pub fn position_of(&self, idx: usize) -> Option<cgmath::Vector3<f32>> {
        let object = self.objects.get(idx)?;
        let slot = *self.slots.get(idx)?;
        self.tiles[object.material().index()]
            .get_local_transform(slot)
            .map(|instance| instance.position)
    }

    /// Camera x offset at `t` milliseconds.
    pub fn camera_sway(&self, t: f64) -> f32 {
        (t * self.config.camera_drift).sin() as f32 * self.config.camera_swing
    }

    fn animate(&mut self, t: f64) {
        let amplitude = self.config.bob_amplitude;
        for (object, &slot) in self.objects.iter().zip(self.slots.iter()) {
            let tiles = &mut self.tiles[object.material().index()];
            tiles.set_local_transform(slot, object.position_at(t, amplitude).into());
        }
        for tiles in self.tiles.iter_mut() {
            tiles.update_world_transform_all();
            tiles.write_to_buffers();
        }
    }
}

fn tile_name(class: MaterialClass) -> &'static str {
    match class {
        MaterialClass::Primary => "tile_light",
        MaterialClass::Secondary => "tile_dark",
        MaterialClass::Accent => "tile_accent",
    }
}

fn tile_material(class: MaterialClass) -> Material {
    match class {
        MaterialClass::Primary => Material::basic(Colour::WHITE).with_opacity(0.8),
        MaterialClass::Secondary => Material::basic(Colour::INK).with_opacity(0.1),
        MaterialClass::Accent => Material::basic(Colour::OXBLOOD).with_opacity(0.8),
    }
}

impl SceneFlow for BoardScene {
    fn on_init(&mut self, ctx: &mut Context) {
        let position: Point3<f32> = self.config.camera_position.into();
        ctx.camera = Camera::with_pitch(position, Rad(self.config.camera_pitch));
        ctx.set_lens(Deg(self.config.fov_degrees), self.config.znear, self.config.zfar);
        ctx.fog = self.config.fog;
        ctx.lights.clear();
        self.animate(0.0);
    }

    fn on_update(&mut self, ctx: &mut Context, time: &FrameTime) {
        let t = time.millis();
        self.animate(t);
        ctx.camera.position.x = self.camera_sway(t);
        ctx.camera.look_at(self.config.look_at);
    }

    fn on_pointer_move(&mut self, _: &mut Context, _: &PointerSample) {}

    fn on_resize(&mut self, _: &mut Context, _: &Viewport) {}

    fn meshes(&self) -> Vec<&Mesh> {
        self.tiles.iter().flat_map(|tiles| tiles.meshes()).collect()
    }

    fn on_render(&self) -> Render<'_> {
        let batches = self
            .tiles
            .iter()
            .filter(|tiles| tiles.instance_count() > 0)
            .flat_map(|tiles| tiles.get_render())
            .collect();
        Render::by_material(batches)
    }
}
