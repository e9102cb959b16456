//! Scene graph and hierarchical scene organization.
//!
//! Nodes hold a list of `(local, world)` transform pairs, one per instance.
//! Scenes mutate the local half; [`SceneNode::update_world_transforms`]
//! propagates parents into children, and [`SceneNode::write_to_buffers`] packs
//! the world half into [`InstanceRaw`]s that the render surface reads.

use std::ops::Range;

use log::warn;

use crate::{
    data_structures::{
        instance::{Instance, InstanceRaw},
        mesh::Mesh,
    },
    render::Instanced,
};

pub trait SceneNode {
    fn get_world_transforms(&self) -> Vec<Instance>;

    fn get_local_transform(&self, idx: usize) -> Option<Instance>;

    fn get_children(&self) -> &Vec<Box<dyn SceneNode>>;

    fn add_child(&mut self, child: Box<dyn SceneNode>);

    fn set_local_transform(&mut self, idx: usize, instance: Instance);

    fn set_local_transform_all(&mut self, mutation: &mut dyn FnMut(usize, &mut Instance));

    fn instance_count(&self) -> usize;

    /**
     * Multiple instances of a parent can be passed down to multiple instances of multiple children.
     * The argument `parents_world_transform` with a matching `range` size provides control over which instances are transformed.
     */
    fn update_world_transforms(&mut self, range: Range<usize>, parents_world_transform: &[Instance]);

    fn update_world_transform_all(&mut self) {
        let range = 0..self.instance_count();
        let identity = vec![Instance::default(); range.len()];
        self.update_world_transforms(range, &identity);
    }

    /// Packs world transforms for the renderer. Children are packed too.
    fn write_to_buffers(&mut self);

    /// Meshes of this node and all its descendants.
    fn meshes(&self) -> Vec<&Mesh>;

    fn get_render(&self) -> Vec<Instanced<'_>>;
}

/// Applies `parents` to the `range` of `instances` and returns the new world transforms.
fn propagate(
    instances: &mut [(Instance, Instance)],
    range: Range<usize>,
    parents: &[Instance],
) -> Option<Vec<Instance>> {
    if parents.len() > instances.len() {
        warn!(
            "You tried to transform with len {}, but there are only {} instances to transform.",
            parents.len(),
            instances.len()
        );
        return None;
    }
    let Some(targets) = instances.get_mut(range.clone()) else {
        warn!(
            "You tried to transform range {}..{}, which is out of bounds for parent len {}.",
            range.start,
            range.end,
            instances.len(),
        );
        return None;
    };
    let world_transforms = targets
        .iter_mut()
        .zip(parents.iter())
        .map(|((local, world), parent)| {
            *world = parent * &*local;
            world.clone()
        })
        .collect();
    Some(world_transforms)
}

/// A transform-only node; its instances place every child instance of the same index.
pub struct ContainerNode {
    pub children: Vec<Box<dyn SceneNode>>,
    pub instances: Vec<(Instance, Instance)>,
}

impl ContainerNode {
    pub fn new(amount: usize) -> Self {
        let instances = (0..amount)
            .map(|_| (Instance::default(), Instance::default()))
            .collect();
        Self {
            instances,
            children: vec![],
        }
    }
}

impl SceneNode for ContainerNode {
    fn get_world_transforms(&self) -> Vec<Instance> {
        self.instances
            .iter()
            .map(|(_, world)| world)
            .cloned()
            .collect()
    }

    fn get_local_transform(&self, idx: usize) -> Option<Instance> {
        self.instances.get(idx).map(|(local, _)| local).cloned()
    }

    fn get_children(&self) -> &Vec<Box<dyn SceneNode>> {
        &self.children
    }

    fn add_child(&mut self, child: Box<dyn SceneNode>) {
        self.children.push(child);
    }

    fn set_local_transform(&mut self, idx: usize, instance: Instance) {
        if let Some((local, _)) = self.instances.get_mut(idx) {
            *local = instance;
        }
    }

    fn set_local_transform_all(&mut self, mutation: &mut dyn FnMut(usize, &mut Instance)) {
        self.instances
            .iter_mut()
            .enumerate()
            .for_each(|(idx, (local, _))| mutation(idx, local));
    }

    fn instance_count(&self) -> usize {
        self.instances.len()
    }

    fn update_world_transforms(&mut self, range: Range<usize>, parents_world_transform: &[Instance]) {
        let Some(world_transforms) =
            propagate(&mut self.instances, range.clone(), parents_world_transform)
        else {
            return;
        };
        for child in self.children.iter_mut() {
            child.update_world_transforms(range.clone(), &world_transforms);
        }
    }

    fn write_to_buffers(&mut self) {
        self.children
            .iter_mut()
            .for_each(|child| child.write_to_buffers());
    }

    fn meshes(&self) -> Vec<&Mesh> {
        self.children.iter().flat_map(|child| child.meshes()).collect()
    }

    fn get_render(&self) -> Vec<Instanced<'_>> {
        self.children
            .iter()
            .flat_map(|child| child.get_render())
            .collect()
    }
}

/// A drawable node: one mesh rendered once per instance.
pub struct MeshNode {
    children: Vec<Box<dyn SceneNode>>,
    instances: Vec<(Instance, Instance)>,
    raw: Vec<InstanceRaw>,
    mesh: Mesh,
}

impl MeshNode {
    pub fn new(mesh: Mesh, amount: usize) -> Self {
        Self::from_instances(mesh, (0..amount).map(|_| Instance::default()).collect())
    }

    pub fn from_instances(mesh: Mesh, instances: Vec<Instance>) -> Self {
        let instances = instances
            .into_iter()
            .map(|instance| (instance.clone(), instance))
            .collect::<Vec<_>>();
        let raw = instances.iter().map(|(_, world)| world.to_raw()).collect();
        Self {
            children: vec![],
            instances,
            raw,
            mesh,
        }
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    /// Last packed world transforms.
    pub fn raw(&self) -> &[InstanceRaw] {
        &self.raw
    }
}

impl SceneNode for MeshNode {
    fn get_world_transforms(&self) -> Vec<Instance> {
        self.instances
            .iter()
            .map(|(_, world)| world)
            .cloned()
            .collect()
    }

    fn get_local_transform(&self, idx: usize) -> Option<Instance> {
        self.instances.get(idx).map(|(local, _)| local).cloned()
    }

    fn get_children(&self) -> &Vec<Box<dyn SceneNode>> {
        &self.children
    }

    fn add_child(&mut self, child: Box<dyn SceneNode>) {
        self.children.push(child);
    }

    fn set_local_transform(&mut self, idx: usize, instance: Instance) {
        if let Some((local, _)) = self.instances.get_mut(idx) {
            *local = instance;
        }
    }

    fn set_local_transform_all(&mut self, mutation: &mut dyn FnMut(usize, &mut Instance)) {
        self.instances
            .iter_mut()
            .enumerate()
            .for_each(|(idx, (local, _))| mutation(idx, local));
    }

    fn instance_count(&self) -> usize {
        self.instances.len()
    }

    fn update_world_transforms(&mut self, range: Range<usize>, parents_world_transform: &[Instance]) {
        let Some(world_transforms) =
            propagate(&mut self.instances, range.clone(), parents_world_transform)
        else {
            return;
        };
        for child in self.children.iter_mut() {
            child.update_world_transforms(range.clone(), &world_transforms);
        }
    }

    fn write_to_buffers(&mut self) {
        self.raw.clear();
        self.raw
            .extend(self.instances.iter().map(|(_, world)| world.to_raw()));
        self.children
            .iter_mut()
            .for_each(|child| child.write_to_buffers());
    }

    fn meshes(&self) -> Vec<&Mesh> {
        std::iter::once(&self.mesh)
            .chain(self.children.iter().flat_map(|child| child.meshes()))
            .collect()
    }

    fn get_render(&self) -> Vec<Instanced<'_>> {
        self.children
            .iter()
            .flat_map(|child| child.get_render())
            .chain([Instanced {
                mesh: &self.mesh,
                instances: &self.raw,
            }])
            .collect()
    }
}
