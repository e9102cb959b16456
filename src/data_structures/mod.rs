//! Engine data structures: instances, meshes, lights, scene graphs and the
//! procedural field.
//!
//! - `instance` holds per-instance transformation data
//! - `mesh` describes parametric primitives and their materials
//! - `light` holds light and fog descriptions
//! - `scene_graph` enables hierarchical scene organization
//! - `field` lays out animated objects on a grid
//! - `animated` contains the per-object animation parameters

pub mod animated;
pub mod field;
pub mod instance;
pub mod light;
pub mod mesh;
pub mod scene_graph;
