//! tableau-ngin
//!
//! A small frame-driven animation engine for decorative 3D scenes on web
//! pages. Scenes are built from parametric primitives, animated with
//! closed-form functions of elapsed time, and handed to a host-provided
//! rendering surface once per display refresh. Rasterization stays on the
//! host side; this crate owns layout, animation state and the frame loop.
//!
//! High-level modules
//! - `camera`: camera, projection and the per-frame camera uniform
//! - `clock`: monotonic time sources and per-frame timing
//! - `config`: tuning knobs for both scenes, loadable from JSON
//! - `context`: per-scene context (camera, lights, viewport, surface) and the host trait
//! - `data_structures`: instances, meshes, lights, scene graph, procedural field
//! - `error`: host and configuration errors
//! - `flow`: the scene trait and the frame driver
//! - `render`: render composition and the surface trait
//! - `scenes`: the board and the piece
//! - `web`: browser host glue (wasm32 only)
//!

pub mod camera;
pub mod clock;
pub mod config;
pub mod context;
pub mod data_structures;
pub mod error;
pub mod flow;
pub mod render;
pub mod scenes;
#[cfg(target_arch = "wasm32")]
pub mod web;

// Re-exports commonly used types for convenience in downstream code.
pub use cgmath;
pub use instant::Duration;
