//! Flow control and the frame loop.
//!
//! A "flow" is one self-contained scene: it owns its animation state and its
//! scene graph, reacts to pointer and resize input, and describes what to
//! draw each frame. The [`FrameDriver`] owns every mounted flow together with
//! its [`Context`] and advances them once per display refresh.
//!
//! # Lifecycle Flow
//!
//! 1. [`FrameDriver::mount`] checks the container, builds the flow, asks the
//!    host for a surface and calls `on_init`
//! 2. Pointer and resize input is forwarded between frames
//! 3. [`FrameDriver::frame`] reads the clock, calls `on_update` on every flow
//!    and presents each flow's `on_render` to its surface

use instant::Duration;

use crate::{
    clock::{FrameTime, TimeSource},
    context::{Context, Host, Sizing, SurfaceOptions, Viewport},
    data_structures::mesh::Mesh,
    error::HostError,
    render::Render,
};

/// Trait for implementing an animated scene.
///
/// # Lifecycle
///
/// 1. `on_init()` is called once after the surface exists; configure camera, lights and fog
/// 2. `on_pointer_move()` and `on_resize()` are called as input arrives
/// 3. `on_update()` is called every frame
/// 4. `on_render()` is called every frame right after `on_update()`
pub trait SceneFlow {
    /// Initialize the flow and configure the context.
    ///
    /// This is the only place meant to set up the camera start position,
    /// the projection lens, lights and fog.
    fn on_init(&mut self, ctx: &mut Context);

    /// Advance the animation to `time`.
    ///
    /// Everything that depends on time must use `time.elapsed`; per-frame
    /// increments must be scaled by `time.frames()`.
    fn on_update(&mut self, ctx: &mut Context, time: &FrameTime);

    /// Handle the latest pointer position.
    fn on_pointer_move(&mut self, ctx: &mut Context, pointer: &PointerSample);

    /// Called after the context applied a viewport that differs from the previous one.
    fn on_resize(&mut self, ctx: &mut Context, viewport: &Viewport);

    /// Meshes the host has to prepare before the first frame.
    fn meshes(&self) -> Vec<&Mesh>;

    /// Return renderable objects for this flow.
    fn on_render(&self) -> Render<'_>;
}

/// A pointer position in viewport pixels, together with the viewport it was measured in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerSample {
    pub x: f64,
    pub y: f64,
    pub viewport: Viewport,
}

impl PointerSample {
    pub fn new(x: f64, y: f64, viewport: Viewport) -> Self {
        Self { x, y, viewport }
    }

    /// Normalized device coordinates: x grows to the right, y grows upwards, both in `[-1, 1]`.
    pub fn ndc(&self) -> Option<(f32, f32)> {
        if !self.viewport.is_drawable() {
            return None;
        }
        let x = (self.x / self.viewport.width as f64) * 2.0 - 1.0;
        let y = -(self.y / self.viewport.height as f64) * 2.0 + 1.0;
        Some((x as f32, y as f32))
    }
}

/// Type alias for a flow constructor. Runs after the container check and before the surface exists.
pub type FlowConstructor = Box<dyn FnOnce(&Viewport) -> Box<dyn SceneFlow>>;

/// Everything needed to put one scene on the page.
pub struct SceneMount {
    pub name: String,
    pub container: String,
    pub sizing: Sizing,
    pub options: SurfaceOptions,
    pub build: FlowConstructor,
}

struct MountedScene {
    name: String,
    container: String,
    sizing: Sizing,
    ctx: Context,
    flow: Box<dyn SceneFlow>,
}

impl MountedScene {
    fn viewport(&self, host: &dyn Host) -> Option<Viewport> {
        match self.sizing {
            Sizing::Window => Some(host.window_viewport()),
            Sizing::Container => host.container_viewport(&self.container),
        }
    }
}

/// The per-frame update loop over all mounted scenes.
pub struct FrameDriver {
    clock: Box<dyn TimeSource>,
    last: Option<Duration>,
    scenes: Vec<MountedScene>,
}

impl FrameDriver {
    pub fn new(clock: Box<dyn TimeSource>) -> Self {
        Self {
            clock,
            last: None,
            scenes: Vec::new(),
        }
    }

    /// Mounts a scene, or explains why it can't be.
    pub fn mount(&mut self, host: &dyn Host, mount: SceneMount) -> Result<(), HostError> {
        let container_viewport = host
            .container_viewport(&mount.container)
            .ok_or_else(|| HostError::MissingElement(format!("#{}", mount.container)))?;
        let viewport = match mount.sizing {
            Sizing::Window => host.window_viewport(),
            Sizing::Container => container_viewport,
        };
        let mut flow = (mount.build)(&viewport);
        let surface = host.create_surface(&mount.container, mount.options, &flow.meshes())?;
        let mut ctx = Context::new(surface, viewport);
        flow.on_init(&mut ctx);
        log::info!(
            "mounted scene `{}` in #{} at {}x{}",
            mount.name,
            mount.container,
            viewport.width,
            viewport.height
        );
        self.scenes.push(MountedScene {
            name: mount.name,
            container: mount.container,
            sizing: mount.sizing,
            ctx,
            flow,
        });
        Ok(())
    }

    /// Mounts what can be mounted and skips the rest. Returns how many scenes are live.
    pub fn mount_all(&mut self, host: &dyn Host, mounts: Vec<SceneMount>) -> usize {
        for mount in mounts {
            let name = mount.name.clone();
            match self.mount(host, mount) {
                Ok(()) => (),
                Err(e) if e.is_silent() => log::debug!("skipping scene `{}`: {}", name, e),
                Err(e) => log::warn!("skipping scene `{}`: {}", name, e),
            }
        }
        self.scenes.len()
    }

    pub fn scene_count(&self) -> usize {
        self.scenes.len()
    }

    pub fn scene_names(&self) -> impl Iterator<Item = &str> {
        self.scenes.iter().map(|scene| scene.name.as_str())
    }

    pub fn context(&self, name: &str) -> Option<&Context> {
        self.scenes
            .iter()
            .find(|scene| scene.name == name)
            .map(|scene| &scene.ctx)
    }

    /// Runs one frame: update every scene at the current clock time, then present it.
    pub fn frame(&mut self) -> FrameTime {
        let elapsed = self.clock.elapsed();
        let time = match self.last {
            Some(previous) => FrameTime::after(previous, elapsed.max(previous)),
            None => FrameTime::new(elapsed, Duration::ZERO),
        };
        self.last = Some(time.elapsed);
        for scene in self.scenes.iter_mut() {
            scene.flow.on_update(&mut scene.ctx, &time);
            if let Err(e) = scene.ctx.present(scene.flow.on_render()) {
                log::error!("Unable to render `{}`: {}", scene.name, e);
            }
        }
        time
    }

    pub fn pointer_moved(&mut self, pointer: PointerSample) {
        for scene in self.scenes.iter_mut() {
            scene.flow.on_pointer_move(&mut scene.ctx, &pointer);
        }
    }

    /// Re-reads every scene's viewport from the host.
    pub fn resized(&mut self, host: &dyn Host) {
        for scene in self.scenes.iter_mut() {
            let Some(viewport) = scene.viewport(host) else {
                log::debug!("container #{} disappeared, keeping its viewport", scene.container);
                continue;
            };
            if scene.ctx.resize(viewport) {
                scene.flow.on_resize(&mut scene.ctx, &viewport);
            }
        }
    }
}

/// Installs the platform logger. Safe to call more than once.
pub fn init_logging() {
    #[cfg(not(target_arch = "wasm32"))]
    {
        if let Err(e) = env_logger::try_init() {
            println!("Warning: Could not initialize logger: {}", e);
        };
    }

    #[cfg(target_arch = "wasm32")]
    {
        // fails only if a logger is already installed
        let _ = console_log::init_with_level(log::Level::Info);
    }
}
