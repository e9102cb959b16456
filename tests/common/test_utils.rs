use std::{cell::RefCell, collections::HashMap, rc::Rc};

use tableau_ngin::{
    camera::CameraUniform,
    context::{Context, Host, SurfaceOptions, Viewport},
    data_structures::mesh::Mesh,
    error::HostError,
    render::{Frame, RenderSurface},
};

/// One presented frame, reduced to what the tests look at.
#[derive(Debug, Clone)]
pub struct FrameRecord {
    pub camera: CameraUniform,
    pub lights: usize,
    pub fog: bool,
    pub opaque: Vec<u32>,
    pub transparent: Vec<u32>,
    /// Instance translations per mesh id, in submission order.
    pub translations: Vec<(u32, Vec<[f32; 3]>)>,
}

#[derive(Debug, Default)]
pub struct SurfaceLog {
    pub resizes: Vec<Viewport>,
    pub frames: Vec<FrameRecord>,
    pub meshes: Vec<Mesh>,
}

pub struct RecordingSurface {
    log: Rc<RefCell<SurfaceLog>>,
    fail: bool,
}

impl RecordingSurface {
    pub fn new() -> (Self, Rc<RefCell<SurfaceLog>>) {
        let log = Rc::new(RefCell::new(SurfaceLog::default()));
        (
            Self {
                log: log.clone(),
                fail: false,
            },
            log,
        )
    }
}

impl RenderSurface for RecordingSurface {
    fn resize(&mut self, viewport: &Viewport) {
        self.log.borrow_mut().resizes.push(*viewport);
    }

    fn present(&mut self, frame: &Frame<'_>) -> anyhow::Result<()> {
        if self.fail {
            anyhow::bail!("surface lost");
        }
        let record = FrameRecord {
            camera: frame.camera,
            lights: frame.lights.len(),
            fog: frame.fog.is_some(),
            opaque: frame.opaque.iter().map(|batch| batch.mesh.id).collect(),
            transparent: frame.transparent.iter().map(|batch| batch.mesh.id).collect(),
            translations: frame
                .batches()
                .map(|batch| {
                    (
                        batch.mesh.id,
                        batch.instances.iter().map(|raw| raw.translation()).collect(),
                    )
                })
                .collect(),
        };
        self.log.borrow_mut().frames.push(record);
        Ok(())
    }
}

/// A scripted page: a window, a set of containers and an optional rendering capability.
pub struct TestHost {
    pub window: Viewport,
    pub containers: HashMap<String, Viewport>,
    pub can_render: bool,
    pub failing: Vec<String>,
    logs: RefCell<HashMap<String, Rc<RefCell<SurfaceLog>>>>,
}

pub const BOARD_CONTAINER: &str = "canvas-container";
pub const PIECE_CONTAINER: &str = "chess-piece-container";

impl TestHost {
    pub fn new() -> Self {
        Self {
            window: Viewport::new(1280, 720),
            containers: HashMap::new(),
            can_render: true,
            failing: Vec::new(),
            logs: RefCell::new(HashMap::new()),
        }
    }

    /// A page with both containers present.
    pub fn page() -> Self {
        Self::new()
            .with_container(BOARD_CONTAINER, Viewport::new(1280, 720))
            .with_container(PIECE_CONTAINER, Viewport::new(400, 500))
    }

    pub fn with_container(mut self, id: &str, viewport: Viewport) -> Self {
        self.containers.insert(id.to_string(), viewport);
        self
    }

    pub fn without_rendering(mut self) -> Self {
        self.can_render = false;
        self
    }

    pub fn failing_on(mut self, id: &str) -> Self {
        self.failing.push(id.to_string());
        self
    }

    pub fn log(&self, container: &str) -> Rc<RefCell<SurfaceLog>> {
        self.logs
            .borrow()
            .get(container)
            .cloned()
            .unwrap_or_else(|| panic!("no surface was created for #{}", container))
    }

    pub fn has_surface(&self, container: &str) -> bool {
        self.logs.borrow().contains_key(container)
    }
}

impl Host for TestHost {
    fn window_viewport(&self) -> Viewport {
        self.window
    }

    fn container_viewport(&self, container: &str) -> Option<Viewport> {
        self.containers.get(container).copied()
    }

    fn create_surface(
        &self,
        container: &str,
        _: SurfaceOptions,
        meshes: &[&Mesh],
    ) -> Result<Box<dyn RenderSurface>, HostError> {
        if !self.can_render {
            return Err(HostError::MissingHostCapability("webgl".to_string()));
        }
        let (mut surface, log) = RecordingSurface::new();
        surface.fail = self.failing.iter().any(|id| id == container);
        log.borrow_mut().meshes = meshes.iter().map(|mesh| (*mesh).clone()).collect();
        self.logs.borrow_mut().insert(container.to_string(), log);
        Ok(Box::new(surface))
    }
}

/// A context over a recording surface, for driving scenes without a driver.
pub fn test_context(viewport: Viewport) -> (Context, Rc<RefCell<SurfaceLog>>) {
    let (surface, log) = RecordingSurface::new();
    (Context::new(Box::new(surface), viewport), log)
}

pub fn assert_close(actual: f32, expected: f32) {
    assert!(
        (actual - expected).abs() < 1e-4,
        "expected {} to be close to {}",
        actual,
        expected
    );
}
