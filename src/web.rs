//! Browser host.
//!
//! The page supplies a [`RendererFactory`] that turns mesh descriptions into a
//! drawable [`JsRenderer`] (e.g. a thin wrapper around a WebGL library). The
//! engine then drives both scenes from `requestAnimationFrame`, a document
//! `mousemove` listener and a window `resize` listener for the page's lifetime.

use std::{cell::RefCell, rc::Rc};

use wasm_bindgen::{JsCast, prelude::*};
use web_sys::{Document, Element, MouseEvent, Window};

use crate::{
    clock::Clock,
    config::TableauConfig,
    context::{Host, SurfaceOptions, Viewport},
    data_structures::{light::LightUniform, mesh::Mesh},
    error::HostError,
    flow::{FrameDriver, PointerSample, init_logging},
    render::{Frame, RenderSurface},
    scenes,
};

#[wasm_bindgen]
extern "C" {
    /// Provided by the page.
    pub type RendererFactory;

    /// Returns `undefined` when no rendering context can be created.
    #[wasm_bindgen(method)]
    fn create(
        this: &RendererFactory,
        container: &Element,
        meshes_json: &str,
        alpha: bool,
        antialias: bool,
    ) -> Option<JsRenderer>;

    pub type JsRenderer;

    #[wasm_bindgen(method, js_name = setSize)]
    fn set_size(this: &JsRenderer, width: u32, height: u32, pixel_ratio: f64);

    #[wasm_bindgen(method, catch, js_name = beginFrame)]
    fn begin_frame(this: &JsRenderer, camera: &[f32], lights: &[f32], fog: &[f32]) -> Result<(), JsValue>;

    #[wasm_bindgen(method, catch)]
    fn draw(this: &JsRenderer, mesh: u32, instances: &[f32]) -> Result<(), JsValue>;

    #[wasm_bindgen(method, catch, js_name = endFrame)]
    fn end_frame(this: &JsRenderer) -> Result<(), JsValue>;
}

struct JsSurface {
    renderer: JsRenderer,
}

fn js_error(e: JsValue) -> anyhow::Error {
    anyhow::anyhow!("{:?}", e)
}

impl RenderSurface for JsSurface {
    fn resize(&mut self, viewport: &Viewport) {
        self.renderer
            .set_size(viewport.width, viewport.height, viewport.pixel_ratio);
    }

    fn present(&mut self, frame: &Frame<'_>) -> anyhow::Result<()> {
        let lights: Vec<LightUniform> = frame.lights.iter().map(|light| light.to_uniform()).collect();
        let fog = frame
            .fog
            .map(|fog| {
                let [r, g, b] = fog.colour.rgb();
                vec![r, g, b, fog.density]
            })
            .unwrap_or_default();
        self.renderer
            .begin_frame(
                bytemuck::cast_slice(&[frame.camera]),
                bytemuck::cast_slice(&lights),
                &fog,
            )
            .map_err(js_error)?;
        for batch in frame.batches() {
            self.renderer
                .draw(batch.mesh.id, batch.as_floats())
                .map_err(js_error)?;
        }
        self.renderer.end_frame().map_err(js_error)
    }
}

struct WebHost {
    window: Window,
    document: Document,
    factory: RendererFactory,
}

fn window_viewport(window: &Window) -> Viewport {
    let dimension = |value: Result<JsValue, JsValue>| {
        value
            .ok()
            .and_then(|value| value.as_f64())
            .unwrap_or(0.0)
            .max(0.0) as u32
    };
    Viewport::new(dimension(window.inner_width()), dimension(window.inner_height()))
        .with_pixel_ratio(window.device_pixel_ratio())
}

impl Host for WebHost {
    fn window_viewport(&self) -> Viewport {
        window_viewport(&self.window)
    }

    fn container_viewport(&self, container: &str) -> Option<Viewport> {
        let element = self.document.get_element_by_id(container)?;
        Some(
            Viewport::new(
                element.client_width().max(0) as u32,
                element.client_height().max(0) as u32,
            )
            .with_pixel_ratio(self.window.device_pixel_ratio()),
        )
    }

    fn create_surface(
        &self,
        container: &str,
        options: SurfaceOptions,
        meshes: &[&Mesh],
    ) -> Result<Box<dyn RenderSurface>, HostError> {
        let element = self
            .document
            .get_element_by_id(container)
            .ok_or_else(|| HostError::MissingElement(format!("#{}", container)))?;
        let meshes_json = serde_json::to_string(meshes)
            .map_err(|e| HostError::MissingHostCapability(format!("mesh description: {}", e)))?;
        let renderer = self
            .factory
            .create(&element, &meshes_json, options.alpha, options.antialias)
            .ok_or_else(|| {
                HostError::MissingHostCapability(format!("no rendering context for #{}", container))
            })?;
        Ok(Box::new(JsSurface { renderer }))
    }
}

fn random_seed() -> u64 {
    (web_sys::js_sys::Math::random() * (1u64 << 53) as f64) as u64
}

fn load_config(config_json: Option<String>) -> TableauConfig {
    match config_json.as_deref().map(TableauConfig::from_json) {
        Some(Ok(config)) => config,
        Some(Err(e)) => {
            log::warn!("ignoring configuration: {}", e);
            TableauConfig::default()
        }
        None => TableauConfig::default(),
    }
}

fn request_frame(window: &Window, callback: &Closure<dyn FnMut()>) {
    if let Err(e) = window.request_animation_frame(callback.as_ref().unchecked_ref()) {
        log::error!("requestAnimationFrame failed: {:?}", e);
    }
}

/// Mounts both scenes and runs them until the page goes away.
#[wasm_bindgen]
pub fn start(factory: RendererFactory, config_json: Option<String>) -> Result<(), JsValue> {
    init_logging();
    let config = load_config(config_json);
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let host = Rc::new(WebHost {
        window: window.clone(),
        document: document.clone(),
        factory,
    });

    let seed = config.seed.unwrap_or_else(random_seed);
    let mut driver = FrameDriver::new(Box::new(Clock::new()));
    if driver.mount_all(&*host, scenes::mounts(&config, seed)) == 0 {
        log::info!("no scenes on this page");
        return Ok(());
    }
    let driver = Rc::new(RefCell::new(driver));

    {
        let driver = driver.clone();
        let window = window.clone();
        let on_move = Closure::<dyn FnMut(MouseEvent)>::new(move |event: MouseEvent| {
            let pointer = PointerSample::new(
                event.client_x() as f64,
                event.client_y() as f64,
                window_viewport(&window),
            );
            driver.borrow_mut().pointer_moved(pointer);
        });
        document.add_event_listener_with_callback("mousemove", on_move.as_ref().unchecked_ref())?;
        on_move.forget();
    }

    {
        let driver = driver.clone();
        let host = host.clone();
        let on_resize = Closure::<dyn FnMut()>::new(move || {
            driver.borrow_mut().resized(&*host);
        });
        window.add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())?;
        on_resize.forget();
    }

    // The callback re-schedules itself, so it has to own a handle to itself.
    let callback: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let first = callback.clone();
    let loop_window = window.clone();
    *first.borrow_mut() = Some(Closure::new(move || {
        driver.borrow_mut().frame();
        if let Some(next) = callback.borrow().as_ref() {
            request_frame(&loop_window, next);
        }
    }));
    if let Some(callback) = first.borrow().as_ref() {
        request_frame(&window, callback);
    }
    Ok(())
}
