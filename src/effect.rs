//! The wave effect controller: turns one `<img>` into a WebGPU plane and
//! back again.
//!
//! Initialization is a single asynchronous chain per instance. Every step
//! after a suspension point re-checks the shared [`Lifecycle`] before it
//! touches the DOM or the GPU, so `destroy()` may be called at any time.

use crate::camera::PerspectiveCamera;
use crate::config::EffectConfig;
use crate::constants::{MAX_PIXEL_RATIO, OPTIONS_ATTRIBUTE, PARALLAX_FACTOR};
use crate::dom::{self, Listener, ResizeWatch};
use crate::error::{EffectError, FailureClass};
use crate::events;
use crate::frame::FrameLoop;
use crate::geometry::{self, PlaneMesh};
use crate::input;
use crate::lifecycle::Lifecycle;
use crate::render::{PlaneResources, Renderer, SourceTexture};
use crate::scene::{Interaction, MaterialParams, PlaneState, ResizeFilter, Viewport, WaveUniforms};
use crate::tween::Clock;
use glam::Vec2;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

/// Everything GPU-side plus the state the shader reads.
struct Scene {
    renderer: Renderer,
    texture: Option<SourceTexture>,
    plane: Option<PlaneResources>,
    camera: PerspectiveCamera,
    viewport: Viewport,
    state: PlaneState,
    material: MaterialParams,
    interaction: Interaction,
    resize_filter: ResizeFilter,
}

impl Scene {
    fn uniforms(&self) -> WaveUniforms {
        WaveUniforms::compose(&self.camera, &self.state, &self.interaction, &self.material)
    }

    fn render(&mut self) {
        let uniforms = self.uniforms();
        if let Some(plane) = &self.plane {
            if let Err(e) = self.renderer.render(plane, &uniforms) {
                log::warn!("[render] frame skipped: {:?}", e);
            }
        }
    }

    /// Geometry and material, then texture, then the rendering context.
    fn release(self) {
        if let Some(plane) = self.plane {
            plane.release();
        }
        if let Some(texture) = self.texture {
            texture.release();
        }
        self.renderer.release();
    }
}

pub(crate) struct Shared {
    config: EffectConfig,
    image: web::HtmlImageElement,
    lifecycle: Lifecycle,
    clock: Clock,
    wrapper: RefCell<Option<web::HtmlElement>>,
    canvas: RefCell<Option<web::HtmlCanvasElement>>,
    scene: RefCell<Option<Scene>>,
    listeners: RefCell<Vec<Listener>>,
    resize: RefCell<Option<ResizeWatch>>,
    frame: RefCell<Option<FrameLoop>>,
    prior_display: RefCell<Option<String>>,
}

impl Shared {
    fn new(image: web::HtmlImageElement, config: EffectConfig) -> Self {
        Self {
            config,
            image,
            lifecycle: Lifecycle::new(),
            clock: Clock::new(),
            wrapper: RefCell::new(None),
            canvas: RefCell::new(None),
            scene: RefCell::new(None),
            listeners: RefCell::new(Vec::new()),
            resize: RefCell::new(None),
            frame: RefCell::new(None),
            prior_display: RefCell::new(None),
        }
    }

    #[inline]
    fn duration(&self) -> f64 {
        self.config.transition_duration as f64
    }

    /// One animation frame. Returns `false` once the loop should stop.
    fn frame(&self) -> bool {
        if self.lifecycle.is_destroyed() {
            return false;
        }
        let mut guard = self.scene.borrow_mut();
        let Some(scene) = guard.as_mut() else {
            return false;
        };
        scene.interaction.advance(self.config.animation_speed);
        scene.state.step(self.clock.now());
        scene.render();
        true
    }

    pub(crate) fn on_enter(&self) {
        if self.lifecycle.is_destroyed() {
            return;
        }
        if let Some(scene) = self.scene.borrow_mut().as_mut() {
            scene.interaction.enter();
            scene
                .state
                .enter(self.clock.now(), self.config.hover_scale, self.duration());
        }
    }

    pub(crate) fn on_move(&self, client_x: f64, client_y: f64) {
        if self.lifecycle.is_destroyed() {
            return;
        }
        let Some(wrapper) = self.wrapper.borrow().clone() else {
            return;
        };
        let mut guard = self.scene.borrow_mut();
        let Some(scene) = guard.as_mut() else {
            return;
        };
        if !scene.interaction.admit_move(self.clock.now_ms()) {
            return;
        }
        let rect = wrapper.get_bounding_client_rect();
        let Some(ndc) = input::pointer_to_ndc(
            client_x,
            client_y,
            rect.left(),
            rect.top(),
            rect.width(),
            rect.height(),
        ) else {
            return;
        };
        let ray = scene.camera.ray_through_ndc(ndc);
        let Some(uv) = input::pick_plane_uv(
            &ray,
            scene.state.size,
            scene.state.offset(),
            scene.state.scale.value(),
        ) else {
            return;
        };
        scene.interaction.mouse_uv = uv;
        let target = input::parallax_offset(ndc, scene.state.size, PARALLAX_FACTOR);
        scene
            .state
            .move_toward(target, self.clock.now(), self.duration());
    }

    pub(crate) fn on_leave(&self) {
        if self.lifecycle.is_destroyed() {
            return;
        }
        if let Some(scene) = self.scene.borrow_mut().as_mut() {
            scene.interaction.leave();
            scene.state.leave(self.clock.now(), self.duration());
        }
    }

    /// Camera aspect and output size follow the container; the plane mesh is kept.
    /// The observer's initial report and repeated sizes are not changes.
    pub(crate) fn on_resize(&self, width: f64, height: f64) {
        if self.lifecycle.is_destroyed() {
            return;
        }
        let mut guard = self.scene.borrow_mut();
        let Some(scene) = guard.as_mut() else {
            return;
        };
        if !scene.resize_filter.accept(width, height) {
            return;
        }
        if !scene.viewport.apply_resize(&mut scene.camera, width, height) {
            return;
        }
        let backing = scene.viewport.backing_size();
        if let Some(canvas) = self.canvas.borrow().as_ref() {
            if let Err(e) = dom::resize_canvas(canvas, width, height, backing) {
                log::warn!("[dom] canvas resize failed: {e}");
            }
        }
        if let Some(wrapper) = self.wrapper.borrow().as_ref() {
            dom::resize_wrapper(wrapper, width, height);
        }
        scene.renderer.set_size(backing.0, backing.1);
        log::debug!("[wave] resized to {width}x{height} ({}x{})", backing.0, backing.1);
    }

    /// Idempotent; safe before, during and after initialization.
    pub(crate) fn teardown(&self) {
        if !self.lifecycle.destroy() {
            return;
        }
        if let Some(frame) = self.frame.borrow_mut().take() {
            frame.cancel();
        }
        for listener in self.listeners.borrow_mut().drain(..) {
            listener.detach();
        }
        if let Some(watch) = self.resize.borrow_mut().take() {
            watch.disconnect();
        }
        if let Some(scene) = self.scene.borrow_mut().take() {
            scene.release();
        }
        self.canvas.borrow_mut().take();
        if let Some(wrapper) = self.wrapper.borrow_mut().take() {
            wrapper.remove();
        }
        if let Some(prior) = self.prior_display.borrow_mut().take() {
            dom::restore_display(&self.image, &prior);
        }
        log::debug!("[wave] torn down");
    }

    pub(crate) fn push_listener(&self, listener: Listener) {
        self.listeners.borrow_mut().push(listener);
    }
}

async fn initialize(shared: &Rc<Shared>) -> Result<(), EffectError> {
    let cfg = &shared.config;
    let window = web::window().ok_or(EffectError::NoWindow)?;
    let document = window.document().ok_or(EffectError::NoWindow)?;

    // 1. capability probe
    if !dom::gpu_supported(&window) {
        return Err(EffectError::GpuUnavailable);
    }
    // 2. container
    let container = dom::find_container(&shared.image)?;

    // 3. source image decoded
    dom::image_loaded(&shared.image).await?;
    shared.lifecycle.ensure_live()?;

    // 4. rendered box
    let (width, height) = dom::rendered_size(&shared.image);
    if width <= 0.0 || height <= 0.0 {
        return Err(EffectError::ZeroSize { width, height });
    }

    // 5. wrapper + canvas
    let pixel_ratio = geometry::effective_pixel_ratio(window.device_pixel_ratio(), MAX_PIXEL_RATIO);
    let viewport = Viewport::new(width, height, pixel_ratio);
    let (wrapper, canvas) =
        dom::create_surface(&document, width, height, viewport.backing_size())?;
    *shared.wrapper.borrow_mut() = Some(wrapper.clone());
    *shared.canvas.borrow_mut() = Some(canvas.clone());

    // 6. camera, scene background, picking
    let camera = PerspectiveCamera::new(cfg.fov, viewport.aspect(), cfg.camera_distance);
    let renderer = Renderer::new(&canvas, cfg.background_rgba()).await?;
    if shared.lifecycle.is_destroyed() {
        renderer.release();
        return Err(EffectError::Cancelled);
    }
    let plane_size = camera.visible_size();
    *shared.scene.borrow_mut() = Some(Scene {
        renderer,
        texture: None,
        plane: None,
        material: MaterialParams::new(cfg, plane_size, plane_size),
        state: PlaneState::new(plane_size),
        camera,
        viewport,
        interaction: Interaction::default(),
        resize_filter: ResizeFilter::new(),
    });

    // 7. texture
    let bitmap = dom::decode_bitmap(&window, &shared.image).await?;
    if shared.lifecycle.is_destroyed() {
        bitmap.close();
        return Err(EffectError::Cancelled);
    }
    {
        let mut guard = shared.scene.borrow_mut();
        let scene = guard.as_mut().ok_or(EffectError::Cancelled)?;
        let texture = scene.renderer.upload_texture(&bitmap);
        bitmap.close();

        // 8-9. frustum-filling plane, aspect correction
        let texture_size = Vec2::new(texture.width as f32, texture.height as f32);
        scene.material = MaterialParams::new(cfg, plane_size, texture_size);

        // 10-11. material + mesh
        let (wseg, hseg) = geometry::segment_counts(cfg.segments, plane_size.x / plane_size.y);
        let mesh = PlaneMesh::new(plane_size.x, plane_size.y, wseg, hseg);
        let plane = scene
            .renderer
            .build_plane(&mesh, &texture, &scene.uniforms());
        scene.texture = Some(texture);
        scene.plane = Some(plane);
        log::debug!(
            "[wave] plane {:.2}x{:.2}, {}x{} segments, ratio ({:.3}, {:.3})",
            plane_size.x,
            plane_size.y,
            wseg,
            hseg,
            scene.material.ratio.x,
            scene.material.ratio.y
        );
    }

    // 12. swap the image for the canvas and paint once
    shared.lifecycle.ensure_live()?;
    wrapper
        .append_child(&canvas)
        .and_then(|_| container.append_child(&wrapper))
        .map_err(|e| EffectError::Dom(format!("{e:?}")))?;
    *shared.prior_display.borrow_mut() = Some(dom::hide(&shared.image));
    if let Some(scene) = shared.scene.borrow_mut().as_mut() {
        scene.render();
    }

    // 13. frame loop
    let weak = Rc::downgrade(shared);
    let frame = FrameLoop::start(move || weak.upgrade().map(|s| s.frame()).unwrap_or(false));
    *shared.frame.borrow_mut() = Some(frame);

    // 14. input
    events::wire_pointer(shared, &wrapper)?;
    *shared.resize.borrow_mut() = events::wire_resize(shared, &window, &container)?;
    Ok(())
}

async fn run_initialization(shared: Rc<Shared>) {
    match initialize(&shared).await {
        Ok(()) => log::info!("[wave] active on {}", shared.image.current_src()),
        Err(e) => {
            match e.class() {
                FailureClass::CapabilityMissing => log::info!("[wave] {e}; keeping plain image"),
                FailureClass::Cancelled => log::debug!("[wave] {e}"),
                FailureClass::Precondition
                | FailureClass::ResourceLoad
                | FailureClass::Internal => log::error!("[wave] init failed: {e}"),
            }
            if e.needs_teardown() {
                shared.teardown();
            }
        }
    }
}

/// Handle to one image's effect. Cloning shares the same instance.
#[wasm_bindgen]
#[derive(Clone)]
pub struct WaveEffect {
    shared: Rc<Shared>,
}

impl WaveEffect {
    /// Start the effect on `element`. Returns `None` (after logging) if the
    /// element is not an `<img>` or already carries a live effect; all later
    /// failures are handled asynchronously and leave the image untouched.
    pub fn attach(element: &web::Element, config: EffectConfig) -> Option<WaveEffect> {
        let Some(image) = element.dyn_ref::<web::HtmlImageElement>() else {
            log::error!("[wave] {}", EffectError::NotAnImage);
            return None;
        };
        if registry::contains(image) {
            log::debug!("[wave] {} already attached", image.current_src());
            return None;
        }
        let shared = Rc::new(Shared::new(image.clone(), config));
        let effect = WaveEffect {
            shared: shared.clone(),
        };
        registry::register(effect.clone());
        spawn_local(run_initialization(shared));
        Some(effect)
    }

    pub fn config(&self) -> &EffectConfig {
        &self.shared.config
    }
}

#[wasm_bindgen]
impl WaveEffect {
    /// JS entry point: `WaveEffect.attach(img, options?)`.
    #[wasm_bindgen(js_name = attach)]
    pub fn attach_js(element: JsValue, options: JsValue) -> Option<WaveEffect> {
        let Some(element) = element.dyn_ref::<web::Element>() else {
            log::error!("[wave] {}", EffectError::NotAnImage);
            return None;
        };
        WaveEffect::attach(element, config_from_js(&options))
    }

    pub fn destroy(&self) {
        self.shared.teardown();
    }

    /// True once initialization finished and until teardown.
    #[wasm_bindgen(getter)]
    pub fn active(&self) -> bool {
        !self.shared.lifecycle.is_destroyed() && self.shared.frame.borrow().is_some()
    }

    #[wasm_bindgen(getter)]
    pub fn destroyed(&self) -> bool {
        self.shared.lifecycle.is_destroyed()
    }
}

fn config_from_json_or_default(json: &str, source: &str) -> EffectConfig {
    EffectConfig::from_json(json).unwrap_or_else(|e| {
        log::warn!("[wave] ignoring malformed {source}: {e}");
        EffectConfig::default()
    })
}

pub(crate) fn config_from_js(options: &JsValue) -> EffectConfig {
    if options.is_undefined() || options.is_null() {
        return EffectConfig::default();
    }
    match js_sys::JSON::stringify(options) {
        Ok(json) => config_from_json_or_default(&String::from(json), "options"),
        Err(e) => {
            log::warn!("[wave] options are not serializable: {e:?}");
            EffectConfig::default()
        }
    }
}

pub(crate) fn config_from_attribute(el: &web::Element) -> EffectConfig {
    match el.get_attribute(OPTIONS_ATTRIBUTE) {
        Some(json) => config_from_json_or_default(&json, OPTIONS_ATTRIBUTE),
        None => EffectConfig::default(),
    }
}

pub(crate) fn destroy_all() {
    registry::destroy_all();
}

/// Live instances, torn down together on page unload.
mod registry {
    use super::WaveEffect;
    use std::cell::RefCell;
    use web_sys as web;

    thread_local! {
        static LIVE: RefCell<Vec<WaveEffect>> = const { RefCell::new(Vec::new()) };
    }

    pub(super) fn register(effect: WaveEffect) {
        LIVE.with(|live| {
            let mut live = live.borrow_mut();
            live.retain(|e| !e.shared.lifecycle.is_destroyed());
            live.push(effect);
        });
    }

    pub(super) fn contains(image: &web::HtmlImageElement) -> bool {
        LIVE.with(|live| {
            live.borrow()
                .iter()
                .any(|e| !e.shared.lifecycle.is_destroyed() && e.shared.image == *image)
        })
    }

    pub(super) fn destroy_all() {
        let drained: Vec<WaveEffect> = LIVE.with(|live| live.borrow_mut().drain(..).collect());
        let n = drained.len();
        for effect in drained {
            effect.destroy();
        }
        log::debug!("[wave] destroyed {n} instance(s)");
    }
}
