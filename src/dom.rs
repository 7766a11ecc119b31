use crate::constants::{CONTAINER_SELECTOR, WRAPPER_CLASS};
use crate::error::{describe_js, EffectError};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

/// Whether the host exposes WebGPU (`navigator.gpu`).
pub fn gpu_supported(window: &web::Window) -> bool {
    js_sys::Reflect::get(&window.navigator(), &JsValue::from_str("gpu"))
        .map(|gpu| !gpu.is_undefined() && !gpu.is_null())
        .unwrap_or(false)
}

pub fn resize_observer_supported(window: &web::Window) -> bool {
    js_sys::Reflect::has(window, &JsValue::from_str("ResizeObserver")).unwrap_or(false)
}

pub fn find_container(image: &web::Element) -> Result<web::Element, EffectError> {
    image
        .closest(CONTAINER_SELECTOR)
        .ok()
        .flatten()
        .ok_or(EffectError::MissingContainer {
            selector: CONTAINER_SELECTOR,
        })
}

/// Resolve once the image has decoded with nonzero natural dimensions.
///
/// An already-complete image resolves immediately. A complete image without
/// pixels (no source, or a broken one) fails without waiting. Otherwise waits
/// for `load` or `error` and removes both listeners once either fires.
pub async fn image_loaded(image: &web::HtmlImageElement) -> Result<(), EffectError> {
    if image.complete() && image.natural_width() > 0 && image.natural_height() > 0 {
        return Ok(());
    }
    if image.complete() {
        let src = image.current_src();
        return Err(EffectError::ImageLoad(if src.is_empty() {
            "image has no source".to_string()
        } else {
            format!("{src} is broken")
        }));
    }

    let target: &web::EventTarget = image.as_ref();
    let mut listeners: Vec<(&'static str, Closure<dyn FnMut(web::Event)>)> = Vec::with_capacity(2);
    let promise = js_sys::Promise::new(&mut |resolve, reject| {
        let on_load = Closure::once(move |_ev: web::Event| {
            _ = resolve.call0(&JsValue::NULL);
        });
        let on_error = Closure::once(move |_ev: web::Event| {
            _ = reject.call1(&JsValue::NULL, &JsValue::from_str("error event"));
        });
        for (kind, cb) in [("load", on_load), ("error", on_error)] {
            _ = target.add_event_listener_with_callback(kind, cb.as_ref().unchecked_ref());
            listeners.push((kind, cb));
        }
    });
    let outcome = JsFuture::from(promise).await;
    for (kind, cb) in listeners {
        _ = target.remove_event_listener_with_callback(kind, cb.as_ref().unchecked_ref());
    }
    outcome
        .map(|_| ())
        .map_err(|e| EffectError::ImageLoad(format!("{}: {}", image.src(), describe_js(&e))))
}

/// Decode the source image into an `ImageBitmap` for texture upload.
pub async fn decode_bitmap(
    window: &web::Window,
    image: &web::HtmlImageElement,
) -> Result<web::ImageBitmap, EffectError> {
    let promise = window
        .create_image_bitmap_with_html_image_element(image)
        .map_err(|e| EffectError::TextureLoad(describe_js(&e)))?;
    let value = JsFuture::from(promise)
        .await
        .map_err(|e| EffectError::TextureLoad(describe_js(&e)))?;
    value
        .dyn_into::<web::ImageBitmap>()
        .map_err(|e| EffectError::TextureLoad(describe_js(&e)))
}

/// Rendered on-page box of an element, in CSS pixels.
pub fn rendered_size(el: &web::Element) -> (f64, f64) {
    let rect = el.get_bounding_client_rect();
    (rect.width(), rect.height())
}

fn set_px(el: &web::HtmlElement, width: f64, height: f64) -> Result<(), EffectError> {
    let style = el.style();
    style
        .set_property("width", &format!("{width}px"))
        .and_then(|_| style.set_property("height", &format!("{height}px")))
        .map_err(|e| EffectError::Dom(describe_js(&e)))
}

/// Create the (detached) wrapper and canvas for a `width`x`height` CSS box.
pub fn create_surface(
    document: &web::Document,
    width: f64,
    height: f64,
    backing: (u32, u32),
) -> Result<(web::HtmlElement, web::HtmlCanvasElement), EffectError> {
    let wrapper: web::HtmlElement = document
        .create_element("div")
        .and_then(|el| el.dyn_into::<web::HtmlElement>().map_err(JsValue::from))
        .map_err(|e| EffectError::Dom(describe_js(&e)))?;
    _ = wrapper.class_list().add_1(WRAPPER_CLASS);
    let style = wrapper.style();
    _ = style.set_property("position", "relative");
    _ = style.set_property("overflow", "hidden");
    set_px(&wrapper, width, height)?;

    let canvas: web::HtmlCanvasElement = document
        .create_element("canvas")
        .and_then(|el| el.dyn_into::<web::HtmlCanvasElement>().map_err(JsValue::from))
        .map_err(|e| EffectError::Dom(describe_js(&e)))?;
    _ = canvas.style().set_property("display", "block");
    resize_canvas(&canvas, width, height, backing)?;
    Ok((wrapper, canvas))
}

/// CSS size plus backing-store size in one step.
pub fn resize_canvas(
    canvas: &web::HtmlCanvasElement,
    width: f64,
    height: f64,
    backing: (u32, u32),
) -> Result<(), EffectError> {
    canvas.set_width(backing.0);
    canvas.set_height(backing.1);
    set_px(canvas, width, height)
}

pub fn resize_wrapper(wrapper: &web::HtmlElement, width: f64, height: f64) {
    if let Err(e) = set_px(wrapper, width, height) {
        log::warn!("[dom] wrapper resize failed: {e}");
    }
}

/// Hide the image and return its previous inline `display` value.
pub fn hide(el: &web::HtmlElement) -> String {
    let style = el.style();
    let prior = style.get_property_value("display").unwrap_or_default();
    _ = style.set_property("display", "none");
    prior
}

pub fn restore_display(el: &web::HtmlElement, prior: &str) {
    let style = el.style();
    if prior.is_empty() {
        _ = style.remove_property("display");
    } else {
        _ = style.set_property("display", prior);
    }
}

/// An attached event listener that can be removed again.
pub struct Listener {
    target: web::EventTarget,
    kind: &'static str,
    callback: Closure<dyn FnMut(web::Event)>,
}

impl Listener {
    pub fn attach(
        target: &web::EventTarget,
        kind: &'static str,
        handler: impl FnMut(web::Event) + 'static,
    ) -> Result<Self, EffectError> {
        let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web::Event)>);
        target
            .add_event_listener_with_callback(kind, callback.as_ref().unchecked_ref())
            .map_err(|e| EffectError::Dom(describe_js(&e)))?;
        Ok(Self {
            target: target.clone(),
            kind,
            callback,
        })
    }

    pub fn detach(self) {
        _ = self
            .target
            .remove_event_listener_with_callback(self.kind, self.callback.as_ref().unchecked_ref());
    }
}

/// A `ResizeObserver` watching one element; reports its content box size.
pub struct ResizeWatch {
    observer: web::ResizeObserver,
    _callback: Closure<dyn FnMut(js_sys::Array)>,
}

impl ResizeWatch {
    pub fn observe(
        target: &web::Element,
        mut on_resize: impl FnMut(f64, f64) + 'static,
    ) -> Result<Self, EffectError> {
        let callback = Closure::wrap(Box::new(move |entries: js_sys::Array| {
            let Some(entry) = entries
                .iter()
                .next()
                .and_then(|e| e.dyn_into::<web::ResizeObserverEntry>().ok())
            else {
                return;
            };
            let rect = entry.content_rect();
            on_resize(rect.width(), rect.height());
        }) as Box<dyn FnMut(js_sys::Array)>);
        let observer = web::ResizeObserver::new(callback.as_ref().unchecked_ref())
            .map_err(|e| EffectError::Dom(describe_js(&e)))?;
        observer.observe(target);
        Ok(Self {
            observer,
            _callback: callback,
        })
    }

    pub fn disconnect(self) {
        self.observer.disconnect();
    }
}

/// Run `f` now if the document has parsed, otherwise on `DOMContentLoaded`.
pub fn on_ready(document: &web::Document, f: impl FnOnce() + 'static) {
    if document.ready_state() != "loading" {
        f();
        return;
    }
    let closure = Closure::once(f);
    _ = document
        .add_event_listener_with_callback("DOMContentLoaded", closure.as_ref().unchecked_ref());
    // page-lifetime listener
    closure.forget();
}

/// Attach a listener that lives as long as the page.
pub fn add_page_listener(target: &web::EventTarget, kind: &str, mut handler: impl FnMut() + 'static) {
    let closure = Closure::wrap(Box::new(move || handler()) as Box<dyn FnMut()>);
    _ = target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref());
    closure.forget();
}
