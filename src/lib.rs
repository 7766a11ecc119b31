#![cfg(target_arch = "wasm32")]
//! Hover wave distortion for page images.
//!
//! On page ready every `img.wave-image` inside a `.picture-wrapper` is replaced
//! by a WebGPU-rendered plane that ripples around the pointer while hovered.
//! Hosts without WebGPU keep the plain image.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys as web;

mod camera;
mod config;
mod constants;
mod dom;
mod effect;
mod error;
mod events;
mod frame;
mod geometry;
mod input;
mod lifecycle;
mod render;
mod scene;
mod throttle;
mod tween;

pub use config::{EffectConfig, EffectOverrides};
pub use effect::WaveEffect;
pub use error::{EffectError, FailureClass};

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("wave-hover starting");

    let window = web::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    dom::add_page_listener(&window, "beforeunload", effect::destroy_all);
    let doc = document.clone();
    dom::on_ready(&document, move || {
        attach_all_in(&doc);
    });
    Ok(())
}

fn attach_all_in(document: &web::Document) -> u32 {
    let nodes = match document.query_selector_all(constants::IMAGE_SELECTOR) {
        Ok(n) => n,
        Err(e) => {
            log::error!("[wave] selector query failed: {:?}", e);
            return 0;
        }
    };
    let mut attached = 0;
    for i in 0..nodes.length() {
        let Some(el) = nodes.item(i).and_then(|n| n.dyn_into::<web::Element>().ok()) else {
            continue;
        };
        let config = effect::config_from_attribute(&el);
        if WaveEffect::attach(&el, config).is_some() {
            attached += 1;
        }
    }
    log::info!("[wave] attached to {} image(s)", attached);
    attached
}

/// Scan the document again (e.g. after inserting images). Images that already
/// carry a live effect are skipped. Returns the number of new instances.
#[wasm_bindgen(js_name = attachAll)]
pub fn attach_all() -> u32 {
    match dom::window_document() {
        Some(document) => attach_all_in(&document),
        None => 0,
    }
}

/// Tear down every live instance (also run on `beforeunload`).
#[wasm_bindgen(js_name = destroyAll)]
pub fn destroy_all() {
    effect::destroy_all();
}

/// Whether this host can run the effect at all.
#[wasm_bindgen(js_name = gpuSupported)]
pub fn gpu_supported() -> bool {
    web::window()
        .map(|w| dom::gpu_supported(&w))
        .unwrap_or(false)
}
