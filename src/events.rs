use crate::dom::{self, Listener, ResizeWatch};
use crate::effect::Shared;
use crate::error::EffectError;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Attach pointer enter/move/leave on the wrapper. Each listener is handed to
/// `shared` as soon as it is attached so teardown can remove it.
pub(crate) fn wire_pointer(shared: &Rc<Shared>, wrapper: &web::HtmlElement) -> Result<(), EffectError> {
    let target: &web::EventTarget = wrapper.as_ref();

    let weak = Rc::downgrade(shared);
    shared.push_listener(Listener::attach(target, "pointerenter", move |_ev| {
        if let Some(s) = weak.upgrade() {
            s.on_enter();
        }
    })?);

    let weak = Rc::downgrade(shared);
    shared.push_listener(Listener::attach(target, "pointermove", move |ev| {
        let Some(ev) = ev.dyn_ref::<web::MouseEvent>() else {
            return;
        };
        if let Some(s) = weak.upgrade() {
            s.on_move(ev.client_x() as f64, ev.client_y() as f64);
        }
    })?);

    let weak = Rc::downgrade(shared);
    shared.push_listener(Listener::attach(target, "pointerleave", move |_ev| {
        if let Some(s) = weak.upgrade() {
            s.on_leave();
        }
    })?);
    Ok(())
}

/// Observe the container's size, if the host has `ResizeObserver`.
pub(crate) fn wire_resize(
    shared: &Rc<Shared>,
    window: &web::Window,
    container: &web::Element,
) -> Result<Option<ResizeWatch>, EffectError> {
    if !dom::resize_observer_supported(window) {
        log::debug!("[wave] no ResizeObserver; size is fixed");
        return Ok(None);
    }
    let weak = Rc::downgrade(shared);
    ResizeWatch::observe(container, move |width, height| {
        if let Some(s) = weak.upgrade() {
            s.on_resize(width, height);
        }
    })
    .map(Some)
}
