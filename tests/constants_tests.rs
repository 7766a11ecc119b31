// Host-side tests for constants and their relationships.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}
mod config {
    include!("../src/config.rs");
}

use constants::*;

#[test]
#[allow(clippy::assertions_on_constants)]
fn throttle_window_is_about_one_frame() {
    assert!(POINTER_THROTTLE_MS > 0.0);
    assert!(POINTER_THROTTLE_MS <= 1000.0 / 60.0 + 0.5);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn clip_planes_bracket_the_default_camera() {
    let cfg = config::EffectConfig::default();
    assert!(CAMERA_NEAR > 0.0);
    assert!(CAMERA_NEAR < cfg.camera_distance);
    assert!(cfg.camera_distance < CAMERA_FAR);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn hover_range_and_rest_values() {
    assert!(FULL_HOVER > REST_HOVER);
    assert_eq!(REST_SCALE, 1.0);
    assert!(MAX_PIXEL_RATIO >= 1.0);
    assert!(PARALLAX_FACTOR > 0.0 && PARALLAX_FACTOR < 1.0);
    assert_eq!(DEFAULT_MOUSE_UV, [0.5, 0.5]);
}

#[test]
fn selectors_are_class_scoped() {
    assert!(IMAGE_SELECTOR.starts_with("img."));
    assert!(CONTAINER_SELECTOR.starts_with('.'));
    assert!(!WRAPPER_CLASS.contains(' '));
    assert!(OPTIONS_ATTRIBUTE.starts_with("data-"));
}
