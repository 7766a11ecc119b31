// Host-side tests for cancellation and the failure taxonomy.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod error {
    include!("../src/error.rs");
}
mod lifecycle {
    include!("../src/lifecycle.rs");
}

use error::*;
use lifecycle::*;

#[test]
fn destroy_is_idempotent() {
    let lc = Lifecycle::new();
    assert!(!lc.is_destroyed());
    assert!(lc.destroy());
    assert!(!lc.destroy());
    assert!(lc.is_destroyed());
}

#[test]
fn clones_observe_the_same_flag() {
    let owner = Lifecycle::new();
    let continuation = owner.clone();
    assert!(continuation.ensure_live().is_ok());
    owner.destroy();
    assert!(matches!(
        continuation.ensure_live(),
        Err(EffectError::Cancelled)
    ));
}

#[test]
fn failure_classes() {
    use FailureClass::*;
    let cases = [
        (EffectError::GpuUnavailable, CapabilityMissing),
        (EffectError::NotAnImage, Precondition),
        (
            EffectError::MissingContainer {
                selector: ".picture-wrapper",
            },
            Precondition,
        ),
        (
            EffectError::ZeroSize {
                width: 0.0,
                height: 10.0,
            },
            Precondition,
        ),
        (EffectError::ImageLoad("404".into()), ResourceLoad),
        (EffectError::TextureLoad("tainted".into()), ResourceLoad),
        (EffectError::Dom("boom".into()), Internal),
        (EffectError::NoWindow, Internal),
        (EffectError::Renderer(anyhow::anyhow!("no adapter")), Internal),
        (EffectError::Cancelled, Cancelled),
    ];
    for (err, class) in cases {
        assert_eq!(err.class(), class, "{err}");
    }
}

#[test]
fn only_capability_and_cancellation_skip_teardown() {
    assert!(!EffectError::GpuUnavailable.needs_teardown());
    assert!(!EffectError::Cancelled.needs_teardown());
    assert!(EffectError::ZeroSize {
        width: 0.0,
        height: 0.0
    }
    .needs_teardown());
    assert!(EffectError::TextureLoad("x".into()).needs_teardown());
    assert!(EffectError::Renderer(anyhow::anyhow!("lost")).needs_teardown());
}

#[test]
fn messages_name_the_problem() {
    let e = EffectError::MissingContainer {
        selector: ".picture-wrapper",
    };
    assert!(e.to_string().contains(".picture-wrapper"));
    let e = EffectError::Renderer(anyhow::anyhow!("No WebGPU adapter"));
    assert!(e.to_string().contains("No WebGPU adapter"));
}
