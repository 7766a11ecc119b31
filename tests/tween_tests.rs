// Host-side tests for the tween engine.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod tween {
    include!("../src/tween.rs");
}

use tween::*;

const EASES: [Ease; 4] = [Ease::Linear, Ease::Power1Out, Ease::Power2Out, Ease::Power3Out];

#[test]
fn eases_hit_endpoints_and_clamp() {
    for e in EASES {
        assert_eq!(e.apply(0.0), 0.0, "{e:?}");
        assert_eq!(e.apply(1.0), 1.0, "{e:?}");
        assert_eq!(e.apply(-3.0), 0.0, "{e:?}");
        assert_eq!(e.apply(7.0), 1.0, "{e:?}");
    }
    assert!((Ease::Power1Out.apply(0.5) - 0.75).abs() < 1e-6);
    assert!((Ease::Linear.apply(0.25) - 0.25).abs() < 1e-6);
}

#[test]
fn default_ease_is_quadratic_power1_out() {
    assert_eq!(Ease::default(), Ease::Power1Out);
    for t in [0.1_f32, 0.3, 0.5, 0.8] {
        let quad = 1.0 - (1.0 - t) * (1.0 - t);
        assert!((Ease::default().apply(t) - quad).abs() < 1e-6, "t={t}");
    }
}

#[test]
fn ease_out_curves_are_monotonic() {
    for e in EASES {
        let mut prev = 0.0;
        for i in 1..=100 {
            let v = e.apply(i as f32 / 100.0);
            assert!(v >= prev, "{e:?} not monotonic at {i}");
            prev = v;
        }
    }
}

#[test]
fn tween_reaches_target_after_duration() {
    let mut v = Tweened::new(0.0);
    v.animate_to(1.0, 10.0, 0.5, Ease::Linear);
    assert_eq!(v.value(), 0.0);

    assert!(v.step(10.25));
    assert!((v.value() - 0.5).abs() < 1e-6);

    assert!(!v.step(10.5));
    assert_eq!(v.value(), 1.0);
    // stepping an idle value changes nothing
    assert!(!v.step(99.0));
    assert_eq!(v.value(), 1.0);
}

#[test]
fn new_tween_replaces_running_one_from_current_value() {
    let mut v = Tweened::new(0.0);
    v.animate_to(1.0, 0.0, 1.0, Ease::Linear);
    v.step(0.4);
    let mid = v.value();
    assert!((mid - 0.4).abs() < 1e-6);

    v.animate_to(0.0, 0.4, 1.0, Ease::Linear);
    v.step(0.4);
    assert!((v.value() - mid).abs() < 1e-6, "no jump when interrupted");
    v.step(0.9);
    assert!((v.value() - mid * 0.5).abs() < 1e-6);
    v.step(1.4);
    assert_eq!(v.value(), 0.0);
}

#[test]
fn zero_duration_snaps() {
    let mut v = Tweened::new(2.0);
    v.animate_to(5.0, 1.0, 0.0, Ease::default());
    assert_eq!(v.value(), 5.0);
    assert!(!v.step(2.0));
    v.animate_to(3.0, 1.0, f64::NAN, Ease::default());
    assert_eq!(v.value(), 3.0);
}

#[test]
fn set_cancels_running_tween() {
    let mut v = Tweened::new(0.0);
    v.animate_to(1.0, 0.0, 1.0, Ease::default());
    v.set(0.3);
    assert!(!v.step(5.0));
    assert_eq!(v.value(), 0.3);
}

#[test]
fn clock_is_monotonic() {
    let clock = Clock::new();
    let a = clock.now();
    let b = clock.now();
    assert!(a >= 0.0);
    assert!(b >= a);
    assert!(clock.now_ms() >= b * 1000.0);
}
