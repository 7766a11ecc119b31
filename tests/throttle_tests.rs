// Host-side tests for the pointer-move rate limiter.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod throttle {
    include!("../src/throttle.rs");
}

use throttle::*;

#[test]
fn first_call_passes() {
    let mut t = Throttle::new(16.0);
    assert!(t.try_pass(1234.0));
}

#[test]
fn bursts_collapse_to_first_call_per_window() {
    let mut t = Throttle::new(16.0);
    let calls = [0.0, 4.0, 8.0, 12.0, 15.9, 16.0, 20.0, 31.9, 32.0, 40.0];
    let passed: Vec<f64> = calls.iter().copied().filter(|&ms| t.try_pass(ms)).collect();
    assert_eq!(passed, vec![0.0, 16.0, 32.0]);
}

#[test]
fn dropped_calls_are_not_deferred() {
    let mut t = Throttle::new(16.0);
    assert!(t.try_pass(0.0));
    assert!(!t.try_pass(10.0));
    // the window is anchored to the accepted call, not the dropped one
    assert!(t.try_pass(16.5));
}

#[test]
fn reset_opens_a_new_window() {
    let mut t = Throttle::new(16.0);
    assert!(t.try_pass(100.0));
    assert!(!t.try_pass(101.0));
    t.reset();
    assert!(t.try_pass(102.0));
}
