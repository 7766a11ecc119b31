// Host-side tests for camera rays and plane picking.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}
mod geometry {
    include!("../src/geometry.rs");
}
mod camera {
    include!("../src/camera.rs");
}
mod input {
    include!("../src/input.rs");
}

use camera::*;
use glam::{Vec2, Vec3};
use input::*;

fn approx(a: Vec2, b: Vec2) -> bool {
    (a - b).length() < 1e-3
}

#[test]
fn camera_plane_matches_frustum_helper() {
    let cam = PerspectiveCamera::new(50.0, 1.5, 50.0);
    let size = cam.visible_size();
    let expected = geometry::visible_size(50.0, 50.0, 1.5);
    assert!(approx(size, expected));
    assert_eq!(cam.eye(), Vec3::new(0.0, 0.0, 50.0));
}

#[test]
fn center_ray_points_down_the_axis_and_hits_plane_center() {
    let cam = PerspectiveCamera::new(50.0, 1.5, 50.0);
    let ray = cam.ray_through_ndc(Vec2::ZERO);
    assert!((ray.direction - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-4);
    let uv = pick_plane_uv(&ray, cam.visible_size(), Vec2::ZERO, 1.0).unwrap();
    assert!(approx(uv, Vec2::new(0.5, 0.5)));
}

#[test]
fn off_center_ray_maps_to_matching_uv() {
    let cam = PerspectiveCamera::new(50.0, 2.0, 50.0);
    let ray = cam.ray_through_ndc(Vec2::new(0.5, -0.5));
    let uv = pick_plane_uv(&ray, cam.visible_size(), Vec2::ZERO, 1.0).unwrap();
    assert!(approx(uv, Vec2::new(0.75, 0.25)), "uv={uv:?}");
}

#[test]
fn scaled_or_shifted_plane_changes_the_hit() {
    let cam = PerspectiveCamera::new(50.0, 1.0, 50.0);
    let size = cam.visible_size();
    // half-size plane: pointer near the edge of the frustum misses
    let ray = cam.ray_through_ndc(Vec2::new(0.9, 0.0));
    assert!(pick_plane_uv(&ray, size, Vec2::ZERO, 0.5).is_none());
    // hover scale > 1 pulls the uv toward the center
    let uv = pick_plane_uv(&ray, size, Vec2::ZERO, 1.05).unwrap();
    assert!(uv.x < 0.95 && uv.x > 0.9);
    // shifted right by a quarter width: the center ray lands left of the middle
    let center = cam.ray_through_ndc(Vec2::ZERO);
    let uv = pick_plane_uv(&center, size, Vec2::new(size.x * 0.25, 0.0), 1.0).unwrap();
    assert!(approx(uv, Vec2::new(0.25, 0.5)));
}

#[test]
fn parallel_or_backward_rays_miss() {
    let size = Vec2::new(10.0, 10.0);
    let parallel = Ray {
        origin: Vec3::new(0.0, 0.0, 5.0),
        direction: Vec3::X,
    };
    assert!(pick_plane_uv(&parallel, size, Vec2::ZERO, 1.0).is_none());
    let away = Ray {
        origin: Vec3::new(0.0, 0.0, 5.0),
        direction: Vec3::Z,
    };
    assert!(pick_plane_uv(&away, size, Vec2::ZERO, 1.0).is_none());
}

#[test]
fn pointer_ndc_relative_to_box() {
    let c = pointer_to_ndc(150.0, 100.0, 0.0, 0.0, 300.0, 200.0).unwrap();
    assert!(approx(c, Vec2::ZERO));
    let tl = pointer_to_ndc(10.0, 20.0, 10.0, 20.0, 300.0, 200.0).unwrap();
    assert!(approx(tl, Vec2::new(-1.0, 1.0)));
    let br = pointer_to_ndc(310.0, 220.0, 10.0, 20.0, 300.0, 200.0).unwrap();
    assert!(approx(br, Vec2::new(1.0, -1.0)));
    assert!(pointer_to_ndc(1.0, 1.0, 0.0, 0.0, 0.0, 200.0).is_none());
}

#[test]
fn parallax_is_proportional_to_pointer() {
    let size = Vec2::new(40.0, 20.0);
    let a = parallax_offset(Vec2::new(0.5, -0.5), size, 0.1);
    let b = parallax_offset(Vec2::new(1.0, -1.0), size, 0.1);
    assert!(approx(a * 2.0, b));
    assert!(approx(b, Vec2::new(2.0, -1.0)));
    assert_eq!(parallax_offset(Vec2::ZERO, size, 0.1), Vec2::ZERO);
}

#[test]
fn plane_corners_project_to_ndc_corners() {
    let cam = PerspectiveCamera::new(50.0, 1.5, 50.0);
    let half = cam.visible_size() * 0.5;
    let vp = cam.view_projection();
    let p = vp.project_point3(Vec3::new(half.x, half.y, 0.0));
    assert!((p.x - 1.0).abs() < 1e-4 && (p.y - 1.0).abs() < 1e-4, "p={p:?}");
    let q = vp.project_point3(Vec3::new(-half.x, -half.y, 0.0));
    assert!((q.x + 1.0).abs() < 1e-4 && (q.y + 1.0).abs() < 1e-4, "q={q:?}");
    // depth stays inside the 0..1 clip range used by wgpu
    assert!(p.z > 0.0 && p.z < 1.0);
}
