use crate::camera::Ray;
use glam::Vec2;

/// Convert viewport pointer coordinates into NDC relative to a box.
///
/// x grows right and y grows up, both in -1..1 inside the box. Returns `None`
/// for a degenerate box.
#[inline]
pub fn pointer_to_ndc(
    client_x: f64,
    client_y: f64,
    left: f64,
    top: f64,
    width: f64,
    height: f64,
) -> Option<Vec2> {
    if width <= 0.0 || height <= 0.0 {
        return None;
    }
    let x = ((client_x - left) / width) * 2.0 - 1.0;
    let y = -((client_y - top) / height) * 2.0 + 1.0;
    Some(Vec2::new(x as f32, y as f32))
}

/// Intersect a ray with the plane mesh lying in z = 0 and return the surface
/// UV of the hit (v = 1 at the top edge), or `None` on a miss.
///
/// The mesh is translated by `offset` and uniformly scaled by `scale`;
/// shader displacement is ignored, matching the undisplaced CPU geometry.
pub fn pick_plane_uv(ray: &Ray, size: Vec2, offset: Vec2, scale: f32) -> Option<Vec2> {
    if ray.direction.z.abs() < 1e-6 || scale <= 0.0 {
        return None;
    }
    let t = -ray.origin.z / ray.direction.z;
    if t < 0.0 {
        return None;
    }
    let hit = ray.origin + ray.direction * t;
    let local = (hit.truncate() - offset) / scale;
    let uv = local / size + Vec2::splat(0.5);
    let inside = (0.0..=1.0).contains(&uv.x) && (0.0..=1.0).contains(&uv.y);
    inside.then_some(uv)
}

/// Parallax target for the mesh given the pointer's NDC position.
#[inline]
pub fn parallax_offset(ndc: Vec2, plane_size: Vec2, factor: f32) -> Vec2 {
    ndc * plane_size * 0.5 * factor
}
