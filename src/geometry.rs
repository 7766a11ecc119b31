// Frustum, aspect and plane-mesh math.

use glam::Vec2;

/// World-space size of the camera's visible area at `distance` from the eye.
///
/// `height = 2 * tan(fov / 2) * distance`, `width = height * aspect`.
pub fn visible_size(fov_degrees: f32, distance: f32, aspect: f32) -> Vec2 {
    let height = 2.0 * (fov_degrees.to_radians() * 0.5).tan() * distance;
    Vec2::new(height * aspect, height)
}

/// Per-axis texture sampling scale that keeps the texture's aspect on a plane
/// of a different aspect. Both components are at most 1.
pub fn aspect_correction(plane_aspect: f32, texture_aspect: f32) -> Vec2 {
    if !(plane_aspect.is_finite() && texture_aspect.is_finite())
        || plane_aspect <= 0.0
        || texture_aspect <= 0.0
    {
        return Vec2::ONE;
    }
    Vec2::new(
        (plane_aspect / texture_aspect).min(1.0),
        (texture_aspect / plane_aspect).min(1.0),
    )
}

/// Horizontal and vertical subdivision counts. The vertical count is
/// proportional to the plane aspect (width / height): `round(horizontal * aspect)`,
/// never below 1.
pub fn segment_counts(horizontal: u32, plane_aspect: f32) -> (u32, u32) {
    let horizontal = horizontal.max(1);
    if !plane_aspect.is_finite() || plane_aspect <= 0.0 {
        return (horizontal, horizontal);
    }
    let vertical = (horizontal as f32 * plane_aspect).round().max(1.0) as u32;
    (horizontal, vertical)
}

/// Device pixel ratio used for the backing store, capped at `max`.
pub fn effective_pixel_ratio(device_ratio: f64, max: f64) -> f64 {
    if device_ratio.is_finite() && device_ratio > 0.0 {
        device_ratio.min(max)
    } else {
        1.0
    }
}

/// Backing-store size in physical pixels for a CSS box.
pub fn backing_size(css_width: f64, css_height: f64, pixel_ratio: f64) -> (u32, u32) {
    let w = (css_width * pixel_ratio).round().max(1.0) as u32;
    let h = (css_height * pixel_ratio).round().max(1.0) as u32;
    (w, h)
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PlaneVertex {
    pub position: [f32; 3],
    pub uv: [f32; 2],
}

/// Indexed triangle list for a subdivided plane centred on the origin in the
/// XY plane, facing +Z. UV `v` is 1 along the top edge.
#[derive(Clone, Debug)]
pub struct PlaneMesh {
    pub vertices: Vec<PlaneVertex>,
    pub indices: Vec<u32>,
}

impl PlaneMesh {
    pub fn new(width: f32, height: f32, width_segments: u32, height_segments: u32) -> Self {
        let gx = width_segments.max(1);
        let gy = height_segments.max(1);
        let seg_w = width / gx as f32;
        let seg_h = height / gy as f32;
        let half_w = width * 0.5;
        let half_h = height * 0.5;

        let mut vertices = Vec::with_capacity(((gx + 1) * (gy + 1)) as usize);
        for iy in 0..=gy {
            let y = half_h - iy as f32 * seg_h;
            for ix in 0..=gx {
                let x = ix as f32 * seg_w - half_w;
                vertices.push(PlaneVertex {
                    position: [x, y, 0.0],
                    uv: [ix as f32 / gx as f32, 1.0 - iy as f32 / gy as f32],
                });
            }
        }

        let row = gx + 1;
        let mut indices = Vec::with_capacity((gx * gy * 6) as usize);
        for iy in 0..gy {
            for ix in 0..gx {
                let a = ix + row * iy;
                let b = ix + row * (iy + 1);
                let c = (ix + 1) + row * (iy + 1);
                let d = (ix + 1) + row * iy;
                indices.extend_from_slice(&[a, b, d, b, c, d]);
            }
        }

        Self { vertices, indices }
    }

    #[inline]
    pub fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }
}
