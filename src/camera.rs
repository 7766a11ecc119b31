use crate::constants::{CAMERA_FAR, CAMERA_NEAR};
use crate::geometry;
use glam::{Mat4, Vec2, Vec3};

/// Perspective camera on the +Z axis looking at the origin, where the plane sits.
#[derive(Clone, Debug, PartialEq)]
pub struct PerspectiveCamera {
    pub fov_degrees: f32,
    pub aspect: f32,
    pub distance: f32,
    pub near: f32,
    pub far: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl PerspectiveCamera {
    pub fn new(fov_degrees: f32, aspect: f32, distance: f32) -> Self {
        Self {
            fov_degrees,
            aspect,
            distance,
            near: CAMERA_NEAR,
            far: CAMERA_FAR.max(distance * 2.0),
        }
    }

    #[inline]
    pub fn eye(&self) -> Vec3 {
        Vec3::new(0.0, 0.0, self.distance)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(
            self.fov_degrees.to_radians(),
            self.aspect,
            self.near,
            self.far,
        )
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye(), Vec3::ZERO, Vec3::Y)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Size of the visible area in the z = 0 plane.
    pub fn visible_size(&self) -> Vec2 {
        geometry::visible_size(self.fov_degrees, self.distance, self.aspect)
    }

    /// World-space ray from the eye through a point in normalized device coordinates.
    ///
    /// The view has no rotation, so the direction comes straight from the
    /// frustum slopes instead of unprojecting through the inverse matrix.
    pub fn ray_through_ndc(&self, ndc: Vec2) -> Ray {
        let slope = (self.fov_degrees.to_radians() * 0.5).tan();
        Ray {
            origin: self.eye(),
            direction: Vec3::new(ndc.x * slope * self.aspect, ndc.y * slope, -1.0).normalize(),
        }
    }
}
