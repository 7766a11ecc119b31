// Platform-independent scene state: the plane's animated transform, the
// interaction state and the uniform block handed to the wave shader.

use crate::camera::PerspectiveCamera;
use crate::config::EffectConfig;
use crate::constants::{DEFAULT_MOUSE_UV, FULL_HOVER, POINTER_THROTTLE_MS, REST_HOVER, REST_SCALE};
use crate::geometry;
use crate::throttle::Throttle;
use crate::tween::{Ease, Tweened};
use glam::{Mat4, Vec2, Vec3};

/// Animated properties of the plane mesh.
#[derive(Clone, Debug)]
pub struct PlaneState {
    pub size: Vec2,
    pub hover: Tweened,
    pub scale: Tweened,
    pub offset_x: Tweened,
    pub offset_y: Tweened,
}

impl PlaneState {
    pub fn new(size: Vec2) -> Self {
        Self {
            size,
            hover: Tweened::new(REST_HOVER),
            scale: Tweened::new(REST_SCALE),
            offset_x: Tweened::new(0.0),
            offset_y: Tweened::new(0.0),
        }
    }

    #[inline]
    pub fn offset(&self) -> Vec2 {
        Vec2::new(self.offset_x.value(), self.offset_y.value())
    }

    pub fn model_matrix(&self) -> Mat4 {
        let s = self.scale.value();
        Mat4::from_translation(self.offset().extend(0.0)) * Mat4::from_scale(Vec3::new(s, s, 1.0))
    }

    /// Advance every running tween; returns whether any is still running.
    pub fn step(&mut self, now: f64) -> bool {
        let a = self.hover.step(now);
        let b = self.scale.step(now);
        let c = self.offset_x.step(now);
        let d = self.offset_y.step(now);
        a || b || c || d
    }

    /// Hover uniform to 1 and scale to `hover_scale`, concurrently.
    pub fn enter(&mut self, now: f64, hover_scale: f32, duration: f64) {
        self.hover
            .animate_to(FULL_HOVER, now, duration, Ease::default());
        self.scale
            .animate_to(hover_scale, now, duration, Ease::default());
    }

    pub fn move_toward(&mut self, target: Vec2, now: f64, duration: f64) {
        self.offset_x
            .animate_to(target.x, now, duration, Ease::default());
        self.offset_y
            .animate_to(target.y, now, duration, Ease::default());
    }

    /// Position back to origin, scale to 1, hover uniform to 0.
    pub fn leave(&mut self, now: f64, duration: f64) {
        self.move_toward(Vec2::ZERO, now, duration);
        self.scale
            .animate_to(REST_SCALE, now, duration, Ease::default());
        self.hover
            .animate_to(REST_HOVER, now, duration, Ease::default());
    }
}

/// Pointer and time state touched by the event handlers and the frame loop.
#[derive(Clone, Debug)]
pub struct Interaction {
    pub hovering: bool,
    pub mouse_uv: Vec2,
    pub time: f32,
    move_gate: Throttle,
}

impl Default for Interaction {
    fn default() -> Self {
        Self {
            hovering: false,
            mouse_uv: Vec2::from_array(DEFAULT_MOUSE_UV),
            time: 0.0,
            move_gate: Throttle::new(POINTER_THROTTLE_MS),
        }
    }
}

impl Interaction {
    /// One frame's worth of time accumulation.
    #[inline]
    pub fn advance(&mut self, increment: f32) -> f32 {
        self.time += increment;
        self.time
    }

    pub fn enter(&mut self) {
        self.hovering = true;
    }

    /// Clears hovering and reopens the move gate for the next hover.
    pub fn leave(&mut self) {
        self.hovering = false;
        self.move_gate.reset();
    }

    /// Whether a pointer move at `now_ms` should be processed. Moves outside
    /// a hover never consume the rate-limit window.
    pub fn admit_move(&mut self, now_ms: f64) -> bool {
        self.hovering && self.move_gate.try_pass(now_ms)
    }
}

/// CSS size of the render surface plus the pixel ratio of its backing store.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub css_width: f64,
    pub css_height: f64,
    pub pixel_ratio: f64,
}

impl Viewport {
    pub fn new(css_width: f64, css_height: f64, pixel_ratio: f64) -> Self {
        Self {
            css_width,
            css_height,
            pixel_ratio,
        }
    }

    #[inline]
    pub fn aspect(&self) -> f32 {
        (self.css_width / self.css_height) as f32
    }

    #[inline]
    pub fn backing_size(&self) -> (u32, u32) {
        geometry::backing_size(self.css_width, self.css_height, self.pixel_ratio)
    }

    /// Apply a container resize to the viewport and camera together.
    ///
    /// Zero (or non-finite) dimensions are ignored and leave both untouched.
    /// The plane geometry is left as built.
    pub fn apply_resize(&mut self, camera: &mut PerspectiveCamera, width: f64, height: f64) -> bool {
        if !(width.is_finite() && height.is_finite()) || width <= 0.0 || height <= 0.0 {
            return false;
        }
        self.css_width = width;
        self.css_height = height;
        camera.aspect = self.aspect();
        true
    }
}

/// Filters container size notifications down to real changes.
///
/// `ResizeObserver` reports the current size as soon as observation starts;
/// that first report only sets the baseline. Repeats of the last size and
/// zero or non-finite sizes are dropped.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ResizeFilter {
    last: Option<(f64, f64)>,
}

impl ResizeFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if `width`x`height` should be applied.
    pub fn accept(&mut self, width: f64, height: f64) -> bool {
        if !(width.is_finite() && height.is_finite()) || width <= 0.0 || height <= 0.0 {
            return false;
        }
        match self.last.replace((width, height)) {
            None => false,
            Some(prev) => prev != (width, height),
        }
    }
}

/// Shader parameters fixed once the texture is known.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MaterialParams {
    pub ratio: Vec2,
    pub radius: f32,
    pub speed: f32,
    pub amplitude: f32,
}

impl MaterialParams {
    pub fn new(config: &EffectConfig, plane_size: Vec2, texture_size: Vec2) -> Self {
        let plane_aspect = plane_size.x / plane_size.y;
        let texture_aspect = texture_size.x / texture_size.y;
        Self {
            ratio: geometry::aspect_correction(plane_aspect, texture_aspect),
            radius: config.hover_radius,
            speed: config.wave_speed,
            amplitude: config.wave_amplitude,
        }
    }
}

/// Uniform block layout shared with `shaders/wave.wgsl` (176 bytes).
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct WaveUniforms {
    pub view_proj: [[f32; 4]; 4],
    pub model: [[f32; 4]; 4],
    pub mouse: [f32; 2],
    pub ratio: [f32; 2],
    pub hover: f32,
    pub time: f32,
    pub radius: f32,
    pub speed: f32,
    pub amplitude: f32,
    pub _pad: [f32; 3],
}

impl WaveUniforms {
    pub fn compose(
        camera: &PerspectiveCamera,
        plane: &PlaneState,
        interaction: &Interaction,
        material: &MaterialParams,
    ) -> Self {
        Self {
            view_proj: camera.view_projection().to_cols_array_2d(),
            model: plane.model_matrix().to_cols_array_2d(),
            mouse: interaction.mouse_uv.to_array(),
            ratio: material.ratio.to_array(),
            hover: plane.hover.value(),
            time: interaction.time,
            radius: material.radius,
            speed: material.speed,
            amplitude: material.amplitude,
            _pad: [0.0; 3],
        }
    }
}
