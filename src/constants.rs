/// Page wiring and interaction tuning constants.
///
/// Values that callers may want to change per image live in `EffectConfig`;
/// everything here is fixed for the crate.
// Page discovery
pub const IMAGE_SELECTOR: &str = "img.wave-image";
pub const CONTAINER_SELECTOR: &str = ".picture-wrapper";
pub const WRAPPER_CLASS: &str = "wave-effect-wrapper";
pub const OPTIONS_ATTRIBUTE: &str = "data-wave-options";

// Pointer-move is a timing gate: calls inside the window are dropped.
pub const POINTER_THROTTLE_MS: f64 = 16.0;

// Backing store never exceeds 2x the CSS size, even on 3x displays
pub const MAX_PIXEL_RATIO: f64 = 2.0;

// Camera clip planes (world units)
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 1000.0;

// Parallax offset as a fraction of the plane's half-extent per unit of NDC
pub const PARALLAX_FACTOR: f32 = 0.04;

// Hover scale and position tween back to these on leave
pub const REST_SCALE: f32 = 1.0;
pub const REST_HOVER: f32 = 0.0;
pub const FULL_HOVER: f32 = 1.0;

// Distortion center before the first pointer move (plane middle)
pub const DEFAULT_MOUSE_UV: [f32; 2] = [0.5, 0.5];
