// Per-image effect options.
//
// `EffectConfig` is built once per controller from defaults plus optional
// caller overrides and is never mutated afterwards.

use serde::Deserialize;

#[derive(Clone, Debug, PartialEq)]
pub struct EffectConfig {
    /// Vertical field of view in degrees.
    pub fov: f32,
    /// Camera distance from the plane (world units).
    pub camera_distance: f32,
    /// Horizontal subdivisions of the plane; the vertical count follows the aspect.
    pub segments: u32,
    /// Distortion falloff radius in UV units.
    pub hover_radius: f32,
    pub wave_speed: f32,
    pub wave_amplitude: f32,
    /// Time accumulator increment per rendered frame.
    pub animation_speed: f32,
    pub hover_scale: f32,
    /// CSS hex color (`#rgb`, `#rrggbb` or `#rrggbbaa`).
    pub background_color: String,
    /// Duration of every hover transition, in seconds.
    pub transition_duration: f32,
}

impl Default for EffectConfig {
    fn default() -> Self {
        Self {
            fov: 50.0,
            camera_distance: 50.0,
            segments: 64,
            hover_radius: 0.35,
            wave_speed: 3.0,
            wave_amplitude: 1.2,
            animation_speed: 0.05,
            hover_scale: 1.05,
            background_color: "#ffffff".to_string(),
            transition_duration: 0.6,
        }
    }
}

/// Caller-supplied partial configuration. Absent fields keep their defaults.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EffectOverrides {
    pub fov: Option<f32>,
    pub camera_distance: Option<f32>,
    pub segments: Option<u32>,
    pub hover_radius: Option<f32>,
    pub wave_speed: Option<f32>,
    pub wave_amplitude: Option<f32>,
    pub animation_speed: Option<f32>,
    pub hover_scale: Option<f32>,
    pub background_color: Option<String>,
    pub transition_duration: Option<f32>,
}

impl EffectConfig {
    pub fn merged(overrides: EffectOverrides) -> Self {
        let d = Self::default();
        Self {
            fov: overrides.fov.unwrap_or(d.fov),
            camera_distance: overrides.camera_distance.unwrap_or(d.camera_distance),
            segments: overrides.segments.unwrap_or(d.segments),
            hover_radius: overrides.hover_radius.unwrap_or(d.hover_radius),
            wave_speed: overrides.wave_speed.unwrap_or(d.wave_speed),
            wave_amplitude: overrides.wave_amplitude.unwrap_or(d.wave_amplitude),
            animation_speed: overrides.animation_speed.unwrap_or(d.animation_speed),
            hover_scale: overrides.hover_scale.unwrap_or(d.hover_scale),
            background_color: overrides.background_color.unwrap_or(d.background_color),
            transition_duration: overrides
                .transition_duration
                .unwrap_or(d.transition_duration),
        }
    }

    /// Parse a JSON object of overrides and merge it with the defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let overrides: EffectOverrides = serde_json::from_str(json)?;
        Ok(Self::merged(overrides))
    }

    /// Background color as linear RGBA in 0..1; unparsable colors fall back to white.
    pub fn background_rgba(&self) -> [f64; 4] {
        match parse_hex_color(&self.background_color) {
            Some(c) => c,
            None => {
                log::warn!(
                    "[wave] unrecognised background color {:?}, using white",
                    self.background_color
                );
                [1.0, 1.0, 1.0, 1.0]
            }
        }
    }
}

/// Parse `#rgb`, `#rrggbb` or `#rrggbbaa` into RGBA components in 0..1.
pub fn parse_hex_color(input: &str) -> Option<[f64; 4]> {
    let hex = input.trim().strip_prefix('#')?;
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |s: &str| u8::from_str_radix(s, 16).ok().map(|v| v as f64 / 255.0);
    match hex.len() {
        3 => {
            let mut out = [1.0; 4];
            for (i, c) in hex.chars().enumerate() {
                let digit = c.to_digit(16)? as f64;
                out[i] = (digit * 17.0) / 255.0;
            }
            Some(out)
        }
        6 | 8 => {
            let r = channel(&hex[0..2])?;
            let g = channel(&hex[2..4])?;
            let b = channel(&hex[4..6])?;
            let a = if hex.len() == 8 {
                channel(&hex[6..8])?
            } else {
                1.0
            };
            Some([r, g, b, a])
        }
        _ => None,
    }
}
