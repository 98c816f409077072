use std::str::FromStr;

use bytemuck::{Pod, Zeroable};
use serde::Serialize;

use crate::error::OrbitalError;

/// Amber end of the black/orange legend, 8-bit (245, 158, 11).
const AMBER: [f32; 3] = [245.0 / 255.0, 158.0 / 255.0, 11.0 / 255.0];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ColorScheme {
    #[default]
    RedBlue,
    GreenTransparency,
    BlackOrange,
}

impl ColorScheme {
    /// Lenient lookup: unset or unknown names fall back to red/blue.
    pub fn from_name(value: Option<&str>) -> Self {
        value
            .and_then(|name| name.parse().ok())
            .unwrap_or_default()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ColorScheme::RedBlue => "redBlue",
            ColorScheme::GreenTransparency => "greenTransparency",
            ColorScheme::BlackOrange => "blackOrange",
        }
    }
}

impl FromStr for ColorScheme {
    type Err = OrbitalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace(|c: char| c == '-' || c == '_', "").as_str() {
            "redblue" => Ok(ColorScheme::RedBlue),
            "greentransparency" => Ok(ColorScheme::GreenTransparency),
            "blackorange" => Ok(ColorScheme::BlackOrange),
            _ => Err(OrbitalError::UnknownScheme(s.to_string())),
        }
    }
}

/// Straight RGBA, each channel in [0, 1].
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable, Serialize)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    /// Marks a point whose density was not finite.
    pub const DEGENERATE: Rgba = Rgba::new(0.0, 0.0, 0.0, 0.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Rgba { r, g, b, a }
    }

    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// Map a normalised intensity to a colour. Intensity is clamped to [0, 1]
/// first; NaN counts as 0.
pub fn map_color(intensity: f32, scheme: ColorScheme) -> Rgba {
    let t = if intensity.is_nan() {
        0.0
    } else {
        intensity.clamp(0.0, 1.0)
    };

    match scheme {
        ColorScheme::RedBlue => Rgba::new(1.0 - t, 0.0, t, 1.0),
        ColorScheme::GreenTransparency => Rgba::new(0.0, t, 0.0, t),
        ColorScheme::BlackOrange => Rgba::new(AMBER[0] * t, AMBER[1] * t, AMBER[2] * t, 1.0),
    }
}

/// 8-bit red/blue ramp for density slices: red rises and blue falls around 0.5.
pub fn heatmap_color(value: f32) -> [u8; 3] {
    let channel = |v: f32| (v * 2.0 * 255.0).clamp(0.0, 255.0) as u8;
    [channel(value), 0, channel(1.0 - value)]
}
