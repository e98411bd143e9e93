//! Fill colour carried by floating bars.
use serde::{Deserialize, Serialize};

/// Linear RGBA colour applied to a bar's fill.
///
/// The core stays free of any renderer colour type; the `ui` feature converts
/// this into a Bevy `Color` at the presentation edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FillColor {
    /// Red channel in linear space.
    pub red: f32,
    /// Green channel in linear space.
    pub green: f32,
    /// Blue channel in linear space.
    pub blue: f32,
    /// Alpha channel, multiplied by the bar opacity when presented.
    pub alpha: f32,
}

impl FillColor {
    /// The standard alert colour used when no fill colour is supplied.
    pub const RED: Self = Self::rgb(1.0, 0.0, 0.0);
    /// Opaque green, handy for friendly units or progress meters.
    pub const GREEN: Self = Self::rgb(0.0, 1.0, 0.0);
    /// Opaque white.
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);

    /// Builds an opaque colour from linear channels.
    #[must_use]
    pub const fn rgb(red: f32, green: f32, blue: f32) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    /// Builds a colour from linear channels and alpha.
    #[must_use]
    pub const fn rgba(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }
}

impl Default for FillColor {
    fn default() -> Self {
        Self::RED
    }
}

#[cfg(feature = "ui")]
impl From<FillColor> for bevy::prelude::Color {
    fn from(color: FillColor) -> Self {
        Self::linear_rgba(color.red, color.green, color.blue, color.alpha)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_alert_red() {
        assert_eq!(FillColor::default(), FillColor::RED);
        assert_eq!(FillColor::RED, FillColor::rgba(1.0, 0.0, 0.0, 1.0));
    }

    #[test]
    fn deserialises_from_channel_map() {
        let parsed: Result<FillColor, _> =
            serde_json::from_str(r#"{"red":0.0,"green":0.5,"blue":1.0,"alpha":0.75}"#);
        assert!(
            matches!(parsed, Ok(color) if color == FillColor::rgba(0.0, 0.5, 1.0, 0.75)),
            "unexpected parse result: {parsed:?}"
        );
    }
}
