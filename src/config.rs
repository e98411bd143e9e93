//! Runtime configuration for floating bars.
//!
//! [`FloatingBarSettings`] is a Bevy resource. `FloatingBarPlugin` only
//! initialises it when absent, so inserting a customised value before adding
//! the plugin overrides the defaults. Settings can also be read from JSON;
//! missing fields fall back to their defaults.

use std::fs;
use std::path::{Path, PathBuf};

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::color::FillColor;
use crate::visibility::Smoothing;
use crate::{
    DEFAULT_BAR_HEIGHT, DEFAULT_BAR_WIDTH, DEFAULT_TRANSITION_SPEED, DEFAULT_VISIBLE_RADIUS,
};

/// Failure reading or validating [`FloatingBarSettings`].
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The settings file could not be read.
    #[error("failed to read settings from {}: {source}", path.display())]
    Read {
        /// File that was being read.
        path: PathBuf,
        /// Underlying I/O failure.
        source: std::io::Error,
    },
    /// The settings document is not valid JSON for this schema.
    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
    /// `visible_radius` is negative or `NaN`.
    #[error("visible_radius must be a non-negative number, got {0}")]
    InvalidRadius(f32),
    /// `transition_speed` is negative, infinite or `NaN`.
    #[error("transition_speed must be a finite non-negative number, got {0}")]
    InvalidSpeed(f32),
    /// `bar_width` or `bar_height` is not a positive finite number.
    #[error("bar size must be positive and finite, got {width}x{height}")]
    InvalidBarSize {
        /// Configured width.
        width: f32,
        /// Configured height.
        height: f32,
    },
}

/// Defaults applied to every bar spawned through the plugin.
///
/// # Examples
///
/// ```
/// use floatbar::config::FloatingBarSettings;
///
/// let settings = FloatingBarSettings::from_json_str(r#"{ "visible_radius": 900.0 }"#).unwrap();
/// assert_eq!(settings.visible_radius, 900.0);
/// assert_eq!(settings.transition_speed, 5.0);
/// ```
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FloatingBarSettings {
    /// Distance from the viewer beyond which bars fade out.
    pub visible_radius: f32,
    /// Opacity transition speed per second.
    pub transition_speed: f32,
    /// Smoothing law for opacity transitions.
    pub smoothing: Smoothing,
    /// Fill colour used when a spawn request does not name one.
    pub default_fill_color: FillColor,
    /// Whether bars are despawned once the entity they follow is despawned.
    pub despawn_orphaned: bool,
    /// Bar width in logical pixels.
    pub bar_width: f32,
    /// Bar height in logical pixels.
    pub bar_height: f32,
}

impl Default for FloatingBarSettings {
    fn default() -> Self {
        Self {
            visible_radius: DEFAULT_VISIBLE_RADIUS,
            transition_speed: DEFAULT_TRANSITION_SPEED,
            smoothing: Smoothing::default(),
            default_fill_color: FillColor::default(),
            despawn_orphaned: true,
            bar_width: DEFAULT_BAR_WIDTH,
            bar_height: DEFAULT_BAR_HEIGHT,
        }
    }
}

impl FloatingBarSettings {
    /// Parses and validates settings from a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Parse`] for malformed documents and the
    /// validation variants for out-of-range values.
    pub fn from_json_str(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reads settings from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Read`] when the file cannot be read, otherwise
    /// the errors of [`Self::from_json_str`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path_ref = path.as_ref();
        let json = fs::read_to_string(path_ref).map_err(|source| SettingsError::Read {
            path: path_ref.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Checks that every tunable is in range.
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.visible_radius.is_nan() || self.visible_radius < 0.0 {
            return Err(SettingsError::InvalidRadius(self.visible_radius));
        }
        if !self.transition_speed.is_finite() || self.transition_speed < 0.0 {
            return Err(SettingsError::InvalidSpeed(self.transition_speed));
        }
        let size_ok = |value: f32| value.is_finite() && value > 0.0;
        if !size_ok(self.bar_width) || !size_ok(self.bar_height) {
            return Err(SettingsError::InvalidBarSize {
                width: self.bar_width,
                height: self.bar_height,
            });
        }
        Ok(())
    }
}
