//! Presentation surface consumed by indicators.
//!
//! The surface is whatever the host UI draws: a `bevy_ui` node pair, an
//! immediate-mode overlay, or a plain record inspected by tests. Indicators
//! only ever write to it.

use glam::Vec2;

use crate::color::FillColor;

/// Write-only view of the widget an indicator drives.
pub trait PresentationSurface {
    /// Sets the overall opacity in `[0, 1]`.
    fn set_opacity(&mut self, opacity: f32);
    /// Moves the widget to a canvas-relative screen position.
    fn set_screen_position(&mut self, position: Vec2);
    /// Sets the progress bar fill ratio in `[0, 1]`.
    fn set_fill_ratio(&mut self, ratio: f32);
    /// Sets the progress bar fill colour.
    fn set_fill_color(&mut self, color: FillColor);
    /// Shows `label` with the bar.
    fn set_label(&mut self, label: &str);
    /// Removes the label.
    fn clear_label(&mut self);
}

/// Plain record of the last values pushed by an indicator.
///
/// The ECS integration stores one per bar; the `ui` feature mirrors it onto
/// `bevy_ui` nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct BarSurface {
    /// Current opacity.
    pub opacity: f32,
    /// Last screen position, `None` until the first successful projection.
    pub screen_position: Option<Vec2>,
    /// Current fill ratio.
    pub fill_ratio: f32,
    /// Current fill colour.
    pub fill_color: FillColor,
    /// Current label text.
    pub label: Option<String>,
}

impl Default for BarSurface {
    fn default() -> Self {
        Self {
            opacity: 0.0,
            screen_position: None,
            fill_ratio: 1.0,
            fill_color: FillColor::default(),
            label: None,
        }
    }
}

impl PresentationSurface for BarSurface {
    fn set_opacity(&mut self, opacity: f32) {
        self.opacity = opacity;
    }

    fn set_screen_position(&mut self, position: Vec2) {
        self.screen_position = Some(position);
    }

    fn set_fill_ratio(&mut self, ratio: f32) {
        self.fill_ratio = ratio;
    }

    fn set_fill_color(&mut self, color: FillColor) {
        self.fill_color = color;
    }

    fn set_label(&mut self, label: &str) {
        self.label = Some(label.to_owned());
    }

    fn clear_label(&mut self) {
        self.label = None;
    }
}
