//! Distance-driven visibility and the opacity smoothing step.
//!
//! A bar is fully visible while its anchor sits within the visible radius of
//! the viewer and fully hidden beyond it. The displayed opacity chases that
//! target exponentially: each tick covers a fraction of the remaining gap,
//! and the fraction is capped at one so large frame times land exactly on the
//! target instead of overshooting past it.

use serde::{Deserialize, Serialize};

use crate::numeric::{clamp_unit, non_negative};

/// How far a single tick moves the opacity toward its target.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Smoothing {
    /// Fraction `min(1, speed * dt)`.
    #[default]
    LinearClamped,
    /// Fraction `1 - exp(-speed * dt)`, exact for variable frame times.
    Exponential,
}

impl Smoothing {
    /// Fraction of the remaining gap covered in one tick.
    ///
    /// The result is always in `[0, 1]`. Negative or `NaN` speeds and frame
    /// times contribute no movement.
    ///
    /// # Examples
    ///
    /// ```
    /// use floatbar::visibility::Smoothing;
    /// assert_eq!(Smoothing::LinearClamped.factor(5.0, 0.1), 0.5);
    /// assert_eq!(Smoothing::LinearClamped.factor(5.0, 1.0), 1.0);
    /// assert_eq!(Smoothing::Exponential.factor(0.0, 1.0), 0.0);
    /// ```
    #[must_use]
    pub fn factor(self, speed: f32, delta_seconds: f32) -> f32 {
        let rate = non_negative(speed) * non_negative(delta_seconds);
        let raw = match self {
            Self::LinearClamped => rate,
            Self::Exponential => 1.0 - (-rate).exp(),
        };
        clamp_unit(raw)
    }
}

/// Target opacity for an anchor at `distance` from the viewer.
///
/// The threshold is inclusive: an anchor exactly on the radius is visible.
/// `NaN` distances count as unreachable.
///
/// # Examples
///
/// ```
/// use floatbar::visibility::target_opacity;
/// assert_eq!(target_opacity(1500.0, 1500.0), 1.0);
/// assert_eq!(target_opacity(1500.1, 1500.0), 0.0);
/// assert_eq!(target_opacity(f32::INFINITY, 1500.0), 0.0);
/// ```
#[must_use]
pub fn target_opacity(distance: f32, visible_radius: f32) -> f32 {
    if distance <= visible_radius {
        1.0
    } else {
        0.0
    }
}

/// Advances `current` toward `target` by one smoothing step.
///
/// The returned opacity lies between `current` and `target` (both clamped to
/// the unit interval first), so convergence is monotonic.
#[must_use]
pub fn step_opacity(
    current: f32,
    target: f32,
    speed: f32,
    delta_seconds: f32,
    smoothing: Smoothing,
) -> f32 {
    let from = clamp_unit(current);
    let to = clamp_unit(target);
    let factor = smoothing.factor(speed, delta_seconds);
    clamp_unit(from + (to - from) * factor)
}
