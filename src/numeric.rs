//! Numeric helpers for values that live on the unit interval.
//!
//! Opacity, fill ratios and smoothing factors all share the `[0, 1]` domain.
//! These helpers keep that domain closed under hostile input: out-of-range
//! values are clamped and `NaN` collapses to zero instead of leaking through
//! `f32::clamp`, which would otherwise return `NaN` unchanged.

/// Clamp `value` into `[0, 1]`, mapping `NaN` to `0.0`.
///
/// # Examples
///
/// ```
/// use floatbar::numeric::clamp_unit;
/// assert_eq!(clamp_unit(1.7), 1.0);
/// assert_eq!(clamp_unit(-0.2), 0.0);
/// assert_eq!(clamp_unit(f32::NAN), 0.0);
/// assert_eq!(clamp_unit(0.25), 0.25);
/// ```
#[must_use]
pub fn clamp_unit(value: f32) -> f32 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 1.0)
}

/// Coerce a tunable such as a radius or rate to a finite, non-negative value.
///
/// Negative numbers and `NaN` become `0.0`. Positive infinity is kept, since
/// an infinite radius is a meaningful "always visible" setting.
#[must_use]
pub fn non_negative(value: f32) -> f32 {
    if value.is_nan() || value < 0.0 {
        0.0
    } else {
        value
    }
}
