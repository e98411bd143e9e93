//! Default tunables shared by indicators and their settings.
//!
//! The radius and speed match the defaults the floating bar widget has always
//! shipped with.

/// Distance from the viewer beyond which a bar fades out, in world units.
pub const DEFAULT_VISIBLE_RADIUS: f32 = 1500.0;
/// Opacity transition speed per second.
pub const DEFAULT_TRANSITION_SPEED: f32 = 5.0;
/// Default bar extent in logical pixels.
pub const DEFAULT_BAR_WIDTH: f32 = 64.0;
/// Default bar thickness in logical pixels.
pub const DEFAULT_BAR_HEIGHT: f32 = 8.0;
