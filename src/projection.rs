//! World-to-screen projection contracts.
//!
//! Projection is owned by the host: a camera, a minimap, a test double. The
//! indicator only needs a screen position relative to the geometry of the
//! canvas it is drawn on, or `None` when the point cannot be shown.

use bevy::prelude::*;
use glam::{Vec2, Vec3};

/// Screen-space rectangle that indicators are laid out in.
///
/// Positions produced by a [`ScreenProjector`] are relative to `origin`, with
/// `y` growing downwards as in UI layout.
#[derive(Resource, Reflect, Debug, Clone, Copy, PartialEq)]
#[reflect(Resource)]
pub struct ViewGeometry {
    /// Top-left corner of the canvas in window coordinates.
    pub origin: Vec2,
    /// Canvas extent in logical pixels.
    pub size: Vec2,
}

impl ViewGeometry {
    /// Geometry with its origin at the window's top-left corner.
    #[must_use]
    pub const fn from_size(width: f32, height: f32) -> Self {
        Self {
            origin: Vec2::ZERO,
            size: Vec2::new(width, height),
        }
    }

    /// Whether a canvas-relative `point` lies inside the canvas (edges included).
    #[must_use]
    pub fn contains(&self, point: Vec2) -> bool {
        point.cmpge(Vec2::ZERO).all() && point.cmple(self.size).all()
    }
}

impl Default for ViewGeometry {
    fn default() -> Self {
        Self::from_size(1280.0, 720.0)
    }
}

/// Maps world positions onto a canvas.
pub trait ScreenProjector {
    /// Projects `world` into canvas coordinates, or `None` when the point is
    /// off-screen or behind the viewer.
    fn project(&self, geometry: &ViewGeometry, world: Vec3) -> Option<Vec2>;
}

/// Top-down orthographic projection looking along negative `z`.
///
/// World `x` maps to screen right and world `y` to screen up; the canvas
/// centre shows `center`.
///
/// # Examples
///
/// ```
/// use floatbar::projection::{OrthographicProjector, ScreenProjector, ViewGeometry};
/// use glam::{Vec2, Vec3};
///
/// let projector = OrthographicProjector::default();
/// let geometry = ViewGeometry::from_size(200.0, 100.0);
/// assert_eq!(projector.project(&geometry, Vec3::ZERO), Some(Vec2::new(100.0, 50.0)));
/// assert_eq!(projector.project(&geometry, Vec3::new(500.0, 0.0, 0.0)), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrthographicProjector {
    /// World-space point shown at the canvas centre.
    pub center: Vec2,
    /// Logical pixels per world unit.
    pub pixels_per_unit: f32,
}

impl Default for OrthographicProjector {
    fn default() -> Self {
        Self {
            center: Vec2::ZERO,
            pixels_per_unit: 1.0,
        }
    }
}

impl ScreenProjector for OrthographicProjector {
    fn project(&self, geometry: &ViewGeometry, world: Vec3) -> Option<Vec2> {
        let delta = (world.truncate() - self.center) * self.pixels_per_unit;
        let local = geometry.size * 0.5 + Vec2::new(delta.x, -delta.y);
        (local.is_finite() && geometry.contains(local)).then_some(local)
    }
}

/// Projector used by the ECS systems when no camera drives projection.
#[derive(Resource)]
pub struct IndicatorProjection(pub Box<dyn ScreenProjector + Send + Sync>);

impl IndicatorProjection {
    /// Wraps any projector.
    pub fn new(projector: impl ScreenProjector + Send + Sync + 'static) -> Self {
        Self(Box::new(projector))
    }
}

impl Default for IndicatorProjection {
    fn default() -> Self {
        Self::new(OrthographicProjector::default())
    }
}

impl ScreenProjector for IndicatorProjection {
    fn project(&self, geometry: &ViewGeometry, world: Vec3) -> Option<Vec2> {
        self.0.project(geometry, world)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::center(Vec3::ZERO, Some(Vec2::new(50.0, 50.0)))]
    #[case::up_is_screen_up(Vec3::new(0.0, 10.0, 0.0), Some(Vec2::new(50.0, 30.0)))]
    #[case::right(Vec3::new(10.0, 0.0, 99.0), Some(Vec2::new(70.0, 50.0)))]
    #[case::edge(Vec3::new(25.0, 0.0, 0.0), Some(Vec2::new(100.0, 50.0)))]
    #[case::past_edge(Vec3::new(25.5, 0.0, 0.0), None)]
    #[case::nan(Vec3::new(f32::NAN, 0.0, 0.0), None)]
    fn orthographic_projection(#[case] world: Vec3, #[case] expected: Option<Vec2>) {
        let projector = OrthographicProjector {
            center: Vec2::ZERO,
            pixels_per_unit: 2.0,
        };
        let geometry = ViewGeometry::from_size(100.0, 100.0);
        assert_eq!(projector.project(&geometry, world), expected);
    }

    #[test]
    fn projection_is_relative_to_center() {
        let projector = OrthographicProjector {
            center: Vec2::new(100.0, 100.0),
            pixels_per_unit: 1.0,
        };
        let geometry = ViewGeometry::from_size(100.0, 100.0);
        assert_eq!(
            projector.project(&geometry, Vec3::new(100.0, 100.0, 0.0)),
            Some(Vec2::new(50.0, 50.0))
        );
        assert_eq!(projector.project(&geometry, Vec3::ZERO), None);
    }

    #[test]
    fn resource_delegates_to_boxed_projector() {
        let resource = IndicatorProjection::default();
        let geometry = ViewGeometry::from_size(10.0, 10.0);
        assert_eq!(
            resource.project(&geometry, Vec3::ZERO),
            Some(Vec2::new(5.0, 5.0))
        );
    }
}
