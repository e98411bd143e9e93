//! Camera-backed projection for rendered builds.
//!
//! A camera tagged with [`IndicatorCamera`] drives both projection and the
//! canvas geometry. Without a tagged camera, bars fall back to the
//! [`IndicatorProjection`] resource.

use bevy::ecs::entity::Entities;
use bevy::prelude::*;

use crate::indicator::FrameContext;
use crate::plugin::{tick_bars, FloatingBar, FloatingBarSet, TransformLookup};
use crate::projection::{IndicatorProjection, ScreenProjector, ViewGeometry};

/// Marker for the camera floating bars are projected through.
#[derive(Component, Reflect, Default, Debug, Clone, Copy, PartialEq, Eq)]
#[reflect(Component, Default)]
pub struct IndicatorCamera;

/// Projects through a Bevy camera's `world_to_viewport`.
pub struct CameraProjector<'a> {
    camera: &'a Camera,
    transform: &'a GlobalTransform,
}

impl<'a> CameraProjector<'a> {
    /// Borrows a camera and its global transform.
    #[must_use]
    pub const fn new(camera: &'a Camera, transform: &'a GlobalTransform) -> Self {
        Self { camera, transform }
    }
}

impl ScreenProjector for CameraProjector<'_> {
    fn project(&self, geometry: &ViewGeometry, world: Vec3) -> Option<Vec2> {
        let viewport = self.camera.world_to_viewport(self.transform, world).ok()?;
        viewport_to_canvas(geometry, viewport)
    }
}

/// Converts a window-space viewport point into canvas coordinates.
fn viewport_to_canvas(geometry: &ViewGeometry, viewport: Vec2) -> Option<Vec2> {
    let local = viewport - geometry.origin;
    geometry.contains(local).then_some(local)
}

/// Copies the tagged camera's logical viewport into [`ViewGeometry`].
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy systems require parameters by value, not by reference."
)]
pub fn sync_geometry_from_camera_system(
    cameras: Query<&Camera, With<IndicatorCamera>>,
    mut geometry: ResMut<ViewGeometry>,
) {
    let Ok(camera) = cameras.single() else {
        return;
    };
    let Some(rect) = camera.logical_viewport_rect() else {
        return;
    };
    let synced = ViewGeometry {
        origin: rect.min,
        size: rect.size(),
    };
    if *geometry != synced {
        *geometry = synced;
    }
}

/// Ticks all bars through the tagged camera, or the projection resource when
/// no camera is tagged.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy systems require parameters by value, not by reference."
)]
#[expect(
    clippy::too_many_arguments,
    reason = "Bevy systems receive each resource and query as a parameter."
)]
pub fn tick_floating_bars_with_camera_system(
    time: Res<Time>,
    geometry: Res<ViewGeometry>,
    projection: Res<IndicatorProjection>,
    cameras: Query<(&Camera, &GlobalTransform), With<IndicatorCamera>>,
    transforms: Query<&'static GlobalTransform>,
    entities: &Entities,
    mut bars: Query<(Entity, &mut FloatingBar)>,
    mut commands: Commands,
) {
    let camera_projector = cameras
        .single()
        .ok()
        .map(|(camera, transform)| CameraProjector::new(camera, transform));
    let projector: &dyn ScreenProjector = match camera_projector.as_ref() {
        Some(camera) => camera,
        None => &*projection,
    };
    let lookup = TransformLookup::new(&transforms, entities);
    let frame = FrameContext {
        positions: &lookup,
        projector,
        geometry: &geometry,
    };
    tick_bars(&frame, time.delta_secs(), &mut bars, &mut commands);
}

pub(crate) fn install(app: &mut App) {
    app.register_type::<IndicatorCamera>();
    app.add_systems(
        Update,
        (
            sync_geometry_from_camera_system,
            tick_floating_bars_with_camera_system,
        )
            .chain()
            .in_set(FloatingBarSet::Tick),
    );
}
