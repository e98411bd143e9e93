//! Shared fixture for floating bar integration tests.
//!
//! The fixture owns a headless `App` with `FloatingBarPlugin` installed. It
//! drives `Time` by hand instead of installing `TimePlugin`, so every tick
//! sees exactly the requested frame delta.

use std::sync::MutexGuard;
use std::time::Duration;

use bevy::prelude::*;
use floatbar::prelude::*;
use floatbar::{IndicatorProjection, IndicatorStatus};

use crate::thread_safe_app::{lock_app, share, SharedApp, ThreadSafeApp};

/// Pixels per world unit used by the fixture projection. A 1280x720 canvas
/// then shows world `x` within +/-6400 of the origin.
pub const PIXELS_PER_UNIT: f32 = 0.1;

/// Headless app hosting floating bars.
#[derive(Debug, Clone)]
pub struct BarAppFixture {
    app: SharedApp,
}

impl BarAppFixture {
    /// Builds an app with default settings.
    #[must_use]
    pub fn bootstrap() -> Self {
        Self::with_settings(FloatingBarSettings::default())
    }

    /// Builds an app with `settings` inserted before the plugin.
    #[must_use]
    pub fn with_settings(settings: FloatingBarSettings) -> Self {
        let mut app = App::new();
        app.init_resource::<Time>()
            .insert_resource(settings)
            .add_plugins(FloatingBarPlugin)
            .insert_resource(IndicatorProjection::new(OrthographicProjector {
                center: Vec2::ZERO,
                pixels_per_unit: PIXELS_PER_UNIT,
            }));
        Self { app: share(app) }
    }

    /// Locks the underlying `App` for direct inspection or mutation.
    pub fn app_guard(&self) -> MutexGuard<'_, ThreadSafeApp> {
        lock_app(&self.app)
    }

    /// Spawns an entity placed at `position`.
    pub fn spawn_actor(&self, position: Vec3) -> Entity {
        let mut app = self.app_guard();
        app.world_mut()
            .spawn(GlobalTransform::from_translation(position))
            .id()
    }

    /// Spawns a bar following `followed` and faded relative to `viewer`.
    pub fn spawn_bar(&self, viewer: Entity, followed: Entity) -> Entity {
        let mut app = self.app_guard();
        FloatingBarSpawn::new(viewer, followed).spawn_in_world(app.world_mut())
    }

    /// Moves a placed entity to `position`.
    pub fn move_actor(&self, entity: Entity, position: Vec3) {
        let mut app = self.app_guard();
        if let Some(mut transform) = app.world_mut().get_mut::<GlobalTransform>(entity) {
            *transform = GlobalTransform::from_translation(position);
        }
    }

    /// Despawns `entity`.
    pub fn despawn(&self, entity: Entity) {
        let mut app = self.app_guard();
        app.world_mut().despawn(entity);
    }

    /// Advances time by `seconds` and runs one update.
    pub fn tick(&self, seconds: f32) {
        let mut app = self.app_guard();
        app.world_mut()
            .resource_mut::<Time>()
            .advance_by(Duration::from_secs_f32(seconds));
        app.update();
    }

    /// Runs `frames` updates of `seconds` each.
    pub fn tick_many(&self, frames: usize, seconds: f32) {
        for _ in 0..frames {
            self.tick(seconds);
        }
    }

    /// Whether `bar` still exists with its component.
    #[must_use]
    pub fn bar_exists(&self, bar: Entity) -> bool {
        let app = self.app_guard();
        app.world().get::<FloatingBar>(bar).is_some()
    }

    /// Opacity of `bar`, if it still exists.
    #[must_use]
    pub fn opacity(&self, bar: Entity) -> Option<f32> {
        self.read(bar, |floating| floating.opacity())
    }

    /// Fill ratio of `bar`, if it still exists.
    #[must_use]
    pub fn fill_ratio(&self, bar: Entity) -> Option<f32> {
        self.read(bar, |floating| floating.fill_ratio())
    }

    /// Status of `bar`, if it still exists.
    #[must_use]
    pub fn status(&self, bar: Entity) -> Option<IndicatorStatus> {
        self.read(bar, |floating| floating.status())
    }

    /// Projected screen position of `bar`, if it exists and was projected.
    #[must_use]
    pub fn screen_position(&self, bar: Entity) -> Option<Vec2> {
        self.read(bar, |floating| floating.screen_position()).flatten()
    }

    /// Applies `edit` to `bar` in place.
    pub fn edit_bar(&self, bar: Entity, edit: impl FnOnce(&mut FloatingBar)) {
        let mut app = self.app_guard();
        if let Some(mut floating) = app.world_mut().get_mut::<FloatingBar>(bar) {
            edit(&mut floating);
        }
    }

    fn read<T>(&self, bar: Entity, read: impl FnOnce(&FloatingBar) -> T) -> Option<T> {
        let app = self.app_guard();
        app.world().get::<FloatingBar>(bar).map(read)
    }
}
