//! Bevy integration for floating bars.
//!
//! `FloatingBarPlugin` ticks every [`FloatingBar`] once per frame. Followed
//! entities and viewers are looked up through their `GlobalTransform`: an
//! entity that exists without one is treated as unplaced, an entity that no
//! longer exists as despawned. The first frame a bar notices its followed
//! entity has been despawned it triggers [`FollowTargetLost`]; unless
//! [`FloatingBarSettings::despawn_orphaned`] is cleared, the bar is then
//! despawned as well.

use std::marker::PhantomData;

use bevy::ecs::entity::Entities;
use bevy::ecs::prelude::On;
use bevy::prelude::*;
use log::warn;

use crate::color::FillColor;
use crate::config::FloatingBarSettings;
use crate::indicator::{FollowIndicator, FrameContext, IndicatorStatus, Tickable};
use crate::positions::{EntityLocation, EntityPositions};
use crate::projection::{IndicatorProjection, ViewGeometry};
use crate::surface::BarSurface;

/// ECS component holding one floating bar.
#[derive(Component, Debug, Deref, DerefMut)]
pub struct FloatingBar(pub FollowIndicator<BarSurface>);

/// Ordering of floating bar work inside `Update`.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FloatingBarSet {
    /// Fill values are sampled from game state.
    Sample,
    /// Bars are ticked.
    Tick,
    /// Bar surfaces are mirrored onto the host UI.
    Present,
}

/// Triggered once when a bar's followed entity is despawned.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct FollowTargetLost {
    /// The bar that lost its target.
    pub bar: Entity,
    /// The despawned entity it was following.
    pub target: Entity,
}

/// Request to create a floating bar.
///
/// # Examples
///
/// ```
/// use bevy::prelude::*;
/// use floatbar::prelude::*;
///
/// let mut app = App::new();
/// app.add_plugins(FloatingBarPlugin);
/// let world = app.world_mut();
/// let viewer = world.spawn(GlobalTransform::default()).id();
/// let goblin = world.spawn(GlobalTransform::default()).id();
///
/// let bar = FloatingBarSpawn::new(viewer, goblin)
///     .with_offset(Vec3::Y * 2.0)
///     .with_fill_color(FillColor::GREEN)
///     .spawn_in_world(world);
///
/// let floating = world.get::<FloatingBar>(bar).unwrap();
/// assert_eq!(floating.followed(), Some(goblin));
/// assert_eq!(floating.fill_color(), FillColor::GREEN);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FloatingBarSpawn {
    viewer: Option<Entity>,
    followed: Option<Entity>,
    offset: Vec3,
    fill_color: Option<FillColor>,
}

impl FloatingBarSpawn {
    /// A bar following `followed`, faded by distance from `viewer`.
    #[must_use]
    pub const fn new(viewer: Entity, followed: Entity) -> Self {
        Self::from_parts(Some(viewer), Some(followed))
    }

    /// A bar whose references may be missing; a missing followed entity makes
    /// the bar permanently hidden.
    #[must_use]
    pub const fn from_parts(viewer: Option<Entity>, followed: Option<Entity>) -> Self {
        Self {
            viewer,
            followed,
            offset: Vec3::ZERO,
            fill_color: None,
        }
    }

    /// World-space offset from the followed entity.
    #[must_use]
    pub const fn with_offset(mut self, offset: Vec3) -> Self {
        self.offset = offset;
        self
    }

    /// Fill colour; defaults to [`FloatingBarSettings::default_fill_color`].
    #[must_use]
    pub const fn with_fill_color(mut self, color: FillColor) -> Self {
        self.fill_color = Some(color);
        self
    }

    /// Builds the component using `settings` for the per-instance tunables.
    #[must_use]
    pub fn build(self, settings: &FloatingBarSettings) -> FloatingBar {
        let indicator = FollowIndicator::new(BarSurface::default(), self.viewer, self.followed)
            .with_offset(self.offset)
            .with_fill_color(self.fill_color.unwrap_or(settings.default_fill_color))
            .with_visible_radius(settings.visible_radius)
            .with_transition_speed(settings.transition_speed)
            .with_smoothing(settings.smoothing);
        FloatingBar(indicator)
    }

    /// Spawns the bar through `commands`.
    pub fn spawn(self, commands: &mut Commands, settings: &FloatingBarSettings) -> Entity {
        commands
            .spawn((self.build(settings), Name::new("FloatingBar")))
            .id()
    }

    /// Spawns the bar directly into `world`, reading its settings resource.
    pub fn spawn_in_world(self, world: &mut World) -> Entity {
        let settings = world
            .get_resource::<FloatingBarSettings>()
            .cloned()
            .unwrap_or_default();
        world
            .spawn((self.build(&settings), Name::new("FloatingBar")))
            .id()
    }
}

/// Resolves entities through their `GlobalTransform`.
pub struct TransformLookup<'a, 'w, 's> {
    transforms: &'a Query<'w, 's, &'static GlobalTransform>,
    entities: &'a Entities,
}

impl<'a, 'w, 's> TransformLookup<'a, 'w, 's> {
    /// Wraps a transform query and the world's entity allocator.
    #[must_use]
    pub const fn new(
        transforms: &'a Query<'w, 's, &'static GlobalTransform>,
        entities: &'a Entities,
    ) -> Self {
        Self {
            transforms,
            entities,
        }
    }
}

impl EntityPositions for TransformLookup<'_, '_, '_> {
    fn locate(&self, entity: Entity) -> EntityLocation {
        if let Ok(transform) = self.transforms.get(entity) {
            EntityLocation::At(transform.translation())
        } else if self.entities.contains(entity) {
            EntityLocation::Unplaced
        } else {
            EntityLocation::Despawned
        }
    }
}

/// Component whose value drives the fill of bars following its entity.
pub trait FillValue: Component {
    /// Fill ratio in `[0, 1]`; out-of-range values are clamped.
    fn fill_ratio(&self) -> f32;
}

/// Copies `C::fill_ratio` from each bar's followed entity into the bar.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy systems require parameters by value, not by reference."
)]
pub fn fill_from_followed_system<C: FillValue>(
    mut bars: Query<&mut FloatingBar>,
    values: Query<&C>,
) {
    for mut bar in &mut bars {
        let Some(target) = bar.followed() else {
            continue;
        };
        if let Ok(value) = values.get(target) {
            bar.set_fill_amount(value.fill_ratio());
        }
    }
}

/// Plugin wiring [`fill_from_followed_system`] for component `C`.
pub struct FillValuePlugin<C>(PhantomData<fn() -> C>);

impl<C> Default for FillValuePlugin<C> {
    fn default() -> Self {
        Self(PhantomData)
    }
}

impl<C: FillValue> Plugin for FillValuePlugin<C> {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            fill_from_followed_system::<C>.in_set(FloatingBarSet::Sample),
        );
    }
}

/// Ticks every bar against `frame` and reports newly orphaned bars.
pub(crate) fn tick_bars(
    frame: &FrameContext<'_>,
    delta_seconds: f32,
    bars: &mut Query<(Entity, &mut FloatingBar)>,
    commands: &mut Commands,
) {
    for (entity, mut bar) in bars.iter_mut() {
        let was_orphaned = bar.status() == IndicatorStatus::TargetDespawned;
        bar.tick(frame, delta_seconds);
        if was_orphaned || bar.status() != IndicatorStatus::TargetDespawned {
            continue;
        }
        if let Some(target) = bar.followed() {
            commands.trigger(FollowTargetLost {
                bar: entity,
                target,
            });
        }
    }
}

/// Ticks all bars using the [`IndicatorProjection`] resource.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy systems require parameters by value, not by reference."
)]
pub fn tick_floating_bars_system(
    time: Res<Time>,
    geometry: Res<ViewGeometry>,
    projection: Res<IndicatorProjection>,
    transforms: Query<&'static GlobalTransform>,
    entities: &Entities,
    mut bars: Query<(Entity, &mut FloatingBar)>,
    mut commands: Commands,
) {
    let lookup = TransformLookup::new(&transforms, entities);
    let frame = FrameContext {
        positions: &lookup,
        projector: &*projection,
        geometry: &geometry,
    };
    tick_bars(&frame, time.delta_secs(), &mut bars, &mut commands);
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "Observer systems must accept On<T> by value for Events V2."
)]
fn log_follow_target_lost(event: On<FollowTargetLost>) {
    let FollowTargetLost { bar, target } = event.event();
    warn!("floating bar {bar:?} lost its follow target {target:?}");
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "Observer systems must accept On<T> and resources by value."
)]
fn despawn_orphaned_bar(
    event: On<FollowTargetLost>,
    settings: Res<FloatingBarSettings>,
    mut commands: Commands,
) {
    if !settings.despawn_orphaned {
        return;
    }
    if let Ok(mut bar) = commands.get_entity(event.event().bar) {
        bar.despawn();
    }
}

/// Plugin installing floating bar resources, systems and observers.
///
/// # Responsibilities
///
/// - Initialises [`FloatingBarSettings`], [`ViewGeometry`] and
///   [`IndicatorProjection`] unless the host inserted them first.
/// - Chains [`FloatingBarSet`] inside `Update`.
/// - Ticks bars in [`FloatingBarSet::Tick`] using `Time::delta_secs`.
/// - Logs [`FollowTargetLost`] and despawns orphaned bars.
///
/// The host must provide the `Time` resource, usually through
/// `MinimalPlugins` or `DefaultPlugins`.
#[derive(Debug, Default)]
pub struct FloatingBarPlugin;

impl Plugin for FloatingBarPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<FloatingBarSettings>()
            .init_resource::<ViewGeometry>()
            .init_resource::<IndicatorProjection>()
            .register_type::<ViewGeometry>();

        app.configure_sets(
            Update,
            (
                FloatingBarSet::Sample,
                FloatingBarSet::Tick,
                FloatingBarSet::Present,
            )
                .chain(),
        );

        app.add_observer(log_follow_target_lost);
        app.add_observer(despawn_orphaned_bar);

        #[cfg(not(feature = "render"))]
        app.add_systems(
            Update,
            tick_floating_bars_system.in_set(FloatingBarSet::Tick),
        );

        #[cfg(feature = "render")]
        crate::camera::install(app);

        #[cfg(feature = "ui")]
        crate::ui::install(app);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::ecs::system::RunSystemOnce;
    use rstest::rstest;

    #[rstest]
    fn plugin_initialises_resources() {
        let mut app = App::new();
        app.add_plugins(FloatingBarPlugin);
        assert!(app.world().contains_resource::<FloatingBarSettings>());
        assert!(app.world().contains_resource::<ViewGeometry>());
        assert!(app.world().contains_resource::<IndicatorProjection>());
    }

    #[rstest]
    fn plugin_keeps_inserted_settings() {
        let mut app = App::new();
        app.insert_resource(FloatingBarSettings {
            visible_radius: 42.0,
            ..FloatingBarSettings::default()
        });
        app.add_plugins(FloatingBarPlugin);
        let settings = app.world().resource::<FloatingBarSettings>();
        assert_eq!(settings.visible_radius, 42.0);
    }

    #[test]
    fn spawn_request_applies_settings() {
        let mut world = World::new();
        let viewer = world.spawn_empty().id();
        let target = world.spawn_empty().id();
        let settings = FloatingBarSettings {
            visible_radius: 300.0,
            transition_speed: 2.0,
            default_fill_color: FillColor::WHITE,
            ..FloatingBarSettings::default()
        };
        let bar = FloatingBarSpawn::new(viewer, target)
            .with_offset(Vec3::new(0.0, 3.0, 0.0))
            .build(&settings);
        assert_eq!(bar.viewer(), Some(viewer));
        assert_eq!(bar.followed(), Some(target));
        assert_eq!(bar.offset(), Vec3::new(0.0, 3.0, 0.0));
        assert_eq!(bar.visible_radius(), 300.0);
        assert_eq!(bar.transition_speed(), 2.0);
        assert_eq!(bar.fill_color(), FillColor::WHITE);
        assert_eq!(bar.opacity(), 0.0);
    }

    #[test]
    fn lookup_distinguishes_unplaced_from_despawned() {
        let mut world = World::new();
        let placed = world
            .spawn(GlobalTransform::from_translation(Vec3::new(1.0, 2.0, 3.0)))
            .id();
        let bare = world.spawn_empty().id();
        let gone = world.spawn_empty().id();
        assert!(world.despawn(gone));

        let mut system_state: bevy::ecs::system::SystemState<(
            Query<&GlobalTransform>,
            &Entities,
        )> = bevy::ecs::system::SystemState::new(&mut world);
        let (transforms, entities) = system_state.get(&world);
        let lookup = TransformLookup::new(&transforms, entities);
        assert_eq!(
            lookup.locate(placed),
            EntityLocation::At(Vec3::new(1.0, 2.0, 3.0))
        );
        assert_eq!(lookup.locate(bare), EntityLocation::Unplaced);
        assert_eq!(lookup.locate(gone), EntityLocation::Despawned);
    }

    #[test]
    fn tick_system_runs_against_transforms() {
        let mut world = World::new();
        world.init_resource::<Time>();
        world.init_resource::<FloatingBarSettings>();
        world.insert_resource(ViewGeometry::from_size(100.0, 100.0));
        world.init_resource::<IndicatorProjection>();
        world
            .resource_mut::<Time>()
            .advance_by(std::time::Duration::from_millis(100));
        let viewer = world.spawn(GlobalTransform::default()).id();
        let target = world
            .spawn(GlobalTransform::from_translation(Vec3::new(10.0, 0.0, 0.0)))
            .id();
        let bar = FloatingBarSpawn::new(viewer, target).spawn_in_world(&mut world);

        world
            .run_system_once(tick_floating_bars_system)
            .expect("ticking bars should succeed");

        let ticked = world
            .get::<FloatingBar>(bar)
            .expect("bar should survive the tick");
        assert_eq!(ticked.status(), IndicatorStatus::InRange { distance: 10.0 });
        assert!((ticked.opacity() - 0.5).abs() < 1e-4);
        assert_eq!(ticked.screen_position(), Some(Vec2::new(60.0, 50.0)));
    }
}
