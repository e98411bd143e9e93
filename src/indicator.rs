//! The follow indicator: a bar that tracks an entity and fades with distance.
//!
//! [`FollowIndicator`] is host-agnostic. Each tick it resolves the entity it
//! follows and its viewer through [`EntityPositions`], projects the anchor
//! point with a [`ScreenProjector`], eases its opacity toward the
//! distance-derived target and pushes opacity, fill ratio and position to the
//! injected [`PresentationSurface`]. Stale references and failed projections
//! only ever hide the bar; nothing is reported to the caller of `tick`.

use std::fmt;
use std::mem;

use bevy::prelude::Entity;
use glam::{Vec2, Vec3};
use log::debug;

use crate::color::FillColor;
use crate::numeric::{clamp_unit, non_negative};
use crate::positions::{EntityLocation, EntityPositions};
use crate::projection::{ScreenProjector, ViewGeometry};
use crate::surface::PresentationSurface;
use crate::visibility::{step_opacity, target_opacity, Smoothing};
use crate::{DEFAULT_TRANSITION_SPEED, DEFAULT_VISIBLE_RADIUS};

/// Callback sampled every tick for the bar's fill ratio.
pub type FillSource = Box<dyn FnMut() -> f32 + Send + Sync>;

/// Why the last tick chose its target opacity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IndicatorStatus {
    /// No followed entity was ever bound.
    Unbound,
    /// The followed entity exists but has no position this frame.
    TargetUnplaced,
    /// The followed entity no longer exists.
    TargetDespawned,
    /// The anchor could not be projected onto the canvas.
    OffScreen,
    /// The viewer is unbound or cannot be located.
    ViewerUnavailable,
    /// The anchor is farther from the viewer than the visible radius.
    OutOfRange {
        /// Viewer-to-anchor distance in world units.
        distance: f32,
    },
    /// The anchor is within the visible radius.
    InRange {
        /// Viewer-to-anchor distance in world units.
        distance: f32,
    },
}

impl IndicatorStatus {
    /// Opacity the indicator eases toward while in this status.
    #[must_use]
    pub const fn target_opacity(self) -> f32 {
        match self {
            Self::InRange { .. } => 1.0,
            _ => 0.0,
        }
    }
}

/// Host collaborators available to a tick.
#[derive(Clone, Copy)]
pub struct FrameContext<'a> {
    /// World lookup for the followed entity and the viewer.
    pub positions: &'a dyn EntityPositions,
    /// Projection from world space onto the canvas.
    pub projector: &'a dyn ScreenProjector,
    /// Canvas the indicator is laid out on.
    pub geometry: &'a ViewGeometry,
}

/// Something advanced once per rendered frame.
pub trait Tickable {
    /// Advances by `delta_seconds` using the frame's collaborators.
    fn tick(&mut self, frame: &FrameContext<'_>, delta_seconds: f32);
}

/// Something that drives a presentation surface.
pub trait Presentable {
    /// Surface type written by this presenter.
    type Surface: PresentationSurface;

    /// The surface in its current state.
    fn surface(&self) -> &Self::Surface;
}

/// Floating bar state for one followed entity.
///
/// # Examples
///
/// ```
/// use bevy::prelude::World;
/// use floatbar::prelude::*;
/// use glam::{Vec2, Vec3};
///
/// let mut world = World::new();
/// let viewer = world.spawn_empty().id();
/// let target = world.spawn_empty().id();
///
/// let mut positions = PositionTable::default();
/// positions.place(viewer, Vec3::ZERO);
/// positions.place(target, Vec3::new(10.0, 0.0, 0.0));
///
/// let mut bar = FollowIndicator::new(BarSurface::default(), Some(viewer), Some(target))
///     .with_offset(Vec3::new(0.0, 2.0, 0.0));
/// bar.set_fill_amount(0.25);
///
/// let projector = OrthographicProjector::default();
/// let geometry = ViewGeometry::from_size(100.0, 100.0);
/// let frame = FrameContext { positions: &positions, projector: &projector, geometry: &geometry };
/// bar.tick(&frame, 1.0);
///
/// assert_eq!(bar.opacity(), 1.0);
/// assert_eq!(bar.surface().fill_ratio, 0.25);
/// assert_eq!(bar.surface().screen_position, Some(Vec2::new(60.0, 48.0)));
/// ```
pub struct FollowIndicator<S> {
    surface: S,
    followed: Option<Entity>,
    viewer: Option<Entity>,
    offset: Vec3,
    visible_radius: f32,
    transition_speed: f32,
    smoothing: Smoothing,
    current_opacity: f32,
    fill_ratio: f32,
    fill_color: FillColor,
    label: Option<String>,
    fill_source: Option<FillSource>,
    screen_position: Option<Vec2>,
    status: IndicatorStatus,
}

impl<S: PresentationSurface> FollowIndicator<S> {
    /// Creates a fully transparent indicator bound to `viewer` and `followed`.
    ///
    /// The offset starts at zero and the fill colour at [`FillColor::RED`].
    /// The initial opacity, fill ratio and colour are pushed to `surface`
    /// immediately, so the first ticks fade the bar in.
    pub fn new(mut surface: S, viewer: Option<Entity>, followed: Option<Entity>) -> Self {
        let fill_color = FillColor::default();
        surface.set_opacity(0.0);
        surface.set_fill_ratio(1.0);
        surface.set_fill_color(fill_color);
        debug!("created follow indicator for {followed:?} watched by {viewer:?}");
        Self {
            surface,
            followed,
            viewer,
            offset: Vec3::ZERO,
            visible_radius: DEFAULT_VISIBLE_RADIUS,
            transition_speed: DEFAULT_TRANSITION_SPEED,
            smoothing: Smoothing::default(),
            current_opacity: 0.0,
            fill_ratio: 1.0,
            fill_color,
            label: None,
            fill_source: None,
            screen_position: None,
            status: IndicatorStatus::Unbound,
        }
    }

    /// Sets the world-space offset added to the followed entity's position.
    ///
    /// Only available while building; the offset is fixed afterwards.
    #[must_use]
    pub const fn with_offset(mut self, offset: Vec3) -> Self {
        self.offset = offset;
        self
    }

    /// Sets the initial fill colour.
    #[must_use]
    pub fn with_fill_color(mut self, color: FillColor) -> Self {
        self.set_fill_color(color);
        self
    }

    /// Sets the visible radius.
    #[must_use]
    pub fn with_visible_radius(mut self, radius: f32) -> Self {
        self.set_visible_radius(radius);
        self
    }

    /// Sets the visibility transition speed.
    #[must_use]
    pub fn with_transition_speed(mut self, speed: f32) -> Self {
        self.set_transition_speed(speed);
        self
    }

    /// Sets the smoothing law.
    #[must_use]
    pub const fn with_smoothing(mut self, smoothing: Smoothing) -> Self {
        self.smoothing = smoothing;
        self
    }

    /// Binds a fill source at construction time.
    #[must_use]
    pub fn with_fill_source(mut self, source: impl FnMut() -> f32 + Send + Sync + 'static) -> Self {
        self.bind_fill_source(source);
        self
    }

    /// Sets the fill ratio, clamped to `[0, 1]`.
    pub fn set_fill_amount(&mut self, value: f32) {
        self.fill_ratio = clamp_unit(value);
        self.surface.set_fill_ratio(self.fill_ratio);
    }

    /// Binds `source` to be sampled every tick, replacing any previous source.
    pub fn bind_fill_source(&mut self, source: impl FnMut() -> f32 + Send + Sync + 'static) {
        self.fill_source = Some(Box::new(source));
    }

    /// Drops the bound fill source; the fill ratio keeps its last value.
    pub fn unbind_fill_source(&mut self) {
        self.fill_source = None;
    }

    /// Whether a fill source is bound.
    #[must_use]
    pub const fn has_fill_source(&self) -> bool {
        self.fill_source.is_some()
    }

    /// Sets the fill colour immediately.
    pub fn set_fill_color(&mut self, color: FillColor) {
        self.fill_color = color;
        self.surface.set_fill_color(color);
    }

    /// Shows `text` next to the bar.
    pub fn set_label(&mut self, text: impl Into<String>) {
        let owned = text.into();
        self.surface.set_label(&owned);
        self.label = Some(owned);
    }

    /// Removes the label.
    pub fn clear_label(&mut self) {
        self.label = None;
        self.surface.clear_label();
    }

    /// Sets the visible radius; negative or `NaN` values become zero.
    pub fn set_visible_radius(&mut self, radius: f32) {
        self.visible_radius = non_negative(radius);
    }

    /// Sets the transition speed; negative or `NaN` values become zero.
    pub fn set_transition_speed(&mut self, speed: f32) {
        self.transition_speed = non_negative(speed);
    }

    /// Sets the smoothing law.
    pub const fn set_smoothing(&mut self, smoothing: Smoothing) {
        self.smoothing = smoothing;
    }

    /// Current opacity in `[0, 1]`.
    #[must_use]
    pub const fn opacity(&self) -> f32 {
        self.current_opacity
    }

    /// Current fill ratio in `[0, 1]`.
    #[must_use]
    pub const fn fill_ratio(&self) -> f32 {
        self.fill_ratio
    }

    /// Current fill colour.
    #[must_use]
    pub const fn fill_color(&self) -> FillColor {
        self.fill_color
    }

    /// Current label.
    #[must_use]
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// World-space offset applied to the followed entity.
    #[must_use]
    pub const fn offset(&self) -> Vec3 {
        self.offset
    }

    /// Visible radius in world units.
    #[must_use]
    pub const fn visible_radius(&self) -> f32 {
        self.visible_radius
    }

    /// Opacity transition speed per second.
    #[must_use]
    pub const fn transition_speed(&self) -> f32 {
        self.transition_speed
    }

    /// Smoothing law in use.
    #[must_use]
    pub const fn smoothing(&self) -> Smoothing {
        self.smoothing
    }

    /// Entity this indicator follows.
    #[must_use]
    pub const fn followed(&self) -> Option<Entity> {
        self.followed
    }

    /// Entity whose distance drives visibility.
    #[must_use]
    pub const fn viewer(&self) -> Option<Entity> {
        self.viewer
    }

    /// Last successfully projected screen position.
    #[must_use]
    pub const fn screen_position(&self) -> Option<Vec2> {
        self.screen_position
    }

    /// Status recorded by the last tick.
    #[must_use]
    pub const fn status(&self) -> IndicatorStatus {
        self.status
    }

    fn evaluate(&self, frame: &FrameContext<'_>) -> (IndicatorStatus, Option<Vec2>) {
        let Some(followed) = self.followed else {
            return (IndicatorStatus::Unbound, None);
        };
        let anchor = match frame.positions.locate(followed) {
            EntityLocation::At(position) => position + self.offset,
            EntityLocation::Unplaced => return (IndicatorStatus::TargetUnplaced, None),
            EntityLocation::Despawned => return (IndicatorStatus::TargetDespawned, None),
        };

        let screen = frame.projector.project(frame.geometry, anchor);
        let distance = self
            .viewer
            .and_then(|viewer| frame.positions.locate(viewer).position())
            .map(|viewer| viewer.distance(anchor));

        let status = match (screen, distance) {
            (None, _) => IndicatorStatus::OffScreen,
            (Some(_), None) => IndicatorStatus::ViewerUnavailable,
            (Some(_), Some(distance)) if target_opacity(distance, self.visible_radius) > 0.0 => {
                IndicatorStatus::InRange { distance }
            }
            (Some(_), Some(distance)) => IndicatorStatus::OutOfRange { distance },
        };
        (status, screen)
    }
}

impl<S: PresentationSurface> Tickable for FollowIndicator<S> {
    fn tick(&mut self, frame: &FrameContext<'_>, delta_seconds: f32) {
        let (status, screen) = self.evaluate(frame);
        if mem::discriminant(&status) != mem::discriminant(&self.status) {
            debug!(
                "indicator for {:?} changed status {:?} -> {status:?}",
                self.followed, self.status
            );
        }
        self.status = status;

        self.current_opacity = step_opacity(
            self.current_opacity,
            status.target_opacity(),
            self.transition_speed,
            delta_seconds,
            self.smoothing,
        );
        self.surface.set_opacity(self.current_opacity);

        if let Some(source) = self.fill_source.as_mut() {
            let sampled = source();
            self.set_fill_amount(sampled);
        }

        if let Some(position) = screen {
            self.screen_position = Some(position);
            self.surface.set_screen_position(position);
        }
    }
}

impl<S: PresentationSurface> Presentable for FollowIndicator<S> {
    type Surface = S;

    fn surface(&self) -> &S {
        &self.surface
    }
}

impl<S: fmt::Debug> fmt::Debug for FollowIndicator<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FollowIndicator")
            .field("followed", &self.followed)
            .field("viewer", &self.viewer)
            .field("offset", &self.offset)
            .field("visible_radius", &self.visible_radius)
            .field("transition_speed", &self.transition_speed)
            .field("smoothing", &self.smoothing)
            .field("current_opacity", &self.current_opacity)
            .field("fill_ratio", &self.fill_ratio)
            .field("fill_source", &self.fill_source.as_ref().map(|_| "bound"))
            .field("status", &self.status)
            .field("surface", &self.surface)
            .finish_non_exhaustive()
    }
}
