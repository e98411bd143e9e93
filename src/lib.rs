#![cfg_attr(docsrs, feature(doc_cfg))]
//! Floating indicator bars for Bevy games.
//!
//! A floating bar follows a world-space entity, shows a fill meter such as
//! health above it and fades out when the entity is too far from the viewer.
//! [`FollowIndicator`] holds the per-frame logic and works with any host;
//! [`FloatingBarPlugin`] runs it inside a Bevy app.
pub mod color;
pub mod config;
pub mod constants;
pub mod indicator;
pub mod logging;
pub mod numeric;
pub mod plugin;
pub mod positions;
pub mod projection;
pub mod surface;
pub mod visibility;

#[cfg(feature = "render")]
#[cfg_attr(docsrs, doc(cfg(feature = "render")))]
pub mod camera;
#[cfg(feature = "ui")]
#[cfg_attr(docsrs, doc(cfg(feature = "ui")))]
pub mod ui;

pub use constants::*;

// Re-export commonly used items
pub use color::FillColor;
pub use config::{FloatingBarSettings, SettingsError};
pub use indicator::{
    FillSource, FollowIndicator, FrameContext, IndicatorStatus, Presentable, Tickable,
};
pub use logging::init as init_logging;
pub use plugin::{
    fill_from_followed_system, tick_floating_bars_system, FillValue, FillValuePlugin,
    FloatingBar, FloatingBarPlugin, FloatingBarSet, FloatingBarSpawn, FollowTargetLost,
};
pub use positions::{EntityLocation, EntityPositions, PositionTable};
pub use projection::{IndicatorProjection, OrthographicProjector, ScreenProjector, ViewGeometry};
pub use surface::{BarSurface, PresentationSurface};
pub use visibility::Smoothing;

#[cfg(feature = "render")]
#[cfg_attr(docsrs, doc(cfg(feature = "render")))]
pub use camera::{CameraProjector, IndicatorCamera};

pub mod prelude {
    //! Prelude exports used in documentation examples.
    //!
    //! ```rust,no_run
    //! use floatbar::prelude::*;
    //! ```

    pub use crate::BarSurface;
    pub use crate::FillColor;
    pub use crate::FloatingBar;
    pub use crate::FloatingBarPlugin;
    pub use crate::FloatingBarSettings;
    pub use crate::FloatingBarSpawn;
    pub use crate::FollowIndicator;
    pub use crate::FrameContext;
    pub use crate::OrthographicProjector;
    pub use crate::PositionTable;
    pub use crate::Presentable;
    pub use crate::Tickable;
    pub use crate::ViewGeometry;
}
