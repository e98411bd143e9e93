//! `bevy_ui` presentation for floating bars.
//!
//! Each new [`FloatingBar`] receives an absolutely positioned frame node with
//! a fill child. Every frame the bar's [`BarSurface`] is mirrored onto those
//! nodes: the frame is centred on the projected position, the fill width
//! follows the fill ratio and both colours carry the bar opacity.
//!
//! Labels set through `FollowIndicator::set_label` are kept on the
//! [`BarSurface`] but not drawn here; hosts that enable `bevy_text` can read
//! them from the surface.

use bevy::prelude::*;

use crate::config::FloatingBarSettings;
use crate::indicator::Presentable;
use crate::plugin::{FloatingBar, FloatingBarSet};
use crate::surface::BarSurface;

/// Backdrop colour behind the fill.
const FRAME_COLOR: Color = Color::srgba(0.05, 0.05, 0.05, 0.8);

/// Links a bar to its fill node.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct BarNodes {
    /// Child node showing the fill.
    pub fill: Entity,
}

/// Marker on the fill node of a bar.
#[derive(Component, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BarFill;

/// Attaches the frame and fill nodes to newly spawned bars.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy systems require parameters by value, not by reference."
)]
pub fn attach_bar_nodes_system(
    mut commands: Commands,
    settings: Res<FloatingBarSettings>,
    bars: Query<Entity, Added<FloatingBar>>,
) {
    for bar in &bars {
        let fill = commands
            .spawn((
                BarFill,
                Node {
                    width: Val::Percent(100.0),
                    height: Val::Percent(100.0),
                    ..default()
                },
                BackgroundColor(Color::NONE),
            ))
            .id();
        commands
            .entity(bar)
            .insert((
                Node {
                    position_type: PositionType::Absolute,
                    width: Val::Px(settings.bar_width),
                    height: Val::Px(settings.bar_height),
                    ..default()
                },
                BackgroundColor(Color::NONE),
                Visibility::Hidden,
                BarNodes { fill },
            ))
            .add_child(fill);
    }
}

/// Mirrors each bar's surface onto its nodes.
#[expect(
    clippy::type_complexity,
    reason = "Disjoint node queries need explicit With/Without filters."
)]
pub fn sync_bar_nodes_system(
    mut bars: Query<(
        &FloatingBar,
        &BarNodes,
        &mut Node,
        &mut BackgroundColor,
        &mut Visibility,
    )>,
    mut fills: Query<(&mut Node, &mut BackgroundColor), (With<BarFill>, Without<FloatingBar>)>,
) {
    for (bar, nodes, mut frame, mut backdrop, mut visibility) in &mut bars {
        let surface: &BarSurface = bar.surface();
        let shown = surface.opacity > 0.0 && surface.screen_position.is_some();
        *visibility = if shown {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
        if let Some(position) = surface.screen_position {
            let half_width = node_px(frame.width) * 0.5;
            let half_height = node_px(frame.height) * 0.5;
            frame.left = Val::Px(position.x - half_width);
            frame.top = Val::Px(position.y - half_height);
        }
        backdrop.0 = FRAME_COLOR.with_alpha(FRAME_COLOR.alpha() * surface.opacity);

        let Ok((mut fill_node, mut fill_color)) = fills.get_mut(nodes.fill) else {
            continue;
        };
        fill_node.width = Val::Percent(surface.fill_ratio * 100.0);
        let color = Color::from(surface.fill_color);
        fill_color.0 = color.with_alpha(color.alpha() * surface.opacity);
    }
}

fn node_px(value: Val) -> f32 {
    match value {
        Val::Px(px) => px,
        _ => 0.0,
    }
}

pub(crate) fn install(app: &mut App) {
    app.add_systems(
        Update,
        (
            attach_bar_nodes_system.before(FloatingBarSet::Sample),
            sync_bar_nodes_system.in_set(FloatingBarSet::Present),
        ),
    );
}
