//! Headless demo: a wounded scout walks away from the player while its
//! floating health bar drains and fades out.
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use bevy::transform::TransformPlugin;
use clap::Parser;
use floatbar::prelude::*;
use floatbar::{init_logging, FillValue, FillValuePlugin, IndicatorProjection};
use log::{debug, info};

/// Floating bar demo
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
    /// JSON settings file overriding the defaults
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Number of frames to simulate
    #[arg(long, default_value_t = 240)]
    frames: u32,
    /// Simulated frame time in milliseconds
    #[arg(long, default_value_t = 16)]
    frame_ms: u64,
    /// Scout walking speed in world units per second
    #[arg(long, default_value_t = 400.0)]
    target_speed: f32,
}

/// Hit points of the demo scout.
#[derive(Component, Debug, Clone, Copy)]
struct Health {
    current: f32,
    max: f32,
}

impl FillValue for Health {
    fn fill_ratio(&self) -> f32 {
        self.current / self.max
    }
}

/// Marks the scout and carries its walking speed.
#[derive(Component, Debug, Clone, Copy)]
struct Scout {
    speed: f32,
}

/// Marks the player the bar fades relative to.
#[derive(Component, Debug, Clone, Copy)]
struct Player;

/// The spawned bar.
#[derive(Resource, Debug, Clone, Copy)]
struct DemoBar(Entity);

/// Walking speed handed to the scout at spawn.
#[derive(Resource, Debug, Clone, Copy)]
struct ScoutSpeed(f32);

#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy systems require parameters by value, not by reference."
)]
fn spawn_scene(
    mut commands: Commands,
    settings: Res<FloatingBarSettings>,
    speed: Res<ScoutSpeed>,
) {
    let player = commands
        .spawn((Player, Transform::default(), Name::new("Player")))
        .id();
    let scout = commands
        .spawn((
            Scout { speed: speed.0 },
            Health {
                current: 100.0,
                max: 100.0,
            },
            Transform::from_xyz(200.0, 0.0, 0.0),
            Name::new("Scout"),
        ))
        .id();
    let bar = FloatingBarSpawn::new(player, scout)
        .with_offset(Vec3::new(0.0, 40.0, 0.0))
        .spawn(&mut commands, &settings);
    commands.insert_resource(DemoBar(bar));
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy systems require parameters by value, not by reference."
)]
fn walk_and_bleed(time: Res<Time>, mut scouts: Query<(&Scout, &mut Transform, &mut Health)>) {
    let delta = time.delta_secs();
    for (scout, mut transform, mut health) in &mut scouts {
        transform.translation.x += scout.speed * delta;
        health.current = (health.current - 10.0 * delta).max(0.0);
    }
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy systems require parameters by value, not by reference."
)]
fn follow_player_with_projection(
    players: Query<&GlobalTransform, With<Player>>,
    mut projection: ResMut<IndicatorProjection>,
) {
    let Ok(player) = players.single() else {
        return;
    };
    *projection = IndicatorProjection::new(OrthographicProjector {
        center: player.translation().truncate(),
        pixels_per_unit: 0.25,
    });
}

fn main() -> Result<()> {
    let args = Args::parse();
    if !init_logging(args.verbose) {
        debug!("keeping the previously installed logger");
    }

    let settings = match &args.config {
        Some(path) => FloatingBarSettings::load(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => FloatingBarSettings::default(),
    };
    info!(
        "simulating {} frames of {} ms, visible radius {}",
        args.frames, args.frame_ms, settings.visible_radius
    );

    let mut app = App::new();
    app.add_plugins((MinimalPlugins, TransformPlugin))
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(
            args.frame_ms,
        )))
        .insert_resource(settings)
        .insert_resource(ScoutSpeed(args.target_speed))
        .add_plugins((FloatingBarPlugin, FillValuePlugin::<Health>::default()))
        .add_systems(Startup, spawn_scene)
        .add_systems(
            Update,
            (walk_and_bleed, follow_player_with_projection)
                .before(floatbar::FloatingBarSet::Sample),
        );

    for frame in 1..=args.frames {
        app.update();
        if frame % 30 == 0 {
            report(&app, frame);
        }
    }
    Ok(())
}

fn report(app: &App, frame: u32) {
    let world = app.world();
    let Some(DemoBar(entity)) = world.get_resource::<DemoBar>().copied() else {
        info!("frame {frame}: bar despawned");
        return;
    };
    let Some(bar) = world.get::<FloatingBar>(entity) else {
        info!("frame {frame}: bar despawned");
        return;
    };
    info!(
        "frame {frame}: status {:?}, opacity {:.3}, fill {:.2}, screen {:?}",
        bar.status(),
        bar.opacity(),
        bar.fill_ratio(),
        bar.screen_position()
    );
}
