//! Level domain: building a level from its definition.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::content::{
    GameplayDefaults, LevelDef, LevelLibrary, Point, SolidDef, SolidKind, to_vec2, validate_trap,
};
use crate::core::{PendingReset, RunStats};
use crate::hazards::spawn_hazard;
use crate::level::components::{Coin, CurrentLevel, Goal, LevelEntity};
use crate::movement::{GameLayer, Ground, Wall, spawn_player};
use crate::traps::spawn_transport_trap;

const GROUND_COLOR: Color = Color::srgb(0.4, 0.5, 0.4);
const WALL_COLOR: Color = Color::srgb(0.3, 0.3, 0.4);
const COIN_COLOR: Color = Color::srgb(1.0, 0.85, 0.1);
const GOAL_COLOR: Color = Color::srgb(0.2, 0.8, 0.3);
pub const COIN_RADIUS: f32 = 10.0;

fn spawn_solid(commands: &mut Commands, solid: &SolidDef) {
    let size = solid.area.extents();
    let center = solid.area.center();
    let mut entity = commands.spawn((
        LevelEntity,
        Transform::from_xyz(center.x, center.y, 0.0),
        RigidBody::Static,
        Collider::rectangle(size.x, size.y),
    ));
    match solid.kind {
        SolidKind::Ground => entity.insert((
            Ground,
            Sprite {
                color: GROUND_COLOR,
                custom_size: Some(size),
                ..default()
            },
            CollisionLayers::new(GameLayer::Ground, [GameLayer::Player]),
        )),
        SolidKind::Wall => entity.insert((
            Wall,
            Sprite {
                color: WALL_COLOR,
                custom_size: Some(size),
                ..default()
            },
            CollisionLayers::new(GameLayer::Wall, [GameLayer::Player]),
        )),
    };
}

pub(crate) fn spawn_coin(commands: &mut Commands, position: Point) {
    let position = to_vec2(position);
    commands.spawn((
        LevelEntity,
        Coin,
        Sprite {
            color: COIN_COLOR,
            custom_size: Some(Vec2::splat(COIN_RADIUS * 2.0)),
            ..default()
        },
        Transform::from_xyz(position.x, position.y, 0.5),
        Collider::circle(COIN_RADIUS),
        Sensor,
        CollisionEventsEnabled,
        CollisionLayers::new(GameLayer::Sensor, [GameLayer::Player]),
    ));
}

/// Spawns geometry, coins, the goal, every valid trap and the player.
/// Returns the player entity.
pub(crate) fn build_level(
    commands: &mut Commands,
    level: &LevelDef,
    defaults: &GameplayDefaults,
) -> Entity {
    for solid in &level.solids {
        spawn_solid(commands, solid);
    }
    for coin in &level.coins {
        spawn_coin(commands, *coin);
    }
    if let Some(goal) = &level.goal {
        let size = goal.extents();
        let center = goal.center();
        commands.spawn((
            LevelEntity,
            Goal,
            Sprite {
                color: GOAL_COLOR,
                custom_size: Some(size),
                ..default()
            },
            Transform::from_xyz(center.x, center.y, 0.0),
            Collider::rectangle(size.x, size.y),
            Sensor,
            CollisionEventsEnabled,
            CollisionLayers::new(GameLayer::Sensor, [GameLayer::Player]),
        ));
    }

    let label = level.label();
    let mut spawned = 0;
    for trap in &level.traps {
        let problems = validate_trap(&label, trap);
        if !problems.is_empty() {
            for problem in &problems {
                warn!("[LEVEL] Skipping trap: {}", problem);
            }
            continue;
        }
        let handled = if trap.is_transport() {
            spawn_transport_trap(commands, trap, &defaults.crush)
        } else {
            spawn_hazard(commands, trap)
        };
        if handled {
            spawned += 1;
        }
    }

    let player = spawn_player(commands, to_vec2(level.player_spawn));
    commands.entity(player).insert(LevelEntity);

    info!(
        "[LEVEL] Built {} with {} trap(s), {} coin(s)",
        label,
        spawned,
        level.coins.len()
    );
    player
}

/// Runs on entering play: builds the level `RunStats` points at.
pub(crate) fn spawn_current_level(
    mut commands: Commands,
    library: Option<Res<LevelLibrary>>,
    defaults: Option<Res<GameplayDefaults>>,
    mut stats: ResMut<RunStats>,
    mut pending: ResMut<PendingReset>,
) {
    let Some(library) = library else {
        error!("[LEVEL] No level library loaded; nothing to play");
        return;
    };

    let level = match library.get(stats.world, stats.stage) {
        Some(level) => level,
        None => match library.first() {
            Some(level) => {
                warn!(
                    "[LEVEL] Level {}-{} not found; loading {}",
                    stats.world,
                    stats.stage,
                    level.label()
                );
                level
            }
            None => {
                error!("[LEVEL] Level library is empty; nothing to play");
                return;
            }
        },
    };

    let fallback = GameplayDefaults::default();
    let defaults = defaults.as_deref().unwrap_or(&fallback);
    let player = build_level(&mut commands, level, defaults);

    stats.load_level(level.world, level.stage);
    pending.cancel();
    commands.insert_resource(CurrentLevel {
        def: level.clone(),
        player,
    });
}

pub(crate) fn cleanup_level(mut commands: Commands, query: Query<Entity, With<LevelEntity>>) {
    for entity in query.iter() {
        commands.entity(entity).despawn();
    }
    commands.remove_resource::<CurrentLevel>();
}
