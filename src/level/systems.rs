//! Level domain: coins, goal, respawn and camera.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::core::{CoinCollectedEvent, LevelCompletedEvent, LevelResetEvent, RunStats};
use crate::level::components::{Coin, CurrentLevel, FollowCamera, Goal};
use crate::level::spawn::spawn_coin;
use crate::movement::{Dead, MovementState, Player};

type LivePlayerFilter = (With<Player>, Without<Dead>);

fn touches_player(event: &CollisionStart, players: &Query<(), LivePlayerFilter>) -> Option<Entity> {
    if players.contains(event.collider1) {
        Some(event.collider2)
    } else if players.contains(event.collider2) {
        Some(event.collider1)
    } else {
        None
    }
}

pub(crate) fn collect_coins(
    mut commands: Commands,
    mut collision_events: MessageReader<CollisionStart>,
    players: Query<(), LivePlayerFilter>,
    coins: Query<(), With<Coin>>,
    mut collected: MessageWriter<CoinCollectedEvent>,
) {
    let mut taken: Vec<Entity> = Vec::new();
    for event in collision_events.read() {
        let Some(other) = touches_player(event, &players) else {
            continue;
        };
        if !coins.contains(other) || taken.contains(&other) {
            continue;
        }
        taken.push(other);
        commands.entity(other).despawn();
        collected.write(CoinCollectedEvent { coin: other });
    }
}

pub(crate) fn reach_goal(
    mut collision_events: MessageReader<CollisionStart>,
    players: Query<(), LivePlayerFilter>,
    goals: Query<(), With<Goal>>,
    stats: Res<RunStats>,
    mut completed: MessageWriter<LevelCompletedEvent>,
) {
    let reached = collision_events
        .read()
        .filter_map(|event| touches_player(event, &players))
        .any(|other| goals.contains(other));

    if reached {
        completed.write(LevelCompletedEvent {
            world: stats.world,
            stage: stats.stage,
        });
    }
}

/// Brings the player back to the spawn point and restores every coin.
pub(crate) fn respawn_on_reset(
    mut commands: Commands,
    mut resets: MessageReader<LevelResetEvent>,
    current: Option<Res<CurrentLevel>>,
    mut players: Query<
        (
            &mut Transform,
            &mut LinearVelocity,
            &mut MovementState,
        ),
        With<Player>,
    >,
    coins: Query<Entity, With<Coin>>,
) {
    if resets.read().count() == 0 {
        return;
    }
    let Some(current) = current else {
        return;
    };

    let spawn = current.spawn_point();
    if let Ok((mut transform, mut velocity, mut state)) = players.get_mut(current.player) {
        transform.translation.x = spawn.x;
        transform.translation.y = spawn.y;
        *velocity = LinearVelocity::ZERO;
        *state = MovementState::default();
        commands
            .entity(current.player)
            .remove::<Dead>()
            .insert(Visibility::Inherited);
    }

    for coin in &coins {
        commands.entity(coin).despawn();
    }
    for position in &current.def.coins {
        spawn_coin(&mut commands, *position);
    }
    debug!("[LEVEL] Player respawned at {:?}", spawn);
}

pub(crate) fn follow_player(
    players: Query<&Transform, (With<Player>, Without<FollowCamera>)>,
    mut cameras: Query<&mut Transform, With<FollowCamera>>,
) {
    let Some(target) = players.iter().next() else {
        return;
    };
    for mut camera in &mut cameras {
        camera.translation.x = target.translation.x;
        camera.translation.y = target.translation.y.max(0.0);
    }
}
