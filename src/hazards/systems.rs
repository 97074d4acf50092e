//! Hazards domain: contact handling, timers and resets for hazards.

use avian2d::prelude::*;
use bevy::prelude::*;
use rand::Rng;

use crate::core::{HazardRng, HitSource, LevelResetEvent, PlayerHitEvent};
use crate::hazards::components::{
    ACID_DROP_LIFETIME, AcidDrop, AcidRain, BOUNCE_TINT_TIME, BouncePlatform, Cloud,
    FallingPlatform, FallingSpike, Hazard, SpikeTrap,
};
use crate::hazards::falling::FallStep;
use crate::level::LevelEntity;
use crate::movement::{Dead, GameLayer, Player};
use crate::traps::TransformIo;

const RAINING_CLOUD_COLOR: Color = Color::srgb(0.9, 0.1, 0.1);
const DROP_COLOR: Color = Color::srgb(0.9, 0.1, 0.1);
const DROP_SIZE: Vec2 = Vec2::new(19.2, 28.8);
const DROP_RADIUS: f32 = 9.6;
const TINT_COLOR: Color = Color::BLACK;
/// How far below a cloud's center drops appear.
const DROP_OFFSET: f32 = 16.0;
/// Minimum alignment with "down" for a landing to count as from above.
const LANDING_DOT: f32 = 0.25;

type LivePlayerFilter = (With<Player>, Without<Dead>);

/// Each collision pair as `(other, player)` when one side is a live player.
fn player_pairs<'a>(
    events: impl Iterator<Item = &'a CollisionStart> + 'a,
    players: &'a Query<(), LivePlayerFilter>,
) -> impl Iterator<Item = (Entity, Entity)> + 'a {
    events.filter_map(move |event| {
        if players.contains(event.collider2) {
            Some((event.collider1, event.collider2))
        } else if players.contains(event.collider1) {
            Some((event.collider2, event.collider1))
        } else {
            None
        }
    })
}

// ---------------------------------------------------------------------------
// Contact hazards
// ---------------------------------------------------------------------------

pub(crate) fn detect_hazard_contacts(
    mut commands: Commands,
    mut collision_events: MessageReader<CollisionStart>,
    players: Query<(), LivePlayerFilter>,
    hazards: Query<&Hazard>,
    drops: Query<(), With<AcidDrop>>,
    mut hits: MessageWriter<PlayerHitEvent>,
) {
    for (other, player) in player_pairs(collision_events.read(), &players) {
        if let Ok(hazard) = hazards.get(other) {
            hits.write(PlayerHitEvent {
                player,
                lethal: hazard.lethal,
                source: hazard.source,
            });
        } else if drops.contains(other) {
            hits.write(PlayerHitEvent {
                player,
                lethal: false,
                source: HitSource::AcidDrop,
            });
            commands.entity(other).despawn();
        }
    }
}

// ---------------------------------------------------------------------------
// Falling platforms
// ---------------------------------------------------------------------------

pub(crate) fn detect_falling_platform_contacts(
    mut collision_events: MessageReader<CollisionStart>,
    players: Query<(), LivePlayerFilter>,
    mut platforms: Query<&mut FallingPlatform>,
) {
    for (other, _) in player_pairs(collision_events.read(), &players) {
        if let Ok(mut platform) = platforms.get_mut(other) {
            platform.sequence.on_player_contact();
        }
    }
}

pub(crate) fn advance_falling_platforms(
    mut commands: Commands,
    time: Res<Time>,
    mut rng: ResMut<HazardRng>,
    mut platforms: Query<(Entity, &mut FallingPlatform)>,
    mut transforms: Query<&'static mut Transform>,
) {
    let dt = time.delta_secs();

    for (entity, mut platform) in &mut platforms {
        let mut io = TransformIo::new(&mut transforms);
        match platform.sequence.advance(dt, &mut io, &mut rng.0) {
            FallStep::StartedFalling => {
                debug!("[HAZARD] Falling platform '{}' dropping", platform.trap_id);
                commands.entity(entity).insert(Sensor);
            }
            FallStep::Vanished => {
                commands.entity(entity).insert(Visibility::Hidden);
            }
            FallStep::Unchanged => {}
        }
    }
}

// ---------------------------------------------------------------------------
// Acid rain
// ---------------------------------------------------------------------------

pub(crate) fn detect_acid_rain_entries(
    mut collision_events: MessageReader<CollisionStart>,
    players: Query<(), LivePlayerFilter>,
    mut rains: Query<&mut AcidRain>,
    mut clouds: Query<&mut Sprite, With<Cloud>>,
) {
    for (other, _) in player_pairs(collision_events.read(), &players) {
        let Ok(mut rain) = rains.get_mut(other) else {
            continue;
        };
        if !rain.gate.try_admit() {
            continue;
        }
        if !rain.cycle.start() {
            rain.gate.on_run_complete(false);
            continue;
        }

        info!("[HAZARD] Acid rain '{}' started", rain.trap_id);
        for cloud in &rain.clouds {
            if let Ok(mut sprite) = clouds.get_mut(*cloud) {
                sprite.color = RAINING_CLOUD_COLOR;
            }
        }
    }
}

pub(crate) fn advance_acid_rain(
    mut commands: Commands,
    time: Res<Time>,
    mut rng: ResMut<HazardRng>,
    mut rains: Query<&mut AcidRain>,
    mut clouds: Query<(&Cloud, &Transform, &mut Sprite)>,
) {
    let dt = time.delta_secs();

    for mut rain in &mut rains {
        let step = rain.cycle.advance(dt);

        for _ in 0..step.waves {
            for cloud in &rain.clouds {
                let Ok((_, transform, sprite)) = clouds.get(*cloud) else {
                    continue;
                };
                let width = sprite.custom_size.map(|s| s.x).unwrap_or(0.0);
                let offset_x = if width > 0.0 {
                    rng.0.random_range(-width / 2.0..width / 2.0)
                } else {
                    0.0
                };
                let origin = transform.translation.truncate();
                spawn_acid_drop(
                    &mut commands,
                    Vec2::new(origin.x + offset_x, origin.y - DROP_OFFSET),
                    rain.drop_speed,
                );
            }
        }

        if step.clouds_restored {
            for cloud in &rain.clouds {
                if let Ok((cloud, _, mut sprite)) = clouds.get_mut(*cloud) {
                    sprite.color = cloud.color;
                }
            }
        }
        if step.finished {
            rain.gate.on_run_complete(true);
            debug!("[HAZARD] Acid rain '{}' finished", rain.trap_id);
        }
    }
}

fn spawn_acid_drop(commands: &mut Commands, position: Vec2, speed: f32) {
    commands.spawn((
        LevelEntity,
        AcidDrop {
            speed,
            lifetime: ACID_DROP_LIFETIME,
        },
        Sprite {
            color: DROP_COLOR,
            custom_size: Some(DROP_SIZE),
            ..default()
        },
        Transform::from_xyz(position.x, position.y, 1.5),
        RigidBody::Kinematic,
        LinearVelocity(Vec2::new(0.0, -speed)),
        Collider::circle(DROP_RADIUS),
        Sensor,
        CollisionEventsEnabled,
        CollisionLayers::new(GameLayer::Hazard, [GameLayer::Player]),
    ));
}

/// Drops expire after their lifetime or when they reach solid ground.
pub(crate) fn update_acid_drops(
    mut commands: Commands,
    time: Res<Time>,
    spatial_query: SpatialQuery,
    mut drops: Query<(Entity, &Transform, &mut AcidDrop)>,
) {
    let dt = time.delta_secs();
    let solid_filter = SpatialQueryFilter::from_mask([GameLayer::Ground, GameLayer::Wall]);

    for (entity, transform, mut drop) in &mut drops {
        drop.lifetime -= dt;
        let reach = DROP_RADIUS + drop.speed * dt;
        let landed = spatial_query
            .cast_ray(
                transform.translation.truncate(),
                Dir2::NEG_Y,
                reach,
                true,
                &solid_filter,
            )
            .is_some();

        if landed || drop.lifetime <= 0.0 {
            commands.entity(entity).despawn();
        }
    }
}

// ---------------------------------------------------------------------------
// Spike traps
// ---------------------------------------------------------------------------

pub(crate) fn detect_spike_trap_entries(
    mut commands: Commands,
    mut collision_events: MessageReader<CollisionStart>,
    players: Query<(), LivePlayerFilter>,
    mut traps: Query<&mut SpikeTrap>,
) {
    for (other, _) in player_pairs(collision_events.read(), &players) {
        let Ok(mut trap) = traps.get_mut(other) else {
            continue;
        };
        if !trap.gate.try_admit() {
            continue;
        }

        info!("[HAZARD] Spike trap '{}' released", trap.trap_id);
        commands.entity(trap.spike).insert((
            RigidBody::Dynamic,
            GravityScale(trap.gravity_scale),
            Sensor,
            Hazard {
                lethal: true,
                source: HitSource::FallingSpike,
            },
        ));
    }
}

// ---------------------------------------------------------------------------
// Bounce platforms
// ---------------------------------------------------------------------------

/// True when `player` sits above `platform` closely enough to count as a landing.
pub(crate) fn landed_from_above(player: Vec2, platform: Vec2) -> bool {
    (platform - player).normalize_or_zero().dot(Vec2::NEG_Y) > LANDING_DOT
}

pub(crate) fn detect_bounces(
    mut collision_events: MessageReader<CollisionStart>,
    players: Query<(), LivePlayerFilter>,
    transforms: Query<&Transform>,
    mut velocities: Query<&mut LinearVelocity, LivePlayerFilter>,
    mut platforms: Query<(&mut BouncePlatform, &mut Sprite)>,
) {
    for (other, player) in player_pairs(collision_events.read(), &players) {
        let Ok((mut platform, mut sprite)) = platforms.get_mut(other) else {
            continue;
        };
        let (Ok(player_transform), Ok(platform_transform)) =
            (transforms.get(player), transforms.get(other))
        else {
            continue;
        };
        if !landed_from_above(
            player_transform.translation.truncate(),
            platform_transform.translation.truncate(),
        ) {
            continue;
        }

        if let Ok(mut velocity) = velocities.get_mut(player) {
            velocity.y = platform.bounce_force;
        }
        platform.tint_remaining = BOUNCE_TINT_TIME;
        sprite.color = TINT_COLOR;
        debug!("[HAZARD] Bounce, vy={:.1}", platform.bounce_force);
    }
}

pub(crate) fn fade_bounce_tint(
    time: Res<Time>,
    mut platforms: Query<(&mut BouncePlatform, &mut Sprite)>,
) {
    let dt = time.delta_secs();
    for (mut platform, mut sprite) in &mut platforms {
        if platform.tint_remaining <= 0.0 {
            continue;
        }
        platform.tint_remaining -= dt;
        if platform.tint_remaining <= 0.0 {
            sprite.color = platform.color;
        }
    }
}

// ---------------------------------------------------------------------------
// Reset
// ---------------------------------------------------------------------------

#[allow(clippy::too_many_arguments)]
pub(crate) fn reset_hazards(
    mut commands: Commands,
    mut resets: MessageReader<LevelResetEvent>,
    mut falling: Query<(Entity, &mut FallingPlatform)>,
    mut rains: Query<&mut AcidRain>,
    mut clouds: Query<(&Cloud, &mut Sprite), Without<BouncePlatform>>,
    drops: Query<Entity, With<AcidDrop>>,
    mut spike_traps: Query<&mut SpikeTrap>,
    spikes: Query<(Entity, &FallingSpike)>,
    mut bounces: Query<(&mut BouncePlatform, &mut Sprite), Without<Cloud>>,
    mut transforms: Query<&'static mut Transform>,
) {
    if resets.read().count() == 0 {
        return;
    }

    for (entity, mut platform) in &mut falling {
        let mut io = TransformIo::new(&mut transforms);
        platform.sequence.reset(&mut io);
        commands
            .entity(entity)
            .remove::<Sensor>()
            .insert(Visibility::Inherited);
    }

    for mut rain in &mut rains {
        rain.cycle.reset();
        rain.gate.reset();
    }
    for (cloud, mut sprite) in &mut clouds {
        sprite.color = cloud.color;
    }
    for entity in &drops {
        commands.entity(entity).despawn();
    }

    for mut trap in &mut spike_traps {
        trap.gate.reset();
    }
    for (entity, spike) in &spikes {
        if let Ok(mut transform) = transforms.get_mut(entity) {
            transform.translation.x = spike.origin.x;
            transform.translation.y = spike.origin.y;
        }
        commands
            .entity(entity)
            .remove::<(Sensor, GravityScale, Hazard)>()
            .insert((RigidBody::Static, LinearVelocity::ZERO));
    }

    for (mut platform, mut sprite) in &mut bounces {
        platform.tint_remaining = 0.0;
        sprite.color = platform.color;
    }

    info!("[HAZARD] Hazards re-armed");
}
