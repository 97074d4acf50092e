//! Hazards domain: spawning non-transport traps from level data.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::content::{BoxDef, TrapDef};
use crate::core::HitSource;
use crate::hazards::components::{
    AcidRain, BouncePlatform, Cloud, FallingPlatform, FallingSpike, Hazard, SpikeTrap,
};
use crate::hazards::falling::{FallSequence, FallSettings};
use crate::hazards::rain::{RainCycle, RainSettings};
use crate::level::LevelEntity;
use crate::movement::GameLayer;
use crate::traps::TriggerGate;

/// Spike fall speeds are given in world units against standard gravity.
const STANDARD_GRAVITY: f32 = 9.81;

const SPIKE_COLOR: Color = Color::srgb(0.75, 0.75, 0.8);
const CLOUD_COLOR: Color = Color::srgb(0.95, 0.95, 0.95);
const PLATFORM_COLOR: Color = Color::srgb(0.6, 0.45, 0.3);
const BOUNCE_COLOR: Color = Color::srgb(0.3, 0.8, 0.4);
const ZONE_COLOR: Color = Color::srgba(1.0, 0.3, 0.2, 0.12);

fn sprite(area: &BoxDef, color: Color) -> Sprite {
    Sprite {
        color,
        custom_size: Some(area.extents()),
        ..default()
    }
}

fn at(area: &BoxDef, z: f32) -> Transform {
    let center = area.center();
    Transform::from_xyz(center.x, center.y, z)
}

fn solid_layers() -> CollisionLayers {
    CollisionLayers::new(GameLayer::Ground, [GameLayer::Player])
}

fn hazard_layers() -> CollisionLayers {
    CollisionLayers::new(GameLayer::Hazard, [GameLayer::Player])
}

fn zone_layers() -> CollisionLayers {
    CollisionLayers::new(GameLayer::Sensor, [GameLayer::Player])
}

/// Spawns every trap kind that is not driven by a trap zone's transport.
/// Returns false for kinds this module does not handle.
pub(crate) fn spawn_hazard(commands: &mut Commands, trap: &TrapDef) -> bool {
    match trap {
        TrapDef::FallingPlatform {
            id,
            platform,
            delay_before_fall,
            shake_duration,
            shake_intensity,
            fall_speed,
            fall_distance,
            despawn_delay,
        } => {
            let size = platform.extents();
            let mut entity = commands.spawn((
                LevelEntity,
                sprite(platform, PLATFORM_COLOR),
                at(platform, 0.0),
                RigidBody::Kinematic,
                Collider::rectangle(size.x, size.y),
                CollisionEventsEnabled,
                solid_layers(),
            ));
            let settings = FallSettings {
                delay_before_fall: *delay_before_fall,
                shake_duration: *shake_duration,
                shake_intensity: *shake_intensity,
                fall_speed: *fall_speed,
                fall_distance: *fall_distance,
                despawn_delay: *despawn_delay,
            };
            let sequence = FallSequence::new(entity.id(), platform.center(), settings);
            entity.insert(FallingPlatform {
                trap_id: id.clone(),
                sequence,
            });
            true
        }
        TrapDef::AcidRain {
            id,
            zone,
            clouds,
            duration,
            drop_frequency,
            drop_speed,
            repeatable,
        } => {
            let cloud_entities = clouds
                .iter()
                .map(|cloud| {
                    commands
                        .spawn((
                            LevelEntity,
                            Cloud { color: CLOUD_COLOR },
                            sprite(cloud, CLOUD_COLOR),
                            at(cloud, 2.0),
                        ))
                        .id()
                })
                .collect();

            let size = zone.extents();
            commands.spawn((
                LevelEntity,
                AcidRain {
                    trap_id: id.clone(),
                    gate: TriggerGate::new(*repeatable),
                    cycle: RainCycle::new(RainSettings {
                        duration: *duration,
                        drop_frequency: *drop_frequency,
                    }),
                    clouds: cloud_entities,
                    drop_speed: *drop_speed,
                },
                sprite(zone, ZONE_COLOR),
                at(zone, -1.0),
                Collider::rectangle(size.x, size.y),
                Sensor,
                CollisionEventsEnabled,
                zone_layers(),
            ));
            true
        }
        TrapDef::SpikeTrap {
            id,
            zone,
            spike,
            fall_speed,
        } => {
            let spike_size = spike.extents();
            let spike_entity = commands
                .spawn((
                    LevelEntity,
                    FallingSpike {
                        origin: spike.center(),
                    },
                    sprite(spike, SPIKE_COLOR),
                    at(spike, 0.5),
                    RigidBody::Static,
                    Collider::rectangle(spike_size.x, spike_size.y),
                    CollisionEventsEnabled,
                    hazard_layers(),
                ))
                .id();

            let size = zone.extents();
            commands.spawn((
                LevelEntity,
                SpikeTrap {
                    trap_id: id.clone(),
                    gate: TriggerGate::one_shot(),
                    spike: spike_entity,
                    gravity_scale: fall_speed / STANDARD_GRAVITY,
                },
                sprite(zone, ZONE_COLOR),
                at(zone, -1.0),
                Collider::rectangle(size.x, size.y),
                Sensor,
                CollisionEventsEnabled,
                zone_layers(),
            ));
            true
        }
        TrapDef::SpikeBlock { block, .. } => {
            let size = block.extents();
            commands.spawn((
                LevelEntity,
                Hazard {
                    lethal: true,
                    source: HitSource::SpikeBlock,
                },
                sprite(block, SPIKE_COLOR),
                at(block, 0.5),
                RigidBody::Static,
                Collider::rectangle(size.x, size.y),
                CollisionEventsEnabled,
                hazard_layers(),
            ));
            true
        }
        TrapDef::DeathBarrier { zone, .. } => {
            let size = zone.extents();
            commands.spawn((
                LevelEntity,
                Hazard {
                    lethal: true,
                    source: HitSource::DeathBarrier,
                },
                at(zone, 0.0),
                Collider::rectangle(size.x, size.y),
                Sensor,
                CollisionEventsEnabled,
                hazard_layers(),
            ));
            true
        }
        TrapDef::BouncePlatform {
            platform,
            bounce_force,
            ..
        } => {
            let size = platform.extents();
            commands.spawn((
                LevelEntity,
                BouncePlatform {
                    bounce_force: *bounce_force,
                    color: BOUNCE_COLOR,
                    tint_remaining: 0.0,
                },
                sprite(platform, BOUNCE_COLOR),
                at(platform, 0.0),
                RigidBody::Static,
                Collider::rectangle(size.x, size.y),
                CollisionEventsEnabled,
                solid_layers(),
            ));
            true
        }
        TrapDef::CrushingWalls { .. } | TrapDef::MovingPlatforms { .. } => false,
    }
}
