//! Traps domain: spawning transport traps from level data.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::content::{BoxDef, CrushDefaults, TrapDef};
use crate::level::LevelEntity;
use crate::movement::GameLayer;
use crate::traps::components::TrapZone;
use crate::traps::controller::ActivationController;
use crate::traps::crush::{CrushDetector, CrushSettings, closing_wall_targets};
use crate::traps::transport::{TrackedObject, TransportSettings};

const WALL_COLOR: Color = Color::srgb(0.45, 0.45, 0.5);
const PLATFORM_COLOR: Color = Color::srgb(0.55, 0.4, 0.25);
const ZONE_COLOR: Color = Color::srgba(1.0, 0.9, 0.2, 0.15);

fn spawn_moving_body(commands: &mut Commands, area: &BoxDef, color: Color) -> Entity {
    let size = area.extents();
    let center = area.center();
    commands
        .spawn((
            LevelEntity,
            Sprite {
                color,
                custom_size: Some(size),
                ..default()
            },
            Transform::from_xyz(center.x, center.y, 0.0),
            RigidBody::Kinematic,
            Collider::rectangle(size.x, size.y),
            CollisionLayers::new(GameLayer::Ground, [GameLayer::Player]),
        ))
        .id()
}

fn spawn_zone(commands: &mut Commands, zone: &BoxDef, trap: TrapZone) -> Entity {
    let size = zone.extents();
    let center = zone.center();
    commands
        .spawn((
            trap,
            LevelEntity,
            Sprite {
                color: ZONE_COLOR,
                custom_size: Some(size),
                ..default()
            },
            Transform::from_xyz(center.x, center.y, -1.0),
            Collider::rectangle(size.x, size.y),
            Sensor,
            CollisionEventsEnabled,
            CollisionLayers::new(GameLayer::Sensor, [GameLayer::Player]),
        ))
        .id()
}

/// Spawns a crushing-walls or moving-platforms trap. Returns false for trap
/// kinds this module does not drive.
pub(crate) fn spawn_transport_trap(
    commands: &mut Commands,
    trap: &TrapDef,
    crush_defaults: &CrushDefaults,
) -> bool {
    match trap {
        TrapDef::CrushingWalls {
            id,
            zone,
            left_wall,
            right_wall,
            final_gap,
            move_speed,
            repeatable,
            return_delay,
        } => {
            let left = spawn_moving_body(commands, left_wall, WALL_COLOR);
            let right = spawn_moving_body(commands, right_wall, WALL_COLOR);
            let (left_target, right_target) =
                closing_wall_targets(left_wall.center(), right_wall.center(), *final_gap);

            let objects = vec![
                TrackedObject::new(left, left_wall.center(), left_target),
                TrackedObject::new(right, right_wall.center(), right_target),
            ];
            let crush = CrushSettings {
                threshold: *final_gap,
                sample_interval: crush_defaults.sample_interval,
                margin_factor: crush_defaults.margin_factor,
                probe_padding: crush_defaults.probe_padding,
                probe_height: crush_defaults.probe_height,
                nudge_distance: crush_defaults.nudge_distance,
            };
            let controller = ActivationController::new(
                objects,
                TransportSettings::from_return_delay(*move_speed, *return_delay),
                *repeatable,
            )
            .with_crush_detection(CrushDetector::new(left, right, crush));

            spawn_zone(commands, zone, TrapZone::new(id.clone(), controller));
            debug!("[TRAP] Spawned crushing walls '{}'", id);
            true
        }
        TrapDef::MovingPlatforms {
            id,
            zone,
            platforms,
            direction,
            distance,
            move_speed,
            repeatable,
            return_delay,
        } => {
            let move_vector = direction.vector(*distance);
            let objects = platforms
                .iter()
                .map(|area| {
                    let body = spawn_moving_body(commands, area, PLATFORM_COLOR);
                    TrackedObject::displaced(body, area.center(), move_vector)
                })
                .collect();
            let controller = ActivationController::new(
                objects,
                TransportSettings::from_return_delay(*move_speed, *return_delay),
                *repeatable,
            );

            spawn_zone(commands, zone, TrapZone::new(id.clone(), controller));
            debug!(
                "[TRAP] Spawned {} moving platform(s) '{}'",
                platforms.len(),
                id
            );
            true
        }
        _ => false,
    }
}
