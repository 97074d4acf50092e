//! Movement domain: player spawning and data-driven movement setup.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::content::GameplayDefaults;
use crate::movement::{GameLayer, Invulnerable, MovementState, MovementTuning, Player};

pub const PLAYER_SIZE: Vec2 = Vec2::new(24.0, 32.0);

/// Load movement tuning from gameplay defaults when they are available.
pub(crate) fn configure_tuning(
    defaults: Option<Res<GameplayDefaults>>,
    mut tuning: ResMut<MovementTuning>,
) {
    match defaults {
        Some(defaults) => {
            *tuning = MovementTuning::from_defaults(&defaults.movement);
            info!(
                "Movement tuning loaded: jump_velocity={:.1}, gravity={:.1}",
                tuning.jump_velocity(),
                tuning.gravity()
            );
        }
        None => warn!("GameplayDefaults not available, using default movement tuning"),
    }
}

/// Spawn the player body at `position`. Gravity is applied by the movement
/// systems, not by the physics engine.
pub fn spawn_player(commands: &mut Commands, position: Vec2) -> Entity {
    commands
        .spawn((
            (
                Player,
                MovementState::default(),
                Invulnerable::default(),
            ),
            Sprite {
                color: Color::srgb(0.85, 0.2, 0.15),
                custom_size: Some(PLAYER_SIZE),
                ..default()
            },
            Transform::from_xyz(position.x, position.y, 1.0),
            (
                RigidBody::Dynamic,
                Collider::rectangle(PLAYER_SIZE.x, PLAYER_SIZE.y),
                LockedAxes::ROTATION_LOCKED,
                LinearVelocity::default(),
                GravityScale(0.0),
                Friction::new(0.0),
                CollisionEventsEnabled,
                CollisionLayers::new(
                    GameLayer::Player,
                    [
                        GameLayer::Ground,
                        GameLayer::Wall,
                        GameLayer::Sensor,
                        GameLayer::Hazard,
                    ],
                ),
            ),
        ))
        .id()
}
