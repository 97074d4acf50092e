//! Movement domain: player controller with coyote time and variable jump height.

mod bootstrap;
mod components;
mod resources;
mod systems;

pub use bootstrap::{PLAYER_SIZE, spawn_player};
pub use components::{Dead, Facing, GameLayer, Ground, Invulnerable, MovementState, Player, Wall};
pub use resources::{FALL_GRAVITY_MULTIPLIER, MovementInput, MovementTuning};

use bevy::prelude::*;

use crate::core::GameState;
use crate::movement::bootstrap::configure_tuning;
use crate::movement::systems::{
    apply_gravity, apply_horizontal_movement, apply_jump, detect_ground, read_input,
    update_facing, update_timers,
};

pub struct MovementPlugin;

impl Plugin for MovementPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MovementTuning>()
            .init_resource::<MovementInput>()
            .add_systems(Startup, configure_tuning)
            .add_systems(
                Update,
                (
                    read_input,
                    detect_ground,
                    update_timers,
                    apply_horizontal_movement,
                    apply_jump,
                    apply_gravity,
                    update_facing,
                )
                    .chain()
                    .run_if(in_state(GameState::Playing)),
            );
    }
}
