//! Level domain: spawning levels from content, coins, the goal and respawns.

mod components;
mod spawn;
mod systems;

pub use components::{Coin, CurrentLevel, FollowCamera, Goal, LevelEntity};
pub use spawn::COIN_RADIUS;

use bevy::prelude::*;

use crate::core::GameState;
use crate::level::spawn::{cleanup_level, spawn_current_level};
use crate::level::systems::{collect_coins, follow_player, reach_goal, respawn_on_reset};

pub struct LevelPlugin;

impl Plugin for LevelPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(GameState::Playing), spawn_current_level)
            .add_systems(OnExit(GameState::Playing), cleanup_level)
            .add_systems(
                Update,
                (collect_coins, reach_goal, respawn_on_reset, follow_player)
                    .run_if(in_state(GameState::Playing)),
            );
    }
}
