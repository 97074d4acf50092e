//! Core domain: game state, run statistics and level flow.

mod events;
mod resources;
mod state;
mod systems;
#[cfg(test)]
mod tests;
mod ui;

pub use events::{
    CoinCollectedEvent, HitSource, LevelCompletedEvent, LevelResetEvent, PlayerDiedEvent,
    PlayerHitEvent,
};
pub use resources::{COIN_WRAP, HazardRng, PIXELS_PER_UNIT, PendingReset, RunStats};
pub use state::GameState;

use bevy::prelude::*;

use crate::core::systems::{
    count_coins, finish_boot, handle_level_completed, handle_player_death, resolve_player_hits,
    restart_timer_on_reset, setup_camera, start_next_level, tick_level_timer, tick_pending_reset,
};
use crate::core::ui::{
    cleanup_hud, cleanup_level_complete_screen, spawn_hud, spawn_level_complete_screen, update_hud,
};

pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<GameState>()
            .init_resource::<RunStats>()
            .init_resource::<PendingReset>()
            .init_resource::<HazardRng>()
            .add_message::<PlayerHitEvent>()
            .add_message::<PlayerDiedEvent>()
            .add_message::<LevelResetEvent>()
            .add_message::<CoinCollectedEvent>()
            .add_message::<LevelCompletedEvent>()
            .add_systems(Startup, (setup_camera, finish_boot))
            .add_systems(OnEnter(GameState::Playing), spawn_hud)
            .add_systems(OnExit(GameState::Playing), cleanup_hud)
            .add_systems(
                Update,
                (
                    resolve_player_hits,
                    handle_player_death,
                    tick_pending_reset,
                    restart_timer_on_reset,
                    tick_level_timer,
                    count_coins,
                    handle_level_completed,
                    update_hud,
                )
                    .chain()
                    .run_if(in_state(GameState::Playing)),
            )
            .add_systems(
                OnEnter(GameState::LevelComplete),
                spawn_level_complete_screen,
            )
            .add_systems(
                OnExit(GameState::LevelComplete),
                cleanup_level_complete_screen,
            )
            .add_systems(
                Update,
                start_next_level.run_if(in_state(GameState::LevelComplete)),
            );
    }
}
