//! Developer tools, compiled in with the `dev-tools` feature.
//!
//! - Ctrl+I toggles starpower (player ignores non-lethal hits)
//! - Ctrl+R forces a level reset
//! - F3 toggles the info overlay

mod state;
mod systems;
mod ui;

use bevy::prelude::*;

use crate::core::GameState;

pub use state::DebugState;
pub use ui::{DebugInfoOverlay, DebugStatusMessage};

use systems::{
    apply_invincibility, handle_debug_hotkeys, setup_status_message, update_debug_info_overlay,
    update_status_message,
};

pub struct DebugPlugin;

impl Plugin for DebugPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DebugState>()
            .add_systems(Startup, setup_status_message)
            .add_systems(
                Update,
                (
                    handle_debug_hotkeys.run_if(in_state(GameState::Playing)),
                    apply_invincibility,
                    update_status_message,
                )
                    .chain(),
            )
            .add_systems(Update, update_debug_info_overlay);
    }
}
