//! Debug domain: hotkeys and runtime tweaks.

use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use crate::core::{LevelResetEvent, RunStats};
use crate::debug::state::DebugState;
use crate::debug::ui::{
    DebugInfoOverlay, DebugStatusMessage, spawn_debug_info_overlay, spawn_status_message,
};
use crate::movement::{Dead, Invulnerable, MovementState, Player};
use crate::traps::TrapZone;

const MESSAGE_SECONDS: f32 = 2.0;

pub(crate) fn setup_status_message(mut commands: Commands) {
    spawn_status_message(&mut commands);
}

/// Ctrl+I toggles starpower, Ctrl+R forces a level reset, F3 toggles the
/// info overlay.
pub(crate) fn handle_debug_hotkeys(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut debug_state: ResMut<DebugState>,
    mut resets: MessageWriter<LevelResetEvent>,
    mut players: Query<&mut Invulnerable, With<Player>>,
) {
    if keyboard.just_pressed(KeyCode::F3) {
        debug_state.show_info = !debug_state.show_info;
    }

    let ctrl = keyboard.pressed(KeyCode::ControlLeft) || keyboard.pressed(KeyCode::ControlRight);
    if !ctrl {
        return;
    }

    if keyboard.just_pressed(KeyCode::KeyI) {
        debug_state.invincible = !debug_state.invincible;
        if !debug_state.invincible {
            for mut invulnerable in &mut players {
                invulnerable.timer = 0.0;
            }
        }
        let msg = if debug_state.invincible {
            "Starpower ON"
        } else {
            "Starpower OFF"
        };
        info!("[DEBUG] {}", msg);
        debug_state.set_message(msg, MESSAGE_SECONDS);
    }

    if keyboard.just_pressed(KeyCode::KeyR) {
        resets.write(LevelResetEvent);
        info!("[DEBUG] Forced level reset");
        debug_state.set_message("Level reset", MESSAGE_SECONDS);
    }
}

/// Keeps the player invulnerable while starpower is on, including after a
/// respawn.
pub(crate) fn apply_invincibility(
    debug_state: Res<DebugState>,
    mut players: Query<&mut Invulnerable, With<Player>>,
) {
    if !debug_state.invincible {
        return;
    }
    for mut invulnerable in &mut players {
        if invulnerable.timer.is_finite() {
            *invulnerable = Invulnerable::permanent();
        }
    }
}

pub(crate) fn update_status_message(
    time: Res<Time>,
    mut debug_state: ResMut<DebugState>,
    mut texts: Query<&mut Text, With<DebugStatusMessage>>,
) {
    debug_state.tick_message(time.delta_secs());
    let shown = debug_state.message().unwrap_or_default();
    for mut text in &mut texts {
        if text.as_str() != shown {
            **text = shown.to_string();
        }
    }
}

/// Update the debug info overlay with current player and trap state
pub(crate) fn update_debug_info_overlay(
    mut commands: Commands,
    debug_state: Res<DebugState>,
    stats: Res<RunStats>,
    players: Query<(&Transform, &MovementState, Has<Dead>), With<Player>>,
    zones: Query<&TrapZone>,
    mut overlay_query: Query<&mut Text, With<DebugInfoOverlay>>,
    existing_overlay: Query<Entity, With<DebugInfoOverlay>>,
) {
    if !debug_state.show_info {
        for entity in &existing_overlay {
            commands.entity(entity).despawn();
        }
        return;
    }

    if existing_overlay.is_empty() {
        spawn_debug_info_overlay(&mut commands);
        return;
    }

    let Ok(mut text) = overlay_query.single_mut() else {
        return;
    };

    let mut lines = Vec::new();
    if let Some((transform, state, dead)) = players.iter().next() {
        let pos = transform.translation;
        lines.push(format!("Pos: ({:.0}, {:.0})", pos.x, pos.y));
        lines.push(format!(
            "Grounded: {}  Coyote: {:.2}  Dead: {}",
            state.on_ground, state.coyote_timer, dead
        ));
    }
    lines.push(format!(
        "Level: {}-{}  Time: {}",
        stats.world,
        stats.stage,
        stats.formatted_time()
    ));
    lines.push(format!("Starpower: {}", debug_state.invincible));
    for zone in &zones {
        lines.push(format!(
            "Trap {}: {:?}",
            zone.trap_id,
            zone.controller.phase()
        ));
    }
    **text = lines.join("\n");
}
