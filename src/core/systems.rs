//! Core domain: run flow systems and setup.

use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::content::{GameplayDefaults, LevelLibrary};
use crate::core::events::{
    CoinCollectedEvent, LevelCompletedEvent, LevelResetEvent, PlayerDiedEvent, PlayerHitEvent,
};
use crate::core::resources::{PendingReset, RunStats};
use crate::core::state::GameState;
use crate::level::FollowCamera;
use crate::movement::{Dead, Invulnerable, Player};

pub(crate) fn setup_camera(mut commands: Commands) {
    commands.spawn((Name::new("MainCamera"), Camera2d, FollowCamera));
}

/// Picks the starting level once content is in and enters play.
pub(crate) fn finish_boot(
    defaults: Option<Res<GameplayDefaults>>,
    library: Option<Res<LevelLibrary>>,
    mut stats: ResMut<RunStats>,
    mut game_state: ResMut<NextState<GameState>>,
) {
    let configured = defaults
        .as_ref()
        .map(|d| (d.level_flow.start_world, d.level_flow.start_stage))
        .unwrap_or((1, 1));

    let start = match library.as_ref() {
        Some(library) if library.get(configured.0, configured.1).is_some() => configured,
        Some(library) => match library.first() {
            Some(level) => {
                warn!(
                    "[LEVEL] Start level {}-{} not loaded; starting at {}",
                    configured.0,
                    configured.1,
                    level.label()
                );
                level.key()
            }
            None => configured,
        },
        None => configured,
    };

    *stats = RunStats::starting_at(start.0, start.1);
    info!("[LEVEL] New game starting at {}-{}", start.0, start.1);
    game_state.set(GameState::Playing);
}

/// Turns hits into deaths. Invulnerability absorbs non-lethal hits; each
/// player dies at most once per frame.
pub(crate) fn resolve_player_hits(
    mut hits: MessageReader<PlayerHitEvent>,
    players: Query<Option<&Invulnerable>, (With<Player>, Without<Dead>)>,
    mut died: MessageWriter<PlayerDiedEvent>,
) {
    let mut dying: Vec<Entity> = Vec::new();
    for hit in hits.read() {
        let Ok(invulnerable) = players.get(hit.player) else {
            continue;
        };
        if dying.contains(&hit.player) {
            continue;
        }
        if !hit.lethal && invulnerable.is_some_and(Invulnerable::is_active) {
            debug!("[LEVEL] {:?} hit shrugged off (invulnerable)", hit.source);
            continue;
        }
        dying.push(hit.player);
        died.write(PlayerDiedEvent {
            player: hit.player,
            source: hit.source,
        });
    }
}

pub(crate) fn handle_player_death(
    mut commands: Commands,
    mut deaths: MessageReader<PlayerDiedEvent>,
    mut stats: ResMut<RunStats>,
    mut pending: ResMut<PendingReset>,
    defaults: Option<Res<GameplayDefaults>>,
) {
    let reset_delay = defaults
        .as_ref()
        .map(|d| d.level_flow.reset_delay)
        .unwrap_or(1.0);

    for death in deaths.read() {
        stats.record_death();
        pending.schedule(reset_delay);
        commands
            .entity(death.player)
            .insert((Dead, Visibility::Hidden));
        info!(
            "[LEVEL] Player died ({:?}), deaths={}, reset in {:.1}s",
            death.source, stats.death_count, reset_delay
        );
    }
}

pub(crate) fn tick_pending_reset(
    time: Res<Time>,
    mut pending: ResMut<PendingReset>,
    mut resets: MessageWriter<LevelResetEvent>,
) {
    if pending.tick(time.delta_secs()) {
        resets.write(LevelResetEvent);
    }
}

pub(crate) fn restart_timer_on_reset(
    mut resets: MessageReader<LevelResetEvent>,
    mut stats: ResMut<RunStats>,
    mut pending: ResMut<PendingReset>,
) {
    if resets.read().count() > 0 {
        // A forced reset supersedes one that was still counting down.
        pending.cancel();
        stats.restart_timer();
        info!("[LEVEL] Level {}-{} reset", stats.world, stats.stage);
    }
}

pub(crate) fn tick_level_timer(time: Res<Time>, mut stats: ResMut<RunStats>) {
    stats.tick_timer(time.delta_secs());
}

pub(crate) fn count_coins(mut coins: MessageReader<CoinCollectedEvent>, mut stats: ResMut<RunStats>) {
    for _ in coins.read() {
        if stats.add_coin() {
            info!("[LEVEL] Coin counter rolled over");
        }
    }
}

pub(crate) fn handle_level_completed(
    mut completions: MessageReader<LevelCompletedEvent>,
    mut stats: ResMut<RunStats>,
    mut game_state: ResMut<NextState<GameState>>,
) {
    if let Some(done) = completions.read().last() {
        stats.stop_timer();
        info!(
            "[LEVEL] Level {}-{} complete in {}",
            done.world,
            done.stage,
            stats.formatted_time()
        );
        game_state.set(GameState::LevelComplete);
    }
}

pub(crate) fn start_next_level(
    keyboard: Res<ButtonInput<KeyCode>>,
    library: Option<Res<LevelLibrary>>,
    mut stats: ResMut<RunStats>,
    mut game_state: ResMut<NextState<GameState>>,
) {
    if !(keyboard.just_pressed(KeyCode::Enter) || keyboard.just_pressed(KeyCode::NumpadEnter)) {
        return;
    }

    let next = library
        .as_ref()
        .and_then(|l| l.next_after(stats.world, stats.stage))
        .map(|level| level.key());
    match next {
        Some((world, stage)) => stats.load_level(world, stage),
        None => {
            info!("[LEVEL] Last level cleared, starting over");
            stats.new_game();
        }
    }
    game_state.set(GameState::Playing);
}
