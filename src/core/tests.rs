use super::{COIN_WRAP, HazardRng, PendingReset, RunStats};
use rand::Rng;

// ---------------------------------------------------------------------------
// RunStats
// ---------------------------------------------------------------------------

#[test]
fn test_coins_wrap_at_one_hundred() {
    let mut stats = RunStats::default();
    for _ in 0..COIN_WRAP - 1 {
        assert!(!stats.add_coin());
    }
    assert_eq!(stats.coins, 99);

    assert!(stats.add_coin());
    assert_eq!(stats.coins, 0);
}

#[test]
fn test_death_resets_coins_and_counts() {
    let mut stats = RunStats::default();
    stats.add_coin();
    stats.add_coin();
    stats.restart_timer();

    stats.record_death();
    assert_eq!(stats.coins, 0);
    assert_eq!(stats.death_count, 1);
    assert!(!stats.timer_running);
}

#[test]
fn test_new_game_keeps_deaths() {
    let mut stats = RunStats::starting_at(1, 1);
    stats.load_level(1, 2);
    stats.add_coin();
    stats.record_death();
    stats.record_death();

    stats.new_game();
    assert_eq!(stats.level_key(), (1, 1));
    assert_eq!(stats.coins, 0);
    assert_eq!(stats.death_count, 2);
    assert!(stats.timer_running);
}

#[test]
fn test_timer_only_runs_while_started() {
    let mut stats = RunStats::default();
    stats.tick_timer(1.0);
    assert_eq!(stats.level_time, 0.0);

    stats.restart_timer();
    stats.tick_timer(1.5);
    stats.tick_timer(f32::NAN);
    stats.tick_timer(-3.0);
    assert_eq!(stats.level_time, 1.5);

    stats.stop_timer();
    stats.tick_timer(1.0);
    assert_eq!(stats.level_time, 1.5);
}

#[test]
fn test_formatted_time() {
    let mut stats = RunStats::default();
    stats.level_time = 83.25;
    assert_eq!(stats.formatted_time(), "01:23.25");

    stats.level_time = 0.0;
    assert_eq!(stats.formatted_time(), "00:00.00");
}

// ---------------------------------------------------------------------------
// PendingReset
// ---------------------------------------------------------------------------

#[test]
fn test_pending_reset_fires_once() {
    let mut pending = PendingReset::default();
    assert!(!pending.tick(1.0));

    pending.schedule(1.0);
    assert!(!pending.tick(0.5));
    assert!(pending.tick(0.5));
    assert!(!pending.is_pending());
    assert!(!pending.tick(0.5));
}

#[test]
fn test_rescheduling_replaces_pending_reset() {
    let mut pending = PendingReset::default();
    pending.schedule(1.0);
    assert!(!pending.tick(0.75));

    pending.schedule(1.0);
    assert_eq!(pending.remaining(), Some(1.0));
    assert!(!pending.tick(0.75));
    assert!(pending.tick(0.25));
}

#[test]
fn test_cancelled_reset_never_fires() {
    let mut pending = PendingReset::default();
    pending.schedule(0.5);
    pending.cancel();
    assert!(!pending.tick(1.0));
}

#[test]
fn test_invalid_delay_fires_next_tick() {
    let mut pending = PendingReset::default();
    pending.schedule(f32::NAN);
    assert!(pending.tick(0.0));
}

// ---------------------------------------------------------------------------
// HazardRng
// ---------------------------------------------------------------------------

#[test]
fn test_hazard_rng_is_deterministic_per_seed() {
    let mut a = HazardRng::from_seed(7);
    let mut b = HazardRng::from_seed(7);
    let left: Vec<f32> = (0..4).map(|_| a.0.random()).collect();
    let right: Vec<f32> = (0..4).map(|_| b.0.random()).collect();
    assert_eq!(left, right);
}
