//! Core domain: shared resources for run statistics and level flow.

use bevy::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// World pixels per physics unit.
pub const PIXELS_PER_UNIT: f32 = 32.0;

/// Coin count that rolls the counter back to zero.
pub const COIN_WRAP: u32 = 100;

/// Progress of the current play session.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct RunStats {
    pub world: u32,
    pub stage: u32,
    pub coins: u32,
    pub death_count: u32,
    /// Seconds spent in the current level.
    pub level_time: f32,
    pub timer_running: bool,
    first_level: (u32, u32),
}

impl Default for RunStats {
    fn default() -> Self {
        Self::starting_at(1, 1)
    }
}

impl RunStats {
    pub fn starting_at(world: u32, stage: u32) -> Self {
        Self {
            world,
            stage,
            coins: 0,
            death_count: 0,
            level_time: 0.0,
            timer_running: false,
            first_level: (world, stage),
        }
    }

    /// Back to the first level with no coins. Deaths carry over.
    pub fn new_game(&mut self) {
        self.coins = 0;
        let (world, stage) = self.first_level;
        self.load_level(world, stage);
    }

    pub fn load_level(&mut self, world: u32, stage: u32) {
        self.world = world;
        self.stage = stage;
        self.restart_timer();
    }

    pub fn level_key(&self) -> (u32, u32) {
        (self.world, self.stage)
    }

    /// Adds a coin; returns true when the counter wrapped.
    pub fn add_coin(&mut self) -> bool {
        self.coins += 1;
        if self.coins >= COIN_WRAP {
            self.coins = 0;
            return true;
        }
        false
    }

    pub fn record_death(&mut self) {
        self.death_count += 1;
        self.coins = 0;
        self.timer_running = false;
    }

    pub fn restart_timer(&mut self) {
        self.level_time = 0.0;
        self.timer_running = true;
    }

    pub fn stop_timer(&mut self) {
        self.timer_running = false;
    }

    pub fn tick_timer(&mut self, dt: f32) {
        if self.timer_running && dt.is_finite() && dt > 0.0 {
            self.level_time += dt;
        }
    }

    /// `mm:ss.cc`
    pub fn formatted_time(&self) -> String {
        let total_centis = (self.level_time.max(0.0) * 100.0) as u32;
        let minutes = total_centis / 6000;
        let seconds = (total_centis / 100) % 60;
        let centis = total_centis % 100;
        format!("{:02}:{:02}.{:02}", minutes, seconds, centis)
    }
}

/// A level reset waiting to happen. Scheduling again replaces the pending one.
#[derive(Resource, Debug, Default, Clone, PartialEq)]
pub struct PendingReset {
    remaining: Option<f32>,
}

impl PendingReset {
    pub fn schedule(&mut self, delay: f32) {
        let delay = if delay.is_finite() { delay.max(0.0) } else { 0.0 };
        self.remaining = Some(delay);
    }

    pub fn cancel(&mut self) {
        self.remaining = None;
    }

    pub fn is_pending(&self) -> bool {
        self.remaining.is_some()
    }

    pub fn remaining(&self) -> Option<f32> {
        self.remaining
    }

    /// Counts down; returns true exactly once, on the tick the delay runs out.
    pub fn tick(&mut self, dt: f32) -> bool {
        let Some(remaining) = self.remaining.as_mut() else {
            return false;
        };
        *remaining -= dt.max(0.0);
        if *remaining <= 0.0 {
            self.remaining = None;
            return true;
        }
        false
    }
}

/// Seeded randomness for hazards (shake offsets, drop placement).
#[derive(Resource, Debug)]
pub struct HazardRng(pub ChaCha8Rng);

impl HazardRng {
    pub fn from_seed(seed: u64) -> Self {
        Self(ChaCha8Rng::seed_from_u64(seed))
    }
}

impl Default for HazardRng {
    fn default() -> Self {
        Self::from_seed(rand::rng().random())
    }
}
