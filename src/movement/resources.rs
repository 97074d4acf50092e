//! Movement domain: tuning and input resources.

use bevy::prelude::*;

use crate::content::MovementDefaults;

/// Falling (or not holding jump) multiplies gravity by this.
pub const FALL_GRAVITY_MULTIPLIER: f32 = 2.0;

#[derive(Resource, Debug, Clone)]
pub struct MovementTuning {
    pub move_speed: f32,
    /// Horizontal acceleration is `move_speed * transition_speed`.
    pub transition_speed: f32,
    pub max_jump_height: f32,
    /// Seconds for a full jump arc.
    pub max_jump_time: f32,
    pub coyote_time: f32,
}

impl Default for MovementTuning {
    fn default() -> Self {
        Self {
            move_speed: 256.0,
            transition_speed: 5.0,
            max_jump_height: 160.0,
            max_jump_time: 1.0,
            coyote_time: 0.2,
        }
    }
}

impl MovementTuning {
    pub fn from_defaults(defaults: &MovementDefaults) -> Self {
        Self {
            move_speed: defaults.move_speed,
            transition_speed: defaults.transition_speed,
            max_jump_height: defaults.max_jump_height,
            max_jump_time: defaults.max_jump_time,
            coyote_time: defaults.coyote_time,
        }
    }

    fn half_jump_time(&self) -> f32 {
        self.max_jump_time / 2.0
    }

    /// Launch speed reaching `max_jump_height` at the apex: `2h / (t/2)`.
    pub fn jump_velocity(&self) -> f32 {
        2.0 * self.max_jump_height / self.half_jump_time()
    }

    /// Downward acceleration magnitude: `2h / (t/2)^2`.
    pub fn gravity(&self) -> f32 {
        2.0 * self.max_jump_height / self.half_jump_time().powi(2)
    }

    /// Fastest downward speed.
    pub fn terminal_fall_speed(&self) -> f32 {
        self.gravity() / 2.0
    }

    pub fn acceleration(&self) -> f32 {
        self.move_speed * self.transition_speed
    }
}

#[derive(Resource, Debug, Default)]
pub struct MovementInput {
    pub axis: f32,
    pub jump_just_pressed: bool,
    pub jump_held: bool,
}
