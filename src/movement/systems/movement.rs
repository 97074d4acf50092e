//! Movement domain: locomotion systems for timers and velocity.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::movement::{
    Dead, FALL_GRAVITY_MULTIPLIER, Facing, Invulnerable, MovementInput, MovementState,
    MovementTuning, Player,
};

/// Moves `current` toward `target` by at most `max_delta`.
pub(crate) fn move_towards(current: f32, target: f32, max_delta: f32) -> f32 {
    if (target - current).abs() <= max_delta {
        return target;
    }
    current + (target - current).signum() * max_delta
}

/// Whether a jump may start this frame.
pub(crate) fn can_jump(state: &MovementState, jump_pressed: bool) -> bool {
    if !jump_pressed {
        return false;
    }
    state.on_ground || (state.coyote_timer > 0.0 && !state.jumping)
}

/// Vertical velocity after one frame of gravity. Gravity doubles while
/// falling or once jump is released, and the fall speed is capped.
pub(crate) fn gravity_step(vy: f32, jump_held: bool, tuning: &MovementTuning, dt: f32) -> f32 {
    let falling = vy < 0.0 || !jump_held;
    let multiplier = if falling { FALL_GRAVITY_MULTIPLIER } else { 1.0 };
    let next = vy - tuning.gravity() * multiplier * dt;
    next.max(-tuning.terminal_fall_speed())
}

pub(crate) fn update_timers(
    time: Res<Time>,
    mut query: Query<(&mut MovementState, Option<&mut Invulnerable>), With<Player>>,
) {
    let dt = time.delta_secs();

    for (mut state, invulnerable) in &mut query {
        if !state.on_ground && state.coyote_timer > 0.0 {
            state.coyote_timer -= dt;
        }
        if let Some(mut invulnerable) = invulnerable {
            if invulnerable.timer.is_finite() && invulnerable.timer > 0.0 {
                invulnerable.timer = (invulnerable.timer - dt).max(0.0);
            }
        }
    }
}

pub(crate) fn apply_horizontal_movement(
    time: Res<Time>,
    input: Res<MovementInput>,
    tuning: Res<MovementTuning>,
    mut query: Query<&mut LinearVelocity, (With<Player>, Without<Dead>)>,
) {
    let dt = time.delta_secs();
    let target_vx = input.axis * tuning.move_speed;

    for mut velocity in &mut query {
        velocity.x = move_towards(velocity.x, target_vx, tuning.acceleration() * dt);
    }
}

pub(crate) fn apply_jump(
    input: Res<MovementInput>,
    tuning: Res<MovementTuning>,
    mut query: Query<(&mut MovementState, &mut LinearVelocity), (With<Player>, Without<Dead>)>,
) {
    for (mut state, mut velocity) in &mut query {
        if state.on_ground {
            velocity.y = velocity.y.max(0.0);
            state.jumping = velocity.y > 0.0;
        }

        if can_jump(&state, input.jump_just_pressed) {
            velocity.y = tuning.jump_velocity();
            state.jumping = true;
            state.coyote_timer = 0.0;
            debug!("Jump: on_ground={}", state.on_ground);
        }
    }
}

pub(crate) fn apply_gravity(
    time: Res<Time>,
    input: Res<MovementInput>,
    tuning: Res<MovementTuning>,
    mut query: Query<&mut LinearVelocity, (With<Player>, Without<Dead>)>,
) {
    let dt = time.delta_secs();

    for mut velocity in &mut query {
        velocity.y = gravity_step(velocity.y, input.jump_held, &tuning, dt);
    }
}

pub(crate) fn update_facing(
    mut query: Query<(&mut MovementState, &LinearVelocity, &mut Sprite), With<Player>>,
) {
    for (mut state, velocity, mut sprite) in &mut query {
        if velocity.x > 0.0 {
            state.facing = Facing::Right;
        } else if velocity.x < 0.0 {
            state.facing = Facing::Left;
        }
        sprite.flip_x = state.facing == Facing::Left;
    }
}
