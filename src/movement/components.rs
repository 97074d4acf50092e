//! Movement domain: components and physics layers for locomotion.

use avian2d::prelude::*;
use bevy::prelude::*;

/// Physics layers for collision filtering
#[derive(PhysicsLayer, Clone, Copy, Debug, Default)]
pub enum GameLayer {
    #[default]
    Default,
    /// Ground surfaces (floors, platforms, trap walls)
    Ground,
    /// Level boundary walls
    Wall,
    /// Player character
    Player,
    /// Sensors (trap zones, coins, goal) - should not block movement
    Sensor,
    /// Things that hurt the player on contact
    Hazard,
}

#[derive(Component, Debug)]
pub struct Player;

#[derive(Component, Debug, Default)]
pub struct MovementState {
    pub on_ground: bool,
    /// Set by a jump, cleared once the player is grounded and not rising.
    pub jumping: bool,
    pub facing: Facing,
    /// Counts down after leaving the ground; a jump is still allowed while positive.
    pub coyote_timer: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    #[default]
    Right,
    Left,
}

/// Hazards that respect invulnerability leave the player alone while `timer > 0`.
#[derive(Component, Debug, Default, Clone, Copy)]
pub struct Invulnerable {
    pub timer: f32,
}

impl Invulnerable {
    pub fn permanent() -> Self {
        Self {
            timer: f32::INFINITY,
        }
    }

    pub fn is_active(&self) -> bool {
        self.timer > 0.0
    }
}

/// The player is dead and waiting for the level reset.
#[derive(Component, Debug)]
pub struct Dead;

/// Marker for ground colliders
#[derive(Component, Debug)]
pub struct Ground;

/// Marker for wall colliders
#[derive(Component, Debug)]
pub struct Wall;
