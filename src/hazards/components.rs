//! Hazards domain: components for non-transport traps.

use bevy::prelude::*;

use crate::core::HitSource;
use crate::hazards::falling::FallSequence;
use crate::hazards::rain::RainCycle;
use crate::traps::TriggerGate;

/// Hurts the player on contact.
#[derive(Component, Debug, Clone, Copy)]
pub struct Hazard {
    /// Lethal hazards ignore invulnerability.
    pub lethal: bool,
    pub source: HitSource,
}

#[derive(Component, Debug)]
pub struct FallingPlatform {
    pub trap_id: String,
    pub sequence: FallSequence<Entity>,
}

/// Trigger zone of an acid rain trap.
#[derive(Component, Debug)]
pub struct AcidRain {
    pub trap_id: String,
    pub gate: TriggerGate,
    pub cycle: RainCycle,
    pub clouds: Vec<Entity>,
    pub drop_speed: f32,
}

#[derive(Component, Debug)]
pub struct Cloud {
    pub color: Color,
}

pub const ACID_DROP_LIFETIME: f32 = 10.0;

#[derive(Component, Debug)]
pub struct AcidDrop {
    pub speed: f32,
    pub lifetime: f32,
}

/// Trigger zone that releases a spike from the ceiling.
#[derive(Component, Debug)]
pub struct SpikeTrap {
    pub trap_id: String,
    pub gate: TriggerGate,
    pub spike: Entity,
    pub gravity_scale: f32,
}

/// The spike a `SpikeTrap` drops; remembers where to go back to on reset.
#[derive(Component, Debug)]
pub struct FallingSpike {
    pub origin: Vec2,
}

pub const BOUNCE_TINT_TIME: f32 = 2.0;

#[derive(Component, Debug)]
pub struct BouncePlatform {
    pub bounce_force: f32,
    pub color: Color,
    pub tint_remaining: f32,
}
