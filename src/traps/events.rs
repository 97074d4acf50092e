//! Traps domain: messages published by transport traps.

use bevy::ecs::message::Message;
use bevy::prelude::*;

use crate::traps::transport::RunId;

/// A trap admitted the player and started moving.
#[derive(Debug)]
pub struct TrapActivatedEvent {
    pub trap: Entity,
    pub trap_id: String,
    pub run: RunId,
}

impl Message for TrapActivatedEvent {}

/// A trap run concluded on its own.
#[derive(Debug)]
pub struct TrapCompletedEvent {
    pub trap: Entity,
    pub trap_id: String,
    /// Whether the objects made it back to their original positions.
    pub returned: bool,
}

impl Message for TrapCompletedEvent {}

/// Closing walls caught the player.
#[derive(Debug)]
pub struct PlayerCrushedEvent {
    pub trap: Entity,
    pub player: Entity,
    pub gap: f32,
}

impl Message for PlayerCrushedEvent {}
