//! Core domain: events for player hits, deaths and level flow.

use bevy::ecs::message::Message;
use bevy::prelude::*;

/// What hurt the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitSource {
    Crush,
    AcidDrop,
    SpikeBlock,
    FallingSpike,
    DeathBarrier,
}

/// A hazard touched the player. Non-lethal hits are ignored while the player
/// is invulnerable; lethal ones always kill.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerHitEvent {
    pub player: Entity,
    pub lethal: bool,
    pub source: HitSource,
}

impl Message for PlayerHitEvent {}

#[derive(Debug)]
pub struct PlayerDiedEvent {
    pub player: Entity,
    pub source: HitSource,
}

impl Message for PlayerDiedEvent {}

/// Put the current level back into its loaded state.
#[derive(Debug)]
pub struct LevelResetEvent;

impl Message for LevelResetEvent {}

#[derive(Debug)]
pub struct CoinCollectedEvent {
    pub coin: Entity,
}

impl Message for CoinCollectedEvent {}

/// The player reached the goal of the current level.
#[derive(Debug)]
pub struct LevelCompletedEvent {
    pub world: u32,
    pub stage: u32,
}

impl Message for LevelCompletedEvent {}
