//! Level domain: markers and the resource describing the level in play.

use bevy::prelude::*;

use crate::content::LevelDef;

/// Everything spawned for a level; despawned when the level is left.
#[derive(Component, Debug)]
pub struct LevelEntity;

#[derive(Component, Debug)]
pub struct Coin;

/// Finish flag.
#[derive(Component, Debug)]
pub struct Goal;

/// Camera that tracks the player horizontally.
#[derive(Component, Debug)]
pub struct FollowCamera;

/// The level currently spawned.
#[derive(Resource, Debug, Clone)]
pub struct CurrentLevel {
    pub def: LevelDef,
    pub player: Entity,
}

impl CurrentLevel {
    pub fn spawn_point(&self) -> Vec2 {
        Vec2::new(self.def.player_spawn.0, self.def.player_spawn.1)
    }
}
