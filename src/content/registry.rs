//! LevelLibrary resource providing lookups for loaded levels.

use bevy::prelude::*;

use super::data::LevelDef;

/// Levels in play order.
#[derive(Resource, Debug, Default, Clone)]
pub struct LevelLibrary {
    levels: Vec<LevelDef>,
}

impl LevelLibrary {
    /// Adds a level, replacing any level already loaded under the same key.
    pub fn insert(&mut self, level: LevelDef) {
        match self.levels.iter_mut().find(|l| l.key() == level.key()) {
            Some(existing) => *existing = level,
            None => self.levels.push(level),
        }
    }

    pub fn get(&self, world: u32, stage: u32) -> Option<&LevelDef> {
        self.levels.iter().find(|l| l.key() == (world, stage))
    }

    pub fn first(&self) -> Option<&LevelDef> {
        self.levels.first()
    }

    /// The level played after `(world, stage)`, in load order.
    pub fn next_after(&self, world: u32, stage: u32) -> Option<&LevelDef> {
        let index = self.levels.iter().position(|l| l.key() == (world, stage))?;
        self.levels.get(index + 1)
    }

    pub fn levels(&self) -> &[LevelDef] {
        &self.levels
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn summary(&self) -> String {
        let labels: Vec<String> = self.levels.iter().map(LevelDef::label).collect();
        format!("LevelLibrary loaded {} level(s): {}", self.levels.len(), labels.join(", "))
    }
}
