//! Content domain: level and tuning data loaded from `assets/data/*.ron`.

mod data;
mod loader;
mod registry;
#[cfg(test)]
mod tests;
mod validation;

pub use data::{
    BoxDef, CrushDefaults, GameplayDefaults, LevelDef, LevelFlowDefaults, MoveDirection,
    MovementDefaults, Point, SolidDef, SolidKind, TrapDef, to_vec2,
};
pub use loader::{ContentLoadError, load_gameplay_defaults, load_levels, parse_ron};
pub use registry::LevelLibrary;
pub use validation::{ValidationError, validate_level, validate_library, validate_trap};

use bevy::prelude::*;
use std::path::Path;

pub const DATA_DIR: &str = "assets/data";

/// Bundled copy of the first level, used when nothing loads from disk.
pub const BUILTIN_LEVEL: &str = include_str!("../../assets/data/level_1_1.ron");

pub struct ContentPlugin;

impl Plugin for ContentPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(PreStartup, load_content);
    }
}

fn load_content(mut commands: Commands) {
    let base_path = Path::new(DATA_DIR);

    let defaults = match load_gameplay_defaults(base_path) {
        Ok(defaults) => defaults,
        Err(e) => {
            error!("[CONTENT] {}; using built-in gameplay defaults", e);
            GameplayDefaults::default()
        }
    };

    let (mut library, errors) = load_levels(base_path, &defaults);
    for e in &errors {
        error!("[CONTENT] {}", e);
    }

    if library.is_empty() {
        match parse_ron::<LevelDef>("builtin level_1_1.ron", BUILTIN_LEVEL) {
            Ok(level) => {
                warn!("[CONTENT] No levels loaded from {}; using the built-in level", DATA_DIR);
                library.insert(level);
            }
            Err(e) => error!("[CONTENT] {}", e),
        }
    }

    for problem in validate_library(&library) {
        warn!("[CONTENT] {}", problem);
    }
    info!("[CONTENT] {}", library.summary());

    commands.insert_resource(defaults);
    commands.insert_resource(library);
}
