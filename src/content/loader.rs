//! Loader for RON content files at startup.

use ron::Options;
use std::fs;
use std::path::Path;
use thiserror::Error;

use super::data::*;
use super::registry::LevelLibrary;

/// Error type for content loading failures.
#[derive(Debug, Error)]
pub enum ContentLoadError {
    #[error("failed to read {file}: {source}")]
    Io {
        file: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {file}: {message}")]
    Parse { file: String, message: String },
}

impl ContentLoadError {
    pub fn file(&self) -> &str {
        match self {
            ContentLoadError::Io { file, .. } | ContentLoadError::Parse { file, .. } => file,
        }
    }
}

/// Create RON options with extensions enabled for more flexible parsing.
fn ron_options() -> Options {
    Options::default().with_default_extension(ron::extensions::Extensions::IMPLICIT_SOME)
}

/// Parse a RON document already in memory. `file` only labels errors.
pub fn parse_ron<T>(file: &str, contents: &str) -> Result<T, ContentLoadError>
where
    T: for<'de> serde::Deserialize<'de>,
{
    ron_options()
        .from_str(contents)
        .map_err(|e| ContentLoadError::Parse {
            file: file.to_string(),
            message: e.to_string(),
        })
}

/// Load a single RON struct from disk.
fn load_single_file<T>(path: &Path) -> Result<T, ContentLoadError>
where
    T: for<'de> serde::Deserialize<'de>,
{
    let file_name = path.display().to_string();
    let contents = fs::read_to_string(path).map_err(|source| ContentLoadError::Io {
        file: file_name.clone(),
        source,
    })?;
    parse_ron(&file_name, &contents)
}

pub fn load_gameplay_defaults(base_path: &Path) -> Result<GameplayDefaults, ContentLoadError> {
    load_single_file(&base_path.join("gameplay_defaults.ron"))
}

/// Load every level listed in `defaults.levels`.
/// Levels that fail to load are reported and left out of the library.
pub fn load_levels(
    base_path: &Path,
    defaults: &GameplayDefaults,
) -> (LevelLibrary, Vec<ContentLoadError>) {
    let mut library = LevelLibrary::default();
    let mut errors = Vec::new();

    for file in &defaults.levels {
        match load_single_file::<LevelDef>(&base_path.join(file)) {
            Ok(level) => library.insert(level),
            Err(e) => errors.push(e),
        }
    }

    (library, errors)
}
