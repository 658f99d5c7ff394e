//! Content factory for loading arena content from a data directory.

use std::path::{Path, PathBuf};

use arena_core::ArenaConfig;

use crate::loaders::{
    AbilityEntry, AbilityLoader, ConfigLoader, LoadResult, NpcLoader, PlayerLoader, PlayerSeed,
};
use crate::roster::NpcRoster;

/// Content factory that loads all arena content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── abilities.ron
/// ├── npcs.ron
/// └── players.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load battle rules and balance tables from `config.toml`.
    ///
    /// A missing file yields the default configuration.
    pub fn load_config(&self) -> LoadResult<ArenaConfig> {
        let path = self.data_dir.join("config.toml");
        if !path.exists() {
            return Ok(ArenaConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load the ability catalog from `abilities.ron`.
    pub fn load_abilities(&self) -> LoadResult<Vec<AbilityEntry>> {
        AbilityLoader::load(&self.data_dir.join("abilities.ron"))
    }

    /// Load the fallback opponent roster from `npcs.ron`.
    pub fn load_npcs(&self) -> LoadResult<NpcRoster> {
        NpcLoader::load(&self.data_dir.join("npcs.ron"))
    }

    /// Load seed players from `players.ron`.
    pub fn load_players(&self) -> LoadResult<Vec<PlayerSeed>> {
        PlayerLoader::load(&self.data_dir.join("players.ron"))
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
