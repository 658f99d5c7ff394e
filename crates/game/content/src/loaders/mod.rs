//! Content loaders for reading arena data from files.
//!
//! This module provides loaders that convert RON/TOML files into core types
//! consumed by runtime oracles.

pub mod abilities;
pub mod config;
pub mod factory;
pub mod npcs;
pub mod players;

pub use abilities::{AbilityEntry, AbilityLoader};
pub use config::ConfigLoader;
pub use factory::ContentFactory;
pub use npcs::NpcLoader;
pub use players::{PlayerLoader, PlayerSeed};

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
