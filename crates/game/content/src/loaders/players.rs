//! Seed player loader.
//!
//! Players normally live in external stores. Seeds let a local server or a
//! test populate the in-memory stores from a data file instead.

use std::path::Path;

use arena_core::{OwnedItem, UserId, UserRecord};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// One seeded player and their collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSeed {
    pub user_id: u64,
    pub username: String,
    pub level: u32,
    #[serde(default)]
    pub items: Vec<OwnedItem>,
}

impl PlayerSeed {
    pub fn record(&self) -> UserRecord {
        UserRecord::new(UserId(self.user_id), self.username.clone(), self.level)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct PlayerFile {
    players: Vec<PlayerSeed>,
}

/// Loader for seed players from RON files.
pub struct PlayerLoader;

impl PlayerLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<PlayerSeed>> {
        let content = read_file(path)?;
        let file: PlayerFile = ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse player seeds RON: {}", e))?;

        for seed in &file.players {
            if UserId(seed.user_id).is_npc() {
                anyhow::bail!("player '{}' uses an id reserved for NPCs", seed.username);
            }
        }

        Ok(file.players)
    }
}
