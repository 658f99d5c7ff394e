//! Ability catalog loader.

use std::collections::HashSet;
use std::path::Path;

use arena_core::{Ability, ItemId};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Ability granted by one item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityEntry {
    pub item: ItemId,
    pub ability: Ability,
}

/// Ability catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AbilityCatalogFile {
    pub abilities: Vec<AbilityEntry>,
}

/// Loader for the ability catalog from RON files.
pub struct AbilityLoader;

impl AbilityLoader {
    /// Load the ability catalog from a RON file.
    ///
    /// Rejects duplicate items and abilities that could never deal damage.
    pub fn load(path: &Path) -> LoadResult<Vec<AbilityEntry>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<Vec<AbilityEntry>> {
        let catalog: AbilityCatalogFile = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse ability catalog RON: {}", e))?;

        let mut seen = HashSet::new();
        for entry in &catalog.abilities {
            if !seen.insert(entry.item.clone()) {
                anyhow::bail!("duplicate ability entry for item '{}'", entry.item);
            }
            if entry.ability.name.trim().is_empty() || entry.ability.base_damage == 0 {
                anyhow::bail!("ability for item '{}' must have a name and base damage", entry.item);
            }
        }

        Ok(catalog.abilities)
    }
}
