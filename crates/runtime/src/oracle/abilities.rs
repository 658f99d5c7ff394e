//! [`AbilityOracle`] backed by an in-memory map.
use std::collections::HashMap;

use arena_content::AbilityEntry;
use arena_core::{Ability, AbilityOracle, ItemId};

/// Ability catalog keyed by item id.
#[derive(Clone, Debug, Default)]
pub struct AbilityCatalog {
    abilities: HashMap<ItemId, Ability>,
}

impl AbilityCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a catalog from loaded entries; later duplicates replace earlier ones.
    pub fn from_entries(entries: impl IntoIterator<Item = AbilityEntry>) -> Self {
        let mut catalog = Self::new();
        for entry in entries {
            catalog.insert(entry.item, entry.ability);
        }
        catalog
    }

    pub fn insert(&mut self, item: ItemId, ability: Ability) {
        self.abilities.insert(item, ability);
    }

    pub fn len(&self) -> usize {
        self.abilities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.abilities.is_empty()
    }
}

impl AbilityOracle for AbilityCatalog {
    fn ability(&self, item: &ItemId) -> Option<Ability> {
        self.abilities.get(item).cloned()
    }

    fn all_abilities(&self) -> Vec<(ItemId, Ability)> {
        let mut all: Vec<_> = self
            .abilities
            .iter()
            .map(|(item, ability)| (item.clone(), ability.clone()))
            .collect();
        all.sort_by(|a, b| a.0.as_str().cmp(b.0.as_str()));
        all
    }
}
