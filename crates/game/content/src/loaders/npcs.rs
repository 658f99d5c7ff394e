//! NPC roster loader.

use std::path::Path;

use crate::loaders::{LoadResult, read_file};
use crate::roster::NpcRoster;

/// Loader for the fallback opponent roster from RON files.
pub struct NpcLoader;

impl NpcLoader {
    /// Load an NPC roster from a RON file.
    ///
    /// RON format: `(npcs: [NpcTemplate, ...])`. An empty roster is an error
    /// because queue timeouts would have no opponent to fall back to.
    pub fn load(path: &Path) -> LoadResult<NpcRoster> {
        let content = read_file(path)?;
        let roster: NpcRoster = ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse NPC roster RON: {}", e))?;

        if roster.is_empty() {
            anyhow::bail!("NPC roster at {} is empty", path.display());
        }
        if let Some(npc) = roster
            .npcs
            .iter()
            .find(|npc| npc.balanced_cp == 0 || npc.max_health == 0)
        {
            anyhow::bail!("NPC '{}' needs non-zero CP and health", npc.name);
        }

        Ok(roster)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn loads_roster() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"(npcs: [
                (
                    name: "Marine Recruit",
                    level: 5,
                    balanced_cp: 220,
                    max_health: 320,
                    ability: (name: "Rifle Butt", base_damage: 70, cooldown_turns: 1),
                ),
            ])"#
        )
        .unwrap();

        let roster = NpcLoader::load(file.path()).unwrap();
        assert_eq!(roster.len(), 1);
        assert_eq!(roster.npcs[0].ability.name, "Rifle Butt");
    }

    #[test]
    fn empty_roster_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "(npcs: [])").unwrap();

        let err = NpcLoader::load(file.path()).unwrap_err();
        assert!(err.to_string().contains("empty"));
    }
}
