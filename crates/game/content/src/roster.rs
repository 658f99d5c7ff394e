//! Synthetic opponent templates.
//!
//! A roster entry is a hand-tuned fighter shape. When the queue needs a
//! fallback opponent, the template closest to the target CP is picked and
//! scaled onto it, so the NPC lands inside the player's tolerance band.

use arena_core::{Ability, ArenaConfig, Fighter, UserId};

/// One synthetic opponent shape.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NpcTemplate {
    pub name: String,
    pub level: u32,
    pub balanced_cp: u32,
    pub max_health: u32,
    pub ability: Ability,
}

impl NpcTemplate {
    /// Builds a fighter at exactly `target_cp`.
    ///
    /// Health follows the square root of the CP scale so a scaled-up NPC is
    /// not tankier than a player of the same CP would be.
    pub fn scaled_to(&self, target_cp: u32, serial: u64) -> Fighter {
        let permille = ArenaConfig::PERMILLE;
        let target_cp = target_cp.max(1);
        let scale = target_cp as u64 * permille / self.balanced_cp.max(1) as u64;
        // sqrt(scale‰) in per-mille
        let health_scale = (scale * permille).isqrt();
        let max_health = (self.max_health as u64 * health_scale / permille).max(1);

        Fighter::new(
            UserId::npc(serial),
            self.name.clone(),
            self.level,
            target_cp,
            u32::try_from(max_health).unwrap_or(u32::MAX),
            self.ability.clone(),
        )
    }
}

/// Ordered collection of NPC templates.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NpcRoster {
    pub npcs: Vec<NpcTemplate>,
}

impl NpcRoster {
    pub fn new(npcs: Vec<NpcTemplate>) -> Self {
        Self { npcs }
    }

    pub fn is_empty(&self) -> bool {
        self.npcs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.npcs.len()
    }

    /// Template with the smallest CP distance; earlier entries win ties.
    pub fn closest(&self, target_cp: u32) -> Option<&NpcTemplate> {
        self.npcs
            .iter()
            .min_by_key(|npc| npc.balanced_cp.abs_diff(target_cp))
    }

    /// Fallback opponent scaled to `target_cp`, if the roster has any entry.
    pub fn fallback_opponent(&self, target_cp: u32, serial: u64) -> Option<Fighter> {
        self.closest(target_cp)
            .map(|template| template.scaled_to(target_cp, serial))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template(name: &str, cp: u32, health: u32) -> NpcTemplate {
        NpcTemplate {
            name: name.to_string(),
            level: 10,
            balanced_cp: cp,
            max_health: health,
            ability: Ability::new("Slash", 80, 1),
        }
    }

    fn roster() -> NpcRoster {
        NpcRoster::new(vec![
            template("Marine Recruit", 200, 300),
            template("Marine Captain", 600, 500),
            template("Vice Admiral", 1500, 800),
        ])
    }

    #[test]
    fn picks_closest_template() {
        let roster = roster();
        assert_eq!(roster.closest(250).unwrap().name, "Marine Recruit");
        assert_eq!(roster.closest(1000).unwrap().name, "Marine Captain");
        assert_eq!(roster.closest(9000).unwrap().name, "Vice Admiral");
        // 400 is equidistant from 200 and 600
        assert_eq!(roster.closest(400).unwrap().name, "Marine Recruit");
    }

    #[test]
    fn scales_onto_target_cp() {
        let npc = roster().fallback_opponent(800, 4).unwrap();

        assert_eq!(npc.balanced_cp, 800);
        assert!(npc.user_id.is_npc());
        assert_eq!(npc.current_health, npc.max_health);
        // 800 / 600 = 1.333, sqrt = 1.154
        assert_eq!(npc.max_health, 577);
        assert!(npc.validate().is_ok());
    }

    #[test]
    fn empty_roster_has_no_fallback() {
        assert!(NpcRoster::default().fallback_opponent(300, 1).is_none());
    }
}
