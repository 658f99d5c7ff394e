//! [`NpcProvider`] that scales roster templates onto the target CP.
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;

use arena_content::NpcRoster;
use arena_core::Fighter;

use crate::api::{NpcProvider, StoreError};

pub struct RosterNpcProvider {
    roster: NpcRoster,
    serial: AtomicU64,
}

impl RosterNpcProvider {
    pub fn new(roster: NpcRoster) -> Self {
        Self {
            roster,
            serial: AtomicU64::new(1),
        }
    }

    pub fn roster(&self) -> &NpcRoster {
        &self.roster
    }
}

#[async_trait]
impl NpcProvider for RosterNpcProvider {
    async fn fallback_opponent(&self, target_cp: u32) -> Result<Fighter, StoreError> {
        let serial = self.serial.fetch_add(1, Ordering::Relaxed);
        self.roster
            .fallback_opponent(target_cp, serial)
            .ok_or_else(|| StoreError::Unavailable("NPC roster is empty".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use arena_content::NpcTemplate;
    use arena_core::Ability;

    use super::*;

    fn roster() -> NpcRoster {
        NpcRoster::new(vec![NpcTemplate {
            name: "Marine Captain".to_string(),
            level: 20,
            balanced_cp: 700,
            max_health: 900,
            ability: Ability::new("Iron Fist", 120, 1),
        }])
    }

    #[tokio::test]
    async fn every_npc_gets_a_fresh_id() {
        let provider = RosterNpcProvider::new(roster());

        let first = provider.fallback_opponent(700).await.unwrap();
        let second = provider.fallback_opponent(700).await.unwrap();

        assert!(first.user_id.is_npc());
        assert_ne!(first.user_id, second.user_id);
        assert_eq!(first.balanced_cp, 700);
        assert_eq!(first.max_health, 900);
    }

    #[tokio::test]
    async fn empty_roster_is_unavailable() {
        let provider = RosterNpcProvider::new(NpcRoster::default());
        assert!(matches!(
            provider.fallback_opponent(500).await,
            Err(StoreError::Unavailable(_))
        ));
    }
}
