//! Registry of live battles.
//!
//! Concluded battles are removed as soon as their result is produced, so a
//! user appears in the per-user index only while they own a live battle.
use std::collections::{BTreeMap, HashMap};
use std::fmt;

use arena_core::{Battle, BattleResult, TurnAdvance, UserId};
use serde::{Deserialize, Serialize};

use crate::api::{Result, RuntimeError};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BattleId(pub u64);

impl fmt::Display for BattleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// How a battle came to be, which also decides who drives it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattleOrigin {
    /// Two queue entries matched each other.
    Matchmaking,
    /// A queue entry timed out and faces an NPC.
    Fallback,
    /// Started directly by a caller, who advances it turn by turn.
    Direct,
}

impl BattleOrigin {
    /// Queue-originated battles are advanced by the background driver.
    pub fn is_driven(self) -> bool {
        matches!(self, Self::Matchmaking | Self::Fallback)
    }
}

#[derive(Debug)]
struct LiveBattle {
    battle: Battle,
    origin: BattleOrigin,
}

#[derive(Debug, Default)]
pub struct BattleRegistry {
    next_id: u64,
    battles: BTreeMap<BattleId, LiveBattle>,
    by_user: HashMap<UserId, BattleId>,
}

impl BattleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.battles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.battles.is_empty()
    }

    /// Id the next inserted battle will receive.
    pub fn next_id(&self) -> BattleId {
        BattleId(self.next_id)
    }

    pub fn contains_user(&self, user: UserId) -> bool {
        self.by_user.contains_key(&user)
    }

    pub fn battle_of(&self, user: UserId) -> Option<BattleId> {
        self.by_user.get(&user).copied()
    }

    pub fn get(&self, id: BattleId) -> Option<&Battle> {
        self.battles.get(&id).map(|live| &live.battle)
    }

    pub fn origin(&self, id: BattleId) -> Option<BattleOrigin> {
        self.battles.get(&id).map(|live| live.origin)
    }

    /// Registers a battle. Callers check participants beforehand.
    pub fn insert(&mut self, battle: Battle, origin: BattleOrigin) -> BattleId {
        let id = self.next_id();
        self.next_id += 1;

        for user in battle.participants() {
            self.by_user.insert(user, id);
        }
        self.battles.insert(id, LiveBattle { battle, origin });
        id
    }

    /// Ids of live battles the driver advances, oldest first.
    pub fn driven_ids(&self) -> Vec<BattleId> {
        self.battles
            .iter()
            .filter(|(_, live)| live.origin.is_driven())
            .map(|(id, _)| *id)
            .collect()
    }

    /// Resolves one turn of battle `id`, dropping it once concluded.
    pub fn advance(&mut self, id: BattleId) -> Result<TurnAdvance> {
        let live = self
            .battles
            .get_mut(&id)
            .ok_or(RuntimeError::BattleNotFound(id))?;
        let advance = live.battle.advance_turn()?;

        if advance.is_concluded() {
            self.remove(id);
        }
        Ok(advance)
    }

    /// Concludes the live battle of `user` with them as the loser.
    pub fn forfeit(&mut self, user: UserId) -> Result<(BattleId, BattleResult)> {
        let id = self.battle_of(user).ok_or(RuntimeError::NotInBattle(user))?;
        let live = self
            .battles
            .get_mut(&id)
            .ok_or(RuntimeError::BattleNotFound(id))?;
        let result = live.battle.forfeit(user)?;

        self.remove(id);
        Ok((id, result))
    }

    fn remove(&mut self, id: BattleId) {
        if let Some(live) = self.battles.remove(&id) {
            for user in live.battle.participants() {
                self.by_user.remove(&user);
            }
        }
    }
}
