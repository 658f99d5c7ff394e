use arena_core::{BattleResult, TurnLog, UserId};
use serde::{Deserialize, Serialize};

use crate::battles::{BattleId, BattleOrigin};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum QueueEvent {
    Joined {
        user: UserId,
        balanced_cp: u32,
        queue_size: usize,
    },
    Left {
        user: UserId,
    },
    Matched {
        battle_id: BattleId,
        participants: [UserId; 2],
    },
    /// Periodic update for an entry that is still searching.
    SearchProgress {
        user: UserId,
        waited_secs: u64,
        remaining_secs: u64,
    },
    /// Search window expired; the user now faces an NPC.
    TimedOut {
        user: UserId,
        battle_id: BattleId,
        opponent: UserId,
    },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattleEvent {
    Started {
        battle_id: BattleId,
        origin: BattleOrigin,
        participants: [UserId; 2],
    },
    TurnResolved {
        battle_id: BattleId,
        log: TurnLog,
        health: [u32; 2],
    },
    Concluded {
        battle_id: BattleId,
        result: BattleResult,
    },
}
