//! Battle outcomes and intermediate snapshots.

use crate::fighter::{Fighter, UserId};

use super::log::TurnLog;

/// Why a battle ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TerminationReason {
    HealthDepleted,
    TurnLimitReached,
    Forfeit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattleOutcome {
    Victory { winner: UserId, loser: UserId },
    /// Exact health tie at the turn cap.
    Draw,
}

/// Final report handed back to the caller once a battle concludes.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleResult {
    pub seed: u64,
    pub participants: [UserId; 2],
    pub outcome: BattleOutcome,
    pub reason: TerminationReason,
    pub turns_elapsed: u32,
    /// Remaining health, in participant order.
    pub final_health: [u32; 2],
    pub turns: Vec<TurnLog>,
}

impl BattleResult {
    pub fn winner(&self) -> Option<UserId> {
        match self.outcome {
            BattleOutcome::Victory { winner, .. } => Some(winner),
            BattleOutcome::Draw => None,
        }
    }

    pub fn loser(&self) -> Option<UserId> {
        match self.outcome {
            BattleOutcome::Victory { loser, .. } => Some(loser),
            BattleOutcome::Draw => None,
        }
    }

    pub fn is_draw(&self) -> bool {
        matches!(self.outcome, BattleOutcome::Draw)
    }

    pub fn health_of(&self, user: UserId) -> Option<u32> {
        self.participants
            .iter()
            .position(|p| *p == user)
            .map(|i| self.final_health[i])
    }
}

/// State of a battle after a turn that did not end it.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleSnapshot {
    /// Turn just resolved.
    pub turn: u32,
    pub fighters: [Fighter; 2],
    pub last_turn: TurnLog,
}

/// Result of resolving one turn.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TurnAdvance {
    InProgress(BattleSnapshot),
    Concluded(BattleResult),
}

impl TurnAdvance {
    pub fn is_concluded(&self) -> bool {
        matches!(self, Self::Concluded(_))
    }
}
