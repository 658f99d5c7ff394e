//! Battle state machine.
//!
//! A [`Battle`] owns two fighter snapshots and moves through
//! `NotStarted → InProgress(turn) → Concluded(reason)`. Turns are resolved
//! one at a time through [`Battle::advance_turn`]; [`Battle::run`] is the same
//! primitive called in a loop. Inputs are validated in [`Battle::new`], so a
//! rejected battle never mutates anything.

mod errors;
mod log;
mod result;
mod turns;

use std::fmt;

pub use errors::BattleError;
pub use log::{ActionKind, ActionLog, TickLog, TurnLog};
pub use result::{BattleOutcome, BattleResult, BattleSnapshot, TerminationReason, TurnAdvance};

use crate::config::BattleConfig;
use crate::env::{PcgRng, RngOracle, compute_seed, context};
use crate::fighter::{Fighter, UserId};

/// Slot of a participant inside a battle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    A,
    B,
}

impl Side {
    pub const fn index(self) -> usize {
        match self {
            Side::A => 0,
            Side::B => 1,
        }
    }

    pub const fn other(self) -> Side {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Side::A => "A",
            Side::B => "B",
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattlePhase {
    NotStarted,
    /// `turn` is the next turn to resolve, 1-based.
    InProgress { turn: u32 },
    Concluded(TerminationReason),
}

/// One multi-turn exchange between two fighters.
#[derive(Clone, Debug)]
pub struct Battle {
    seed: u64,
    rules: BattleConfig,
    fighters: [Fighter; 2],
    phase: BattlePhase,
    turns: Vec<TurnLog>,
    result: Option<BattleResult>,
}

impl Battle {
    /// Validates both snapshots and prepares a battle.
    pub fn new(
        a: Fighter,
        b: Fighter,
        seed: u64,
        rules: BattleConfig,
    ) -> Result<Self, BattleError> {
        a.validate()
            .map_err(|reason| BattleError::InvalidFighter { side: Side::A, reason })?;
        b.validate()
            .map_err(|reason| BattleError::InvalidFighter { side: Side::B, reason })?;
        if a.user_id == b.user_id {
            return Err(BattleError::SameFighter(a.user_id));
        }

        Ok(Self {
            seed,
            rules,
            fighters: [a, b],
            phase: BattlePhase::NotStarted,
            turns: Vec::new(),
            result: None,
        })
    }

    /// Moves a fresh battle to turn 1. Starting an in-progress battle is a no-op.
    pub fn start(&mut self) -> Result<(), BattleError> {
        match self.phase {
            BattlePhase::NotStarted => {
                self.phase = BattlePhase::InProgress { turn: 1 };
                Ok(())
            }
            BattlePhase::InProgress { .. } => Ok(()),
            BattlePhase::Concluded(_) => Err(BattleError::AlreadyConcluded),
        }
    }

    /// Resolves exactly one turn, starting the battle if needed.
    pub fn advance_turn(&mut self) -> Result<TurnAdvance, BattleError> {
        self.start()?;
        let BattlePhase::InProgress { turn } = self.phase else {
            return Err(BattleError::AlreadyConcluded);
        };

        let first = self.initiative(turn);
        let mut log = TurnLog::new(turn);

        if let Some(reason) = self.resolve_turn(turn, first, &mut log) {
            self.turns.push(log);
            return Ok(TurnAdvance::Concluded(self.conclude(reason, None)));
        }

        self.turns.push(log.clone());
        if turn >= self.rules.turn_cap.max(1) {
            return Ok(TurnAdvance::Concluded(
                self.conclude(TerminationReason::TurnLimitReached, None),
            ));
        }

        self.phase = BattlePhase::InProgress { turn: turn + 1 };
        Ok(TurnAdvance::InProgress(BattleSnapshot {
            turn,
            fighters: self.fighters.clone(),
            last_turn: log,
        }))
    }

    /// Resolves turns until the battle concludes.
    pub fn run(&mut self) -> Result<BattleResult, BattleError> {
        loop {
            if let TurnAdvance::Concluded(result) = self.advance_turn()? {
                return Ok(result);
            }
        }
    }

    /// Ends the battle immediately with `user` as the loser.
    pub fn forfeit(&mut self, user: UserId) -> Result<BattleResult, BattleError> {
        if self.is_concluded() {
            return Err(BattleError::AlreadyConcluded);
        }
        let side = self.side_of(user).ok_or(BattleError::UnknownParticipant(user))?;
        Ok(self.conclude(TerminationReason::Forfeit, Some(side)))
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn phase(&self) -> BattlePhase {
        self.phase
    }

    pub fn is_concluded(&self) -> bool {
        matches!(self.phase, BattlePhase::Concluded(_))
    }

    pub fn fighter(&self, side: Side) -> &Fighter {
        &self.fighters[side.index()]
    }

    pub fn participants(&self) -> [UserId; 2] {
        [self.fighters[0].user_id, self.fighters[1].user_id]
    }

    pub fn side_of(&self, user: UserId) -> Option<Side> {
        [Side::A, Side::B]
            .into_iter()
            .find(|side| self.fighters[side.index()].user_id == user)
    }

    pub fn turns(&self) -> &[TurnLog] {
        &self.turns
    }

    pub fn result(&self) -> Option<&BattleResult> {
        self.result.as_ref()
    }

    /// Side acting first in `turn`, from a fresh coin per turn.
    pub fn initiative(&self, turn: u32) -> Side {
        if PcgRng.coin(compute_seed(self.seed, turn, context::INITIATIVE)) {
            Side::A
        } else {
            Side::B
        }
    }

    fn conclude(&mut self, reason: TerminationReason, forfeiting: Option<Side>) -> BattleResult {
        let [a, b] = &self.fighters;

        let outcome = match (reason, forfeiting) {
            (TerminationReason::Forfeit, Some(side)) => {
                let loser = self.fighters[side.index()].user_id;
                let winner = self.fighters[side.other().index()].user_id;
                BattleOutcome::Victory { winner, loser }
            }
            _ => match a.current_health.cmp(&b.current_health) {
                std::cmp::Ordering::Greater => BattleOutcome::Victory {
                    winner: a.user_id,
                    loser: b.user_id,
                },
                std::cmp::Ordering::Less => BattleOutcome::Victory {
                    winner: b.user_id,
                    loser: a.user_id,
                },
                std::cmp::Ordering::Equal => BattleOutcome::Draw,
            },
        };

        let result = BattleResult {
            seed: self.seed,
            participants: [a.user_id, b.user_id],
            outcome,
            reason,
            turns_elapsed: self.turns.len() as u32,
            final_health: [a.current_health, b.current_health],
            turns: self.turns.clone(),
        };

        self.phase = BattlePhase::Concluded(reason);
        self.result = Some(result.clone());
        result
    }

    fn pair_mut(&mut self, actor: Side) -> (&mut Fighter, &mut Fighter) {
        let [a, b] = &mut self.fighters;
        match actor {
            Side::A => (a, b),
            Side::B => (b, a),
        }
    }
}

/// Runs a full battle in one synchronous pass.
pub fn simulate(
    a: Fighter,
    b: Fighter,
    seed: u64,
    rules: BattleConfig,
) -> Result<BattleResult, BattleError> {
    Battle::new(a, b, seed, rules)?.run()
}

#[cfg(test)]
mod tests;
