//! Error types for the battle state machine.

use crate::error::{ArenaError, ErrorSeverity};
use crate::fighter::{FighterDefect, UserId};

use super::Side;

/// Errors surfaced while creating or driving a battle.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattleError {
    #[error("fighter {side} is invalid: {reason}")]
    InvalidFighter { side: Side, reason: FighterDefect },

    #[error("user {0} cannot fight themselves")]
    SameFighter(UserId),

    #[error("battle has already concluded")]
    AlreadyConcluded,

    #[error("user {0} is not a participant of this battle")]
    UnknownParticipant(UserId),
}

impl ArenaError for BattleError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::InvalidFighter { .. } | Self::SameFighter(_) | Self::UnknownParticipant(_) => {
                ErrorSeverity::Validation
            }
            Self::AlreadyConcluded => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidFighter { .. } => "INVALID_FIGHTER",
            Self::SameFighter(_) => "SAME_FIGHTER",
            Self::AlreadyConcluded => "ALREADY_CONCLUDED",
            Self::UnknownParticipant(_) => "UNKNOWN_PARTICIPANT",
        }
    }
}
