//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from the queue, external stores, fighter construction and
//! the battle state machine so clients can bubble them up with one type.
use arena_core::{ArenaError, BattleError, ErrorSeverity, ProfileError, UserId};
use thiserror::Error;

use crate::battles::BattleId;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Queue(#[from] QueueError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Profile(#[from] ProfileError),

    #[error(transparent)]
    Battle(#[from] BattleError),

    #[error("battle {0} not found")]
    BattleNotFound(BattleId),

    #[error("user {0} is not in a live battle")]
    NotInBattle(UserId),

    #[error("arena requires stores to be configured before building")]
    MissingStores,

    #[error("arena state lock was poisoned")]
    LockPoisoned,

    #[error("worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),
}

impl ArenaError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Queue(e) => e.severity(),
            Self::Store(e) => e.severity(),
            Self::Profile(e) => e.severity(),
            Self::Battle(e) => e.severity(),
            Self::BattleNotFound(_) | Self::NotInBattle(_) => ErrorSeverity::Validation,
            Self::MissingStores => ErrorSeverity::Fatal,
            Self::LockPoisoned | Self::WorkerJoin(_) => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Queue(e) => e.error_code(),
            Self::Store(e) => e.error_code(),
            Self::Profile(e) => e.error_code(),
            Self::Battle(e) => e.error_code(),
            Self::BattleNotFound(_) => "BATTLE_NOT_FOUND",
            Self::NotInBattle(_) => "NOT_IN_BATTLE",
            Self::MissingStores => "MISSING_STORES",
            Self::LockPoisoned => "LOCK_POISONED",
            Self::WorkerJoin(_) => "WORKER_JOIN",
        }
    }
}

/// Rejections from the matchmaking queue. None of them mutate the queue.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum QueueError {
    #[error("matchmaking queue is full ({capacity} entries)")]
    QueueFull { capacity: usize },

    #[error("user {0} is already queued")]
    AlreadyQueued(UserId),

    #[error("user {0} is already in a battle")]
    AlreadyInBattle(UserId),

    #[error("user {0} is not queued")]
    NotQueued(UserId),
}

impl ArenaError for QueueError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::QueueFull { .. } | Self::AlreadyInBattle(_) => ErrorSeverity::Recoverable,
            Self::AlreadyQueued(_) | Self::NotQueued(_) => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::QueueFull { .. } => "QUEUE_FULL",
            Self::AlreadyQueued(_) => "ALREADY_QUEUED",
            Self::AlreadyInBattle(_) => "ALREADY_IN_BATTLE",
            Self::NotQueued(_) => "NOT_QUEUED",
        }
    }
}

/// Failures reported by external stores and providers.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("user {0} not found")]
    UserNotFound(UserId),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl ArenaError for StoreError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::UserNotFound(_) => ErrorSeverity::Validation,
            Self::Unavailable(_) => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UserNotFound(_) => "USER_NOT_FOUND",
            Self::Unavailable(_) => "STORE_UNAVAILABLE",
        }
    }
}
