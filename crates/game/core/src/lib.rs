//! Deterministic battle rules and data types for the fruit arena.
//!
//! `arena-core` holds the canonical rules (fighter profiles, damage, status
//! effects, the battle state machine) as pure APIs free of I/O, so they can be
//! driven by the async runtime, offline simulators and tests alike. Every
//! battle is advanced through [`engine::Battle`], and supporting crates depend
//! on the types re-exported here.
pub mod balance;
pub mod combat;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod fighter;
pub mod profile;

pub use balance::{BalanceReport, BalanceWarning, validate_balance};
pub use combat::{
    DamageBreakdown, EffectTarget, StatusEffect, StatusEffectKind, StatusEffects, Strike,
    TickOutcome, resolve_damage,
};
pub use config::{
    ArenaConfig, BalanceTables, BalanceTablesError, BattleConfig, LevelStep, RarityBand,
};
pub use engine::{
    ActionKind, ActionLog, Battle, BattleError, BattleOutcome, BattlePhase, BattleResult,
    BattleSnapshot, Side, TerminationReason, TickLog, TurnAdvance, TurnLog, simulate,
};
pub use env::{AbilityOracle, PcgRng, RngOracle, compute_seed, context};
pub use error::{ArenaError, ErrorSeverity};
pub use fighter::{Ability, AbilityFlags, EffectTemplate, Fighter, FighterDefect, UserId};
pub use profile::{ItemId, OwnedItem, ProfileError, Rarity, UserRecord, build_fighter};
