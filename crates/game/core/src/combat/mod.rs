//! Combat resolution system.
//!
//! Pure functions and value types for resolving single hits and aging status
//! effects. Nothing here mutates a battle; [`crate::engine`] drives these.
//!
//! # Core Functions
//!
//! - `resolve_damage`: mitigated damage of one hit
//! - `StatusEffects::tick`: periodic damage and duration aging

pub mod damage;
pub mod status;

pub use damage::{DamageBreakdown, Strike, resolve_damage};
pub use status::{EffectTarget, StatusEffect, StatusEffectKind, StatusEffects, TickOutcome};
