//! Data-driven arena content and loaders.
//!
//! This crate houses static arena content and provides loaders for RON/TOML data files:
//! - Ability catalog, keyed by item (data-driven via RON)
//! - NPC roster used for fallback opponents (data-driven via RON)
//! - Seed players for demos and local runs (data-driven via RON)
//! - Battle rules and balance tables (data-driven via TOML)
//!
//! Content is consumed by runtime oracles and never appears in battle state.
//!
//! All loaders use arena-core types directly with serde for RON/TOML deserialization.

pub mod roster;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use roster::{NpcRoster, NpcTemplate};

#[cfg(feature = "loaders")]
pub use loaders::{
    AbilityEntry, AbilityLoader, ConfigLoader, ContentFactory, NpcLoader, PlayerLoader,
    PlayerSeed,
};
