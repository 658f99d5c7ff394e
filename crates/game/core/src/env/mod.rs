//! Traits describing read-only data the rules consume.
//!
//! Oracles expose static content (the ability catalog) and deterministic
//! randomness. Concrete implementations live in the runtime so the core stays
//! free of storage and I/O concerns.
mod abilities;
mod rng;

pub use abilities::AbilityOracle;
pub use rng::{PcgRng, RngOracle, compute_seed, context};
