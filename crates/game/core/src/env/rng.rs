//! Deterministic randomness for battle decisions.
//!
//! Battles draw every random decision (currently the per-turn initiative coin)
//! from a stateless generator keyed by the battle seed, so a battle replays
//! identically from the same seed and snapshots.

/// RNG oracle for deterministic random number generation.
///
/// Implementations must produce the same value for the same seed.
pub trait RngOracle: Send + Sync {
    /// Generate a random u32 value from a seed.
    fn next_u32(&self, seed: u64) -> u32;

    /// Fair coin flip.
    fn coin(&self, seed: u64) -> bool {
        // Upper bit; low bits of a permuted LCG output are fine here too.
        self.next_u32(seed) >> 31 == 1
    }

    /// Generate a random value in range [min, max] inclusive.
    fn range(&self, seed: u64, min: u32, max: u32) -> u32 {
        if min >= max {
            return min;
        }
        let span = max - min + 1;
        min + (self.next_u32(seed) % span)
    }
}

/// PCG-XSH-RR generator (64-bit state, 32-bit output).
///
/// Stateless: every call advances a copy of the provided seed once, so the
/// caller owns sequencing through [`compute_seed`].
#[derive(Clone, Copy, Debug, Default)]
pub struct PcgRng;

impl PcgRng {
    const MULTIPLIER: u64 = 6364136223846793005;
    const INCREMENT: u64 = 1442695040888963407;

    #[inline]
    fn step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    #[inline]
    fn output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RngOracle for PcgRng {
    fn next_u32(&self, seed: u64) -> u32 {
        Self::output(Self::step(seed))
    }
}

/// Context tags so independent draws within one turn never share a seed.
pub mod context {
    /// Initiative coin deciding who acts first in a turn.
    pub const INITIATIVE: u32 = 0;
    /// Seed derivation for a freshly created battle.
    pub const BATTLE: u32 = 1;
}

/// Mix the battle seed, turn number and draw context into one seed.
///
/// Constants are the SplitMix64 / FxHash multipliers followed by the
/// MurmurHash3 finalizer.
pub fn compute_seed(battle_seed: u64, turn: u32, context: u32) -> u64 {
    let mut hash = battle_seed;
    hash ^= (turn as u64).wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= (context as u64).wrapping_mul(0x517cc1b727220a95);

    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;

    hash
}
