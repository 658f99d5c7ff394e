//! Arena configuration constants and tunable parameters.
//!
//! Compile-time limits live on [`ArenaConfig`]; everything a product decision
//! may retune (turn cap, damage shaping, balance curves) is carried by
//! [`BattleConfig`] and [`BalanceTables`] so callers can load them from content.

use crate::profile::Rarity;

/// Compile-time limits shared across the crate.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ArenaConfig {
    pub battle: BattleConfig,
    pub balance: BalanceTables,
}

impl ArenaConfig {
    // ===== compile-time constants used as type parameters =====
    /// Maximum number of simultaneous status effects on one fighter.
    pub const MAX_STATUS_EFFECTS: usize = 8;
    /// Minimum number of owned items required to build a fighter.
    pub const MIN_OWNED_ITEMS: usize = 5;
    /// Fixed-point scale used by every multiplier (per-mille).
    pub const PERMILLE: u64 = 1000;

    pub fn new(battle: BattleConfig, balance: BalanceTables) -> Self {
        Self { battle, balance }
    }
}

/// Rules that shape a single battle.
///
/// All multipliers are expressed in per-mille (`1000` = ×1.0).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BattleConfig {
    /// Number of turns after which the battle resolves on remaining health.
    pub turn_cap: u32,
    /// Base damage of the fallback attack used while the ability cools down.
    pub basic_attack_power: u32,
    /// Damage multiplier applied on turn one.
    pub turn_one_multiplier: u32,
    /// Share of the raw CP edge that carries into damage.
    pub cp_edge_share: u32,
    /// Upper bound on the attacker/defender CP ratio.
    pub cp_ratio_cap: u32,
    /// Minimum damage as a fraction of base damage (rounded up).
    pub damage_floor: u32,
    /// Projected turn-one damage, relative to the smaller max health, that
    /// marks a pairing as unbalanced.
    pub unbalanced_threshold: u32,
}

impl BattleConfig {
    pub const DEFAULT_TURN_CAP: u32 = 15;
    pub const DEFAULT_BASIC_ATTACK_POWER: u32 = 40;
    pub const DEFAULT_TURN_ONE_MULTIPLIER: u32 = 200;
    pub const DEFAULT_CP_EDGE_SHARE: u32 = 300;
    pub const DEFAULT_CP_RATIO_CAP: u32 = 2000;
    pub const DEFAULT_DAMAGE_FLOOR: u32 = 100;
    pub const DEFAULT_UNBALANCED_THRESHOLD: u32 = 600;

    pub const fn new() -> Self {
        Self {
            turn_cap: Self::DEFAULT_TURN_CAP,
            basic_attack_power: Self::DEFAULT_BASIC_ATTACK_POWER,
            turn_one_multiplier: Self::DEFAULT_TURN_ONE_MULTIPLIER,
            cp_edge_share: Self::DEFAULT_CP_EDGE_SHARE,
            cp_ratio_cap: Self::DEFAULT_CP_RATIO_CAP,
            damage_floor: Self::DEFAULT_DAMAGE_FLOOR,
            unbalanced_threshold: Self::DEFAULT_UNBALANCED_THRESHOLD,
        }
    }

    pub const fn with_turn_cap(mut self, turn_cap: u32) -> Self {
        self.turn_cap = turn_cap;
        self
    }
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// A level threshold and the CP factor it unlocks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LevelStep {
    pub min_level: u32,
    /// CP factor in per-mille.
    pub factor: u32,
}

impl LevelStep {
    pub const fn new(min_level: u32, factor: u32) -> Self {
        Self { min_level, factor }
    }
}

/// Multiplier range for one rarity band, in per-mille.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RarityBand {
    pub min: u32,
    pub max: u32,
}

impl RarityBand {
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    /// Midpoint of the band.
    pub const fn average(&self) -> u32 {
        (self.min + self.max) / 2
    }
}

/// Fairness-compression tables used to derive balanced CP and health.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BalanceTables {
    /// Ascending level thresholds. The weakest factor must be at least one
    /// third of the strongest.
    pub level_steps: Vec<LevelStep>,
    /// Bands indexed by [`Rarity::index`].
    pub rarity_bands: [RarityBand; Rarity::COUNT],
    /// Bonus per extra copy of the same item, in per-mille.
    pub duplicate_bonus: u32,
    /// Flat health every fighter starts from.
    pub base_health: u32,
    /// Scale of the square-root health term.
    pub health_scale: u32,
}

impl BalanceTables {
    /// Strongest level factor divided by weakest may not exceed this.
    pub const MAX_LEVEL_SPREAD: u32 = 3;

    pub const DEFAULT_DUPLICATE_BONUS: u32 = 10;
    pub const DEFAULT_BASE_HEALTH: u32 = 250;
    pub const DEFAULT_HEALTH_SCALE: u32 = 25;

    pub fn new() -> Self {
        Self {
            level_steps: vec![
                LevelStep::new(1, 1000),
                LevelStep::new(10, 1250),
                LevelStep::new(20, 1500),
                LevelStep::new(30, 1750),
                LevelStep::new(40, 2000),
                LevelStep::new(50, 2250),
                LevelStep::new(60, 2500),
                LevelStep::new(75, 2750),
                LevelStep::new(90, 3000),
            ],
            rarity_bands: [
                RarityBand::new(1000, 1200),
                RarityBand::new(1200, 1500),
                RarityBand::new(1500, 1900),
                RarityBand::new(1900, 2400),
                RarityBand::new(2400, 3200),
                RarityBand::new(3200, 4000),
            ],
            duplicate_bonus: Self::DEFAULT_DUPLICATE_BONUS,
            base_health: Self::DEFAULT_BASE_HEALTH,
            health_scale: Self::DEFAULT_HEALTH_SCALE,
        }
    }

    /// CP factor for a level. Levels below the first threshold use the first step.
    pub fn level_factor(&self, level: u32) -> u32 {
        self.level_steps
            .iter()
            .take_while(|step| step.min_level <= level)
            .last()
            .or_else(|| self.level_steps.first())
            .map_or(ArenaConfig::PERMILLE as u32, |step| step.factor)
    }

    pub fn band(&self, rarity: Rarity) -> RarityBand {
        self.rarity_bands[rarity.index()]
    }

    /// Checks the invariants the balance curve relies on.
    pub fn validate(&self) -> Result<(), BalanceTablesError> {
        let first = self
            .level_steps
            .first()
            .ok_or(BalanceTablesError::EmptyLevelTable)?;

        for pair in self.level_steps.windows(2) {
            if pair[1].min_level <= pair[0].min_level || pair[1].factor < pair[0].factor {
                return Err(BalanceTablesError::NonMonotonicLevels {
                    level: pair[1].min_level,
                });
            }
        }

        let strongest = self.level_steps.iter().map(|s| s.factor).max().unwrap_or(0);
        if first.factor == 0 || strongest > first.factor * Self::MAX_LEVEL_SPREAD {
            return Err(BalanceTablesError::LevelSpreadTooWide {
                weakest: first.factor,
                strongest,
            });
        }

        for pair in self.rarity_bands.windows(2) {
            if pair[1].average() < pair[0].average() {
                return Err(BalanceTablesError::NonMonotonicRarity);
            }
        }
        if self.rarity_bands.iter().any(|band| band.min > band.max) {
            return Err(BalanceTablesError::NonMonotonicRarity);
        }

        Ok(())
    }
}

impl Default for BalanceTables {
    fn default() -> Self {
        Self::new()
    }
}

/// Invalid balance table contents.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum BalanceTablesError {
    #[error("level table is empty")]
    EmptyLevelTable,

    #[error("level table is not ascending at level {level}")]
    NonMonotonicLevels { level: u32 },

    #[error("level factors span {weakest}..{strongest}, more than 3x")]
    LevelSpreadTooWide { weakest: u32, strongest: u32 },

    #[error("rarity bands must increase from common to the top band")]
    NonMonotonicRarity,
}
