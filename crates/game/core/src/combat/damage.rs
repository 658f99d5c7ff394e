//! Damage calculation.

use crate::config::{ArenaConfig, BattleConfig};

use super::status::StatusEffects;

const PERMILLE: u64 = ArenaConfig::PERMILLE;

/// Everything the attacker side contributes to one hit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Strike {
    pub base_damage: u32,
    pub attacker_cp: u32,
    pub defender_cp: u32,
    /// Forces the effect multiplier to ×1.0.
    pub bypass_defense: bool,
}

/// Intermediate values of a damage resolution, all multipliers in per-mille.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageBreakdown {
    pub cp_multiplier: u32,
    pub turn_multiplier: u32,
    pub effect_multiplier: u32,
    /// Damage before the minimum is applied.
    pub raw: u32,
    /// Minimum damage for this base value.
    pub floor: u32,
    /// Final damage: `max(raw, floor)`.
    pub damage: u32,
}

/// Resolve the damage of a single hit.
///
/// # Formula
///
/// ```text
/// ratio            = min(attacker_cp / defender_cp, cp_ratio_cap)
/// cp_multiplier    = 1 + (ratio - 1) * cp_edge_share
/// turn_multiplier  = turn_one_multiplier on turn 1, else 1
/// effect_multiplier= product of defender mitigation (1 if bypassing)
/// damage           = max(floor(base * cp * turn * effect),
///                        ceil(base * damage_floor))
/// ```
///
/// `turn` is 1-based.
pub fn resolve_damage(
    strike: &Strike,
    defender_effects: &StatusEffects,
    turn: u32,
    rules: &BattleConfig,
) -> DamageBreakdown {
    let cp_multiplier = cp_multiplier(strike.attacker_cp, strike.defender_cp, rules);
    let turn_multiplier = turn_multiplier(turn, rules);
    let effect_multiplier = if strike.bypass_defense {
        PERMILLE as u32
    } else {
        effect_multiplier(defender_effects)
    };

    let scale = (PERMILLE as u128).pow(3);
    let raw = (strike.base_damage as u128
        * cp_multiplier as u128
        * turn_multiplier as u128
        * effect_multiplier as u128)
        / scale;
    let raw = u32::try_from(raw).unwrap_or(u32::MAX);
    let floor = damage_floor(strike.base_damage, rules);

    DamageBreakdown {
        cp_multiplier,
        turn_multiplier,
        effect_multiplier,
        raw,
        floor,
        damage: raw.max(floor),
    }
}

/// Only a share of the (capped) CP edge carries into damage.
pub fn cp_multiplier(attacker_cp: u32, defender_cp: u32, rules: &BattleConfig) -> u32 {
    let cap = rules.cp_ratio_cap as u64;
    let ratio = if defender_cp == 0 {
        cap
    } else {
        (attacker_cp as u64 * PERMILLE / defender_cp as u64).min(cap)
    };

    let edge = (ratio as i64 - PERMILLE as i64) * rules.cp_edge_share as i64 / PERMILLE as i64;
    (PERMILLE as i64 + edge).max(0) as u32
}

pub fn turn_multiplier(turn: u32, rules: &BattleConfig) -> u32 {
    if turn <= 1 {
        rules.turn_one_multiplier
    } else {
        PERMILLE as u32
    }
}

/// Multiplicative stack of every mitigating effect on the defender.
pub fn effect_multiplier(effects: &StatusEffects) -> u32 {
    effects
        .iter()
        .filter(|e| e.kind.is_mitigating())
        .fold(PERMILLE, |acc, e| acc * e.magnitude.min(PERMILLE as u32) as u64 / PERMILLE)
        as u32
}

/// `ceil(base * damage_floor)`.
pub fn damage_floor(base_damage: u32, rules: &BattleConfig) -> u32 {
    let scaled = base_damage as u64 * rules.damage_floor as u64;
    scaled.div_ceil(PERMILLE) as u32
}
