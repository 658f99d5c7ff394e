//! Pre-fight balance report.
//!
//! Purely advisory: a report can warn a challenger but never blocks a battle.

use crate::combat::{Strike, resolve_damage};
use crate::config::{ArenaConfig, BattleConfig};
use crate::fighter::{Fighter, UserId};

/// Non-fatal finding about a proposed pairing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BalanceWarning {
    #[error(
        "unbalanced match: {attacker} projects {projected_damage} turn-1 damage, above {threshold}"
    )]
    UnbalancedMatch {
        attacker: UserId,
        projected_damage: u32,
        threshold: u32,
    },
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BalanceReport {
    /// `a.cp / b.cp` in per-mille.
    pub cp_ratio: u32,
    /// `a.max_health / b.max_health` in per-mille.
    pub health_ratio: u32,
    pub level_gap: u32,
    /// Mitigated turn-1 ability damage each side would deal, in input order.
    pub projected_turn_one: [u32; 2],
    pub warnings: Vec<BalanceWarning>,
}

impl BalanceReport {
    pub fn is_balanced(&self) -> bool {
        self.warnings.is_empty()
    }
}

/// Compares two snapshots as they would enter a battle.
pub fn validate_balance(a: &Fighter, b: &Fighter, rules: &BattleConfig) -> BalanceReport {
    let projected_turn_one = [opening_damage(a, b, rules), opening_damage(b, a, rules)];

    let smaller_health = a.max_health.min(b.max_health) as u64;
    let threshold =
        (smaller_health * rules.unbalanced_threshold as u64 / ArenaConfig::PERMILLE) as u32;

    let warnings = [(a, projected_turn_one[0]), (b, projected_turn_one[1])]
        .into_iter()
        .filter(|(_, damage)| *damage > threshold)
        .map(|(attacker, projected_damage)| BalanceWarning::UnbalancedMatch {
            attacker: attacker.user_id,
            projected_damage,
            threshold,
        })
        .collect();

    BalanceReport {
        cp_ratio: ratio(a.balanced_cp, b.balanced_cp),
        health_ratio: ratio(a.max_health, b.max_health),
        level_gap: a.level.abs_diff(b.level),
        projected_turn_one,
        warnings,
    }
}

/// Damage of the attacker's opening move against a fresh defender.
fn opening_damage(attacker: &Fighter, defender: &Fighter, rules: &BattleConfig) -> u32 {
    let base_damage = if attacker.ability_ready() {
        attacker.ability.base_damage
    } else {
        rules.basic_attack_power
    };
    let strike = Strike {
        base_damage,
        attacker_cp: attacker.balanced_cp,
        defender_cp: defender.balanced_cp,
        bypass_defense: attacker.ability.bypasses_defense(),
    };
    resolve_damage(&strike, &defender.effects, 1, rules).damage
}

fn ratio(numerator: u32, denominator: u32) -> u32 {
    if denominator == 0 {
        return u32::MAX;
    }
    let value = numerator as u64 * ArenaConfig::PERMILLE / denominator as u64;
    u32::try_from(value).unwrap_or(u32::MAX)
}
