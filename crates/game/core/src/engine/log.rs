//! Per-turn battle log.

use crate::combat::StatusEffectKind;
use crate::fighter::UserId;

/// What a fighter did with its action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionKind {
    /// Used the equipped ability.
    Ability,
    /// Ability on cooldown; fell back to the basic attack.
    Basic,
    /// Lost the action to a bind.
    Bound,
}

/// One fighter's action within a turn.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionLog {
    pub actor: UserId,
    pub kind: ActionKind,
    pub base_damage: u32,
    /// Health actually removed from the target.
    pub damage: u32,
    /// Defender mitigation applied to the hit, in per-mille.
    pub effect_multiplier: u32,
    pub target_health: u32,
    pub effect_applied: Option<StatusEffectKind>,
    pub shields_consumed: Vec<StatusEffectKind>,
}

impl ActionLog {
    pub(crate) fn bound(actor: UserId, target_health: u32) -> Self {
        Self {
            actor,
            kind: ActionKind::Bound,
            base_damage: 0,
            damage: 0,
            effect_multiplier: crate::config::ArenaConfig::PERMILLE as u32,
            target_health,
            effect_applied: None,
            shields_consumed: Vec::new(),
        }
    }
}

/// End-of-turn aging of one fighter.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TickLog {
    pub fighter: UserId,
    pub periodic_damage: u32,
    pub expired: Vec<StatusEffectKind>,
    pub health_after: u32,
    pub cooldown_after: u32,
}

/// Everything that happened in one turn, in order.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnLog {
    pub turn: u32,
    pub actions: Vec<ActionLog>,
    /// Empty when the battle ended during the action phase.
    pub ticks: Vec<TickLog>,
}

impl TurnLog {
    pub fn new(turn: u32) -> Self {
        Self {
            turn,
            actions: Vec::with_capacity(2),
            ticks: Vec::with_capacity(2),
        }
    }

    /// Who acted first this turn.
    pub fn first_actor(&self) -> Option<UserId> {
        self.actions.first().map(|a| a.actor)
    }

    pub fn damage_by(&self, actor: UserId) -> u32 {
        self.actions
            .iter()
            .filter(|a| a.actor == actor)
            .map(|a| a.damage)
            .sum()
    }
}
