//! Status effects carried by a fighter and their end-of-action aging.
//!
//! Periodic kinds (burn, poison) deal their magnitude as damage on every tick.
//! Mitigating shields and binds are consumed by the battle engine at the moment
//! they matter; every kind still ages by one on each tick so nothing lingers
//! past its duration.

use arrayvec::ArrayVec;

use crate::config::ArenaConfig;
use crate::fighter::EffectTemplate;

/// Types of status effects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StatusEffectKind {
    /// Absorbs part of the next hit.
    PartialShield,
    /// Absorbs half of the next hit.
    MediumShield,
    /// Absorbs most of the next hit.
    HeavyShield,
    /// Encased in ice; reduces incoming damage while it lasts.
    Freeze,
    /// Fire damage every tick.
    Burn,
    /// Poison damage every tick.
    Poison,
    /// Skips the next action.
    Bind,
}

/// Which side of an exchange receives an ability's effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EffectTarget {
    User,
    Opponent,
}

impl StatusEffectKind {
    pub const fn target(self) -> EffectTarget {
        match self {
            Self::PartialShield | Self::MediumShield | Self::HeavyShield | Self::Freeze => {
                EffectTarget::User
            }
            Self::Burn | Self::Poison | Self::Bind => EffectTarget::Opponent,
        }
    }

    /// Kinds that deal damage on tick.
    pub const fn is_periodic(self) -> bool {
        matches!(self, Self::Burn | Self::Poison)
    }

    /// Kinds that scale incoming damage on the holder.
    pub const fn is_mitigating(self) -> bool {
        matches!(
            self,
            Self::PartialShield | Self::MediumShield | Self::HeavyShield | Self::Freeze
        )
    }

    /// Kinds removed as soon as they take effect once.
    pub const fn is_consumable(self) -> bool {
        matches!(
            self,
            Self::PartialShield | Self::MediumShield | Self::HeavyShield | Self::Bind
        )
    }

    pub const fn default_duration(self) -> u32 {
        match self {
            Self::PartialShield | Self::MediumShield | Self::HeavyShield => 2,
            // Survive the end-of-turn tick so they reach the opponent's next action.
            Self::Freeze | Self::Bind => 2,
            Self::Burn | Self::Poison => 3,
        }
    }

    pub const fn default_magnitude(self) -> u32 {
        match self {
            Self::PartialShield => 700,
            Self::MediumShield => 500,
            Self::HeavyShield => 300,
            Self::Freeze => 600,
            Self::Burn => 20,
            Self::Poison => 15,
            Self::Bind => 0,
        }
    }
}

/// One active effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffect {
    pub kind: StatusEffectKind,
    pub remaining: u32,
    pub magnitude: u32,
}

impl From<EffectTemplate> for StatusEffect {
    fn from(template: EffectTemplate) -> Self {
        Self {
            kind: template.kind,
            remaining: template.duration,
            magnitude: template.magnitude,
        }
    }
}

/// Result of aging a fighter's effects by one tick.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TickOutcome {
    /// Total periodic damage due this tick.
    pub periodic_damage: u32,
    /// Kinds purged because their duration ran out.
    pub expired: Vec<StatusEffectKind>,
}

/// Ordered list of active effects on a fighter.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffects {
    effects: ArrayVec<StatusEffect, { ArenaConfig::MAX_STATUS_EFFECTS }>,
}

impl StatusEffects {
    pub fn empty() -> Self {
        Self {
            effects: ArrayVec::new(),
        }
    }

    pub fn has(&self, kind: StatusEffectKind) -> bool {
        self.effects.iter().any(|e| e.kind == kind)
    }

    pub fn get(&self, kind: StatusEffectKind) -> Option<&StatusEffect> {
        self.effects.iter().find(|e| e.kind == kind)
    }

    /// Adds an effect, or refreshes an existing one of the same kind.
    ///
    /// A refresh keeps the longer duration and the stronger magnitude. Zero
    /// duration effects are ignored, as is anything past capacity.
    pub fn apply(&mut self, effect: StatusEffect) -> bool {
        if effect.remaining == 0 {
            return false;
        }

        if let Some(existing) = self.effects.iter_mut().find(|e| e.kind == effect.kind) {
            existing.remaining = existing.remaining.max(effect.remaining);
            existing.magnitude = if effect.kind.is_mitigating() {
                // Lower per-mille is the stronger mitigation.
                existing.magnitude.min(effect.magnitude)
            } else {
                existing.magnitude.max(effect.magnitude)
            };
            return true;
        }

        self.effects.try_push(effect).is_ok()
    }

    /// Removes one effect of the given kind. Returns true if it was present.
    pub fn consume(&mut self, kind: StatusEffectKind) -> bool {
        let before = self.effects.len();
        self.effects.retain(|e| e.kind != kind);
        self.effects.len() != before
    }

    /// Removes every consumable mitigating effect (shields) and returns their kinds.
    pub fn consume_shields(&mut self) -> Vec<StatusEffectKind> {
        let consumed = self
            .effects
            .iter()
            .filter(|e| e.kind.is_mitigating() && e.kind.is_consumable())
            .map(|e| e.kind)
            .collect();
        self.effects
            .retain(|e| !(e.kind.is_mitigating() && e.kind.is_consumable()));
        consumed
    }

    /// Ages every effect by one: accumulates periodic damage, decrements
    /// durations and purges entries that reach zero.
    pub fn tick(&mut self) -> TickOutcome {
        let mut outcome = TickOutcome::default();

        for effect in self.effects.iter_mut() {
            if effect.kind.is_periodic() {
                outcome.periodic_damage = outcome.periodic_damage.saturating_add(effect.magnitude);
            }
            effect.remaining = effect.remaining.saturating_sub(1);
            if effect.remaining == 0 {
                outcome.expired.push(effect.kind);
            }
        }

        self.effects.retain(|e| e.remaining > 0);
        outcome
    }

    pub fn iter(&self) -> impl Iterator<Item = &StatusEffect> {
        self.effects.iter()
    }

    pub fn kinds(&self) -> impl Iterator<Item = StatusEffectKind> + '_ {
        self.effects.iter().map(|e| e.kind)
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn effect(kind: StatusEffectKind, remaining: u32, magnitude: u32) -> StatusEffect {
        StatusEffect {
            kind,
            remaining,
            magnitude,
        }
    }

    #[test]
    fn tick_sums_periodic_damage_and_purges_expired() {
        let mut effects = StatusEffects::empty();
        effects.apply(effect(StatusEffectKind::Burn, 2, 20));
        effects.apply(effect(StatusEffectKind::Poison, 1, 15));
        effects.apply(effect(StatusEffectKind::Freeze, 3, 600));

        let first = effects.tick();
        assert_eq!(first.periodic_damage, 35);
        assert_eq!(first.expired, vec![StatusEffectKind::Poison]);
        assert_eq!(effects.len(), 2);

        let second = effects.tick();
        assert_eq!(second.periodic_damage, 20);
        assert_eq!(second.expired, vec![StatusEffectKind::Burn]);

        let third = effects.tick();
        assert_eq!(third.periodic_damage, 0);
        assert_eq!(third.expired, vec![StatusEffectKind::Freeze]);
        assert!(effects.is_empty());
    }

    #[test]
    fn reapply_refreshes_instead_of_stacking() {
        let mut effects = StatusEffects::empty();
        effects.apply(effect(StatusEffectKind::Burn, 1, 20));
        effects.apply(effect(StatusEffectKind::Burn, 3, 10));

        assert_eq!(effects.len(), 1);
        let burn = effects.get(StatusEffectKind::Burn).unwrap();
        assert_eq!(burn.remaining, 3);
        assert_eq!(burn.magnitude, 20);

        effects.apply(effect(StatusEffectKind::PartialShield, 1, 700));
        effects.apply(effect(StatusEffectKind::PartialShield, 1, 500));
        assert_eq!(
            effects.get(StatusEffectKind::PartialShield).unwrap().magnitude,
            500
        );
    }

    #[test]
    fn zero_duration_is_ignored() {
        let mut effects = StatusEffects::empty();
        assert!(!effects.apply(effect(StatusEffectKind::Bind, 0, 0)));
        assert!(effects.is_empty());
    }

    #[test]
    fn capacity_is_bounded() {
        use strum::IntoEnumIterator;

        let mut effects = StatusEffects::empty();
        for kind in StatusEffectKind::iter() {
            assert!(effects.apply(effect(kind, 2, 1)));
        }
        assert!(effects.len() <= ArenaConfig::MAX_STATUS_EFFECTS);
    }

    #[test]
    fn consume_shields_leaves_freeze() {
        let mut effects = StatusEffects::empty();
        effects.apply(effect(StatusEffectKind::HeavyShield, 2, 300));
        effects.apply(effect(StatusEffectKind::Freeze, 2, 600));
        effects.apply(effect(StatusEffectKind::Bind, 1, 0));

        assert_eq!(effects.consume_shields(), vec![StatusEffectKind::HeavyShield]);
        assert!(effects.has(StatusEffectKind::Freeze));
        assert!(effects.has(StatusEffectKind::Bind));
        assert!(effects.consume(StatusEffectKind::Bind));
        assert!(!effects.consume(StatusEffectKind::Bind));
    }
}
