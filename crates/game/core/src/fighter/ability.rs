//! Equippable abilities and the effects they carry.

use bitflags::bitflags;

use crate::combat::StatusEffectKind;

bitflags! {
    /// Behaviour switches on an ability.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct AbilityFlags: u8 {
        /// Ignores every defender-side damage multiplier.
        const BYPASS_DEFENSE = 0b0000_0001;
    }
}

/// Status effect an ability applies when it lands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectTemplate {
    pub kind: StatusEffectKind,
    /// Turns the effect stays active.
    pub duration: u32,
    /// Per-mille multiplier for mitigating kinds, damage per tick for
    /// periodic kinds, unused otherwise.
    pub magnitude: u32,
}

impl EffectTemplate {
    pub const fn new(kind: StatusEffectKind, duration: u32, magnitude: u32) -> Self {
        Self {
            kind,
            duration,
            magnitude,
        }
    }

    /// Template using the kind's standard duration and magnitude.
    pub const fn standard(kind: StatusEffectKind) -> Self {
        Self::new(kind, kind.default_duration(), kind.default_magnitude())
    }
}

/// Ability definition as provided by the ability catalog.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ability {
    pub name: String,
    pub base_damage: u32,
    /// Turns the ability stays unavailable after use.
    pub cooldown_turns: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub effect: Option<EffectTemplate>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub flags: AbilityFlags,
}

impl Ability {
    pub fn new(name: impl Into<String>, base_damage: u32, cooldown_turns: u32) -> Self {
        Self {
            name: name.into(),
            base_damage,
            cooldown_turns,
            effect: None,
            flags: AbilityFlags::empty(),
        }
    }

    #[must_use]
    pub fn with_effect(mut self, effect: EffectTemplate) -> Self {
        self.effect = Some(effect);
        self
    }

    #[must_use]
    pub fn with_flags(mut self, flags: AbilityFlags) -> Self {
        self.flags = flags;
        self
    }

    pub fn bypasses_defense(&self) -> bool {
        self.flags.contains(AbilityFlags::BYPASS_DEFENSE)
    }
}
