//! Self-contained combat snapshots.
//!
//! A [`Fighter`] is rebuilt from source-of-truth records every time a user
//! joins the queue or issues a challenge. It is owned by exactly one holder at
//! a time (a queue entry or a battle) and is never cached by the core.

mod ability;

use std::fmt;

pub use ability::{Ability, AbilityFlags, EffectTemplate};

use crate::combat::StatusEffects;

/// Identifier of a player or a synthetic opponent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UserId(pub u64);

impl UserId {
    /// High bit reserved for synthetic (NPC) opponents.
    const NPC_BIT: u64 = 1 << 63;

    /// Identifier for a synthetic opponent with the given serial.
    pub const fn npc(serial: u64) -> Self {
        Self(serial | Self::NPC_BIT)
    }

    #[inline]
    pub const fn is_npc(self) -> bool {
        self.0 & Self::NPC_BIT != 0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_npc() {
            write!(f, "npc#{}", self.0 & !Self::NPC_BIT)
        } else {
            write!(f, "{}", self.0)
        }
    }
}

/// Normalized combat snapshot of one participant.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Fighter {
    pub user_id: UserId,
    pub username: String,
    pub level: u32,
    pub balanced_cp: u32,
    pub max_health: u32,
    pub current_health: u32,
    pub ability: Ability,
    /// Turns until the ability can be used again; `0` means ready.
    pub ability_cooldown: u32,
    pub effects: StatusEffects,
}

impl Fighter {
    /// Fresh snapshot at full health with the ability ready.
    pub fn new(
        user_id: UserId,
        username: impl Into<String>,
        level: u32,
        balanced_cp: u32,
        max_health: u32,
        ability: Ability,
    ) -> Self {
        Self {
            user_id,
            username: username.into(),
            level,
            balanced_cp,
            max_health,
            current_health: max_health,
            ability,
            ability_cooldown: 0,
            effects: StatusEffects::empty(),
        }
    }

    pub fn is_defeated(&self) -> bool {
        self.current_health == 0
    }

    pub fn ability_ready(&self) -> bool {
        self.ability_cooldown == 0
    }

    /// Subtracts damage, clamped at zero. Returns the damage actually taken.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        let taken = amount.min(self.current_health);
        self.current_health -= taken;
        taken
    }

    /// Checks the snapshot invariants a battle relies on.
    pub fn validate(&self) -> Result<(), FighterDefect> {
        if self.username.trim().is_empty() {
            return Err(FighterDefect::MissingUsername);
        }
        if self.balanced_cp == 0 {
            return Err(FighterDefect::ZeroCombatPower);
        }
        if self.max_health == 0 {
            return Err(FighterDefect::ZeroMaxHealth);
        }
        if self.current_health > self.max_health {
            return Err(FighterDefect::HealthAboveMaximum);
        }
        if self.is_defeated() {
            return Err(FighterDefect::AlreadyDefeated);
        }
        if self.ability.name.trim().is_empty() || self.ability.base_damage == 0 {
            return Err(FighterDefect::MissingAbility);
        }
        Ok(())
    }
}

/// Reason a snapshot cannot enter a battle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FighterDefect {
    #[error("username is missing")]
    MissingUsername,

    #[error("balanced CP is zero")]
    ZeroCombatPower,

    #[error("max health is zero")]
    ZeroMaxHealth,

    #[error("current health exceeds max health")]
    HealthAboveMaximum,

    #[error("fighter has no health left")]
    AlreadyDefeated,

    #[error("no usable ability equipped")]
    MissingAbility,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fighter() -> Fighter {
        Fighter::new(UserId(7), "luffy", 12, 300, 400, Ability::new("Pistol", 150, 1))
    }

    #[test]
    fn npc_ids_are_tagged() {
        let npc = UserId::npc(3);
        assert!(npc.is_npc());
        assert!(!UserId(3).is_npc());
        assert_eq!(npc.to_string(), "npc#3");
        assert_eq!(UserId(3).to_string(), "3");
    }

    #[test]
    fn damage_clamps_at_zero() {
        let mut f = fighter();
        assert_eq!(f.take_damage(150), 150);
        assert_eq!(f.current_health, 250);
        assert_eq!(f.take_damage(1000), 250);
        assert_eq!(f.current_health, 0);
        assert!(f.is_defeated());
    }

    #[test]
    fn validate_flags_malformed_snapshots() {
        assert_eq!(fighter().validate(), Ok(()));

        let mut f = fighter();
        f.current_health = 401;
        assert_eq!(f.validate(), Err(FighterDefect::HealthAboveMaximum));

        let mut f = fighter();
        f.username = "  ".into();
        assert_eq!(f.validate(), Err(FighterDefect::MissingUsername));

        let mut f = fighter();
        f.ability.base_damage = 0;
        assert_eq!(f.validate(), Err(FighterDefect::MissingAbility));

        let mut f = fighter();
        f.balanced_cp = 0;
        assert_eq!(f.validate(), Err(FighterDefect::ZeroCombatPower));

        let mut f = fighter();
        f.current_health = 0;
        assert_eq!(f.validate(), Err(FighterDefect::AlreadyDefeated));
    }
}
