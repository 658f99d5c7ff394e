//! Fighter profile construction.
//!
//! Turns a user record and the user's owned items into a normalized
//! [`Fighter`] snapshot. Power is deliberately compressed: level contributes
//! through a capped step table and rarity through narrow multiplier bands, so
//! veterans and newcomers land within a fightable range.

mod curve;

use std::fmt;

pub use curve::{ItemStack, average_rarity, balanced_cp, max_health, stack_items};

use crate::config::{ArenaConfig, BalanceTables};
use crate::env::AbilityOracle;
use crate::error::{ArenaError, ErrorSeverity};
use crate::fighter::{Fighter, UserId};

/// Rarity tier of a collectible item.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
    Mythical,
}

impl Rarity {
    pub const COUNT: usize = 6;

    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Catalog identifier of a collectible item.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ItemId(pub String);

impl ItemId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One owned copy of an item, as reported by the inventory store.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OwnedItem {
    pub item_id: ItemId,
    pub rarity: Rarity,
    pub base_power: u32,
}

impl OwnedItem {
    pub fn new(item_id: ItemId, rarity: Rarity, base_power: u32) -> Self {
        Self {
            item_id,
            rarity,
            base_power,
        }
    }
}

/// User fields the profile needs, as reported by the user profile store.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UserRecord {
    pub user_id: UserId,
    pub username: String,
    pub level: u32,
}

impl UserRecord {
    pub fn new(user_id: UserId, username: impl Into<String>, level: u32) -> Self {
        Self {
            user_id,
            username: username.into(),
            level,
        }
    }
}

/// Errors raised while building a fighter.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ProfileError {
    #[error("user {user} owns {owned} items but at least {required} are required to battle")]
    InsufficientAssets {
        user: UserId,
        owned: usize,
        required: usize,
    },

    #[error("no ability is catalogued for item '{item}'")]
    AbilityNotFound { item: ItemId },
}

impl ArenaError for ProfileError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::InsufficientAssets { .. } => ErrorSeverity::Validation,
            Self::AbilityNotFound { .. } => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::InsufficientAssets { .. } => "INSUFFICIENT_ASSETS",
            Self::AbilityNotFound { .. } => "ABILITY_NOT_FOUND",
        }
    }
}

/// Item whose ability the fighter equips: highest base power, earliest on ties.
pub fn signature_item(items: &[OwnedItem]) -> Option<&OwnedItem> {
    items.iter().fold(None, |best: Option<&OwnedItem>, item| match best {
        Some(current) if current.base_power >= item.base_power => Some(current),
        _ => Some(item),
    })
}

/// Builds a fighter snapshot from a user's records.
///
/// Fails without producing a partial snapshot when the user owns fewer than
/// [`ArenaConfig::MIN_OWNED_ITEMS`] items or the signature item has no
/// catalogued ability.
pub fn build_fighter(
    user: &UserRecord,
    items: &[OwnedItem],
    abilities: &(impl AbilityOracle + ?Sized),
    tables: &BalanceTables,
) -> Result<Fighter, ProfileError> {
    if items.len() < ArenaConfig::MIN_OWNED_ITEMS {
        return Err(ProfileError::InsufficientAssets {
            user: user.user_id,
            owned: items.len(),
            required: ArenaConfig::MIN_OWNED_ITEMS,
        });
    }

    let signature = signature_item(items).ok_or(ProfileError::InsufficientAssets {
        user: user.user_id,
        owned: 0,
        required: ArenaConfig::MIN_OWNED_ITEMS,
    })?;
    let ability = abilities
        .ability(&signature.item_id)
        .ok_or_else(|| ProfileError::AbilityNotFound {
            item: signature.item_id.clone(),
        })?;

    let stacks = stack_items(items);
    let cp = balanced_cp(user.level, &stacks, tables).max(1);
    let health = max_health(user.level, average_rarity(&stacks, tables), tables);

    Ok(Fighter::new(
        user.user_id,
        user.username.clone(),
        user.level,
        cp,
        health,
        ability,
    ))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::fighter::Ability;

    struct Catalog(HashMap<ItemId, Ability>);

    impl AbilityOracle for Catalog {
        fn ability(&self, item: &ItemId) -> Option<Ability> {
            self.0.get(item).cloned()
        }

        fn all_abilities(&self) -> Vec<(ItemId, Ability)> {
            self.0.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
        }
    }

    fn catalog() -> Catalog {
        let mut map = HashMap::new();
        for (id, name) in [("gomu", "Gatling"), ("mera", "Fire Fist"), ("hie", "Ice Age")] {
            map.insert(ItemId::new(id), Ability::new(name, 120, 2));
        }
        Catalog(map)
    }

    fn item(id: &str, rarity: Rarity, base_power: u32) -> OwnedItem {
        OwnedItem::new(ItemId::new(id), rarity, base_power)
    }

    fn user(level: u32) -> UserRecord {
        UserRecord::new(UserId(1), "ace", level)
    }

    fn five_items() -> Vec<OwnedItem> {
        vec![
            item("gomu", Rarity::Rare, 90),
            item("mera", Rarity::Epic, 120),
            item("hie", Rarity::Epic, 120),
            item("gomu", Rarity::Rare, 90),
            item("gomu", Rarity::Rare, 90),
        ]
    }

    #[test]
    fn rejects_fewer_than_minimum_items() {
        let items = &five_items()[..4];
        let err = build_fighter(&user(10), items, &catalog(), &BalanceTables::default())
            .unwrap_err();

        assert_eq!(
            err,
            ProfileError::InsufficientAssets {
                user: UserId(1),
                owned: 4,
                required: 5,
            }
        );
        assert_eq!(err.severity(), ErrorSeverity::Validation);
    }

    #[test]
    fn signature_tie_breaks_on_first_occurrence() {
        let items = five_items();
        assert_eq!(signature_item(&items).unwrap().item_id, ItemId::new("mera"));
    }

    #[test]
    fn builds_full_health_snapshot() {
        let fighter =
            build_fighter(&user(10), &five_items(), &catalog(), &BalanceTables::default())
                .unwrap();

        assert_eq!(fighter.ability.name, "Fire Fist");
        assert_eq!(fighter.current_health, fighter.max_health);
        assert_eq!(fighter.ability_cooldown, 0);
        assert!(fighter.effects.is_empty());
        assert!(fighter.validate().is_ok());
    }

    #[test]
    fn missing_ability_aborts_construction() {
        let mut items = five_items();
        items.push(item("yami", Rarity::Mythical, 500));

        let err = build_fighter(&user(10), &items, &catalog(), &BalanceTables::default())
            .unwrap_err();
        assert_eq!(
            err,
            ProfileError::AbilityNotFound {
                item: ItemId::new("yami")
            }
        );
    }

    #[test]
    fn cp_never_decreases_as_collection_grows() {
        let tables = BalanceTables::default();
        let rarities = [Rarity::Common, Rarity::Rare, Rarity::Legendary];
        let mut items = Vec::new();
        let mut previous = 0;

        for n in 0..40u32 {
            let id = ["gomu", "mera", "hie"][(n % 3) as usize];
            items.push(item(id, rarities[(n % 3) as usize], 50 + n * 7));
            if items.len() < ArenaConfig::MIN_OWNED_ITEMS {
                continue;
            }
            let fighter = build_fighter(&user(25), &items, &catalog(), &tables).unwrap();
            assert!(fighter.balanced_cp >= previous);
            previous = fighter.balanced_cp;
        }
    }

    #[test]
    fn rarity_parses_case_insensitively() {
        use std::str::FromStr;

        assert_eq!(Rarity::from_str("Mythical"), Ok(Rarity::Mythical));
        assert_eq!(Rarity::from_str("common"), Ok(Rarity::Common));
        assert_eq!(Rarity::Legendary.to_string(), "legendary");
    }
}
