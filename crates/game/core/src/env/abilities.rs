use crate::fighter::Ability;
use crate::profile::ItemId;

/// Static lookup from an owned item to the ability it grants.
pub trait AbilityOracle: Send + Sync {
    fn ability(&self, item: &ItemId) -> Option<Ability>;

    /// Returns every catalogued ability with its item.
    fn all_abilities(&self) -> Vec<(ItemId, Ability)>;
}
