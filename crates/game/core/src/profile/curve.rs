//! Fairness-compression curves for CP and health.

use crate::config::{ArenaConfig, BalanceTables};

use super::OwnedItem;

const PERMILLE: u64 = ArenaConfig::PERMILLE;

/// Distinct item with the number of copies owned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ItemStack<'a> {
    pub item: &'a OwnedItem,
    pub copies: u32,
}

/// Groups owned records by item id, preserving first-occurrence order.
///
/// Rarity and base power are taken from the first record of each item.
pub fn stack_items(items: &[OwnedItem]) -> Vec<ItemStack<'_>> {
    let mut stacks: Vec<ItemStack<'_>> = Vec::new();
    for item in items {
        match stacks.iter_mut().find(|s| s.item.item_id == item.item_id) {
            Some(stack) => stack.copies += 1,
            None => stacks.push(ItemStack { item, copies: 1 }),
        }
    }
    stacks
}

/// Balanced CP of a level and an item collection.
///
/// ```text
/// item_points = Σ base_power × avg(rarity band) × (1 + duplicate_bonus × (copies - 1))
/// balanced_cp = item_points × level_factor
/// ```
pub fn balanced_cp(level: u32, stacks: &[ItemStack<'_>], tables: &BalanceTables) -> u32 {
    let item_points: u128 = stacks
        .iter()
        .map(|stack| {
            let rarity = tables.band(stack.item.rarity).average() as u128;
            let depth = PERMILLE as u128
                + tables.duplicate_bonus as u128 * (stack.copies.saturating_sub(1)) as u128;
            stack.item.base_power as u128 * rarity * depth
        })
        .sum();

    let level_factor = tables.level_factor(level) as u128;
    let cp = item_points * level_factor / (PERMILLE as u128).pow(3);
    u32::try_from(cp).unwrap_or(u32::MAX)
}

/// Mean rarity multiplier across distinct items, in per-mille.
pub fn average_rarity(stacks: &[ItemStack<'_>], tables: &BalanceTables) -> u32 {
    if stacks.is_empty() {
        return PERMILLE as u32;
    }
    let total: u64 = stacks
        .iter()
        .map(|s| tables.band(s.item.rarity).average() as u64)
        .sum();
    (total / stacks.len() as u64) as u32
}

/// Max health, square-root compressed so it grows slower than CP.
///
/// ```text
/// max_health = base_health + health_scale × sqrt(level × avg_rarity)
/// ```
pub fn max_health(level: u32, average_rarity: u32, tables: &BalanceTables) -> u32 {
    let level = level.max(1) as u64;
    // sqrt(level × rarity‰ × 1000) = sqrt(level × rarity) × 1000
    let root = (level * average_rarity as u64 * PERMILLE).isqrt();
    let bonus = tables.health_scale as u64 * root / PERMILLE;
    u32::try_from(tables.base_health as u64 + bonus).unwrap_or(u32::MAX)
}
