//! Fighter construction from external stores.
use std::sync::Arc;

use arena_core::{AbilityOracle, BalanceTables, Fighter, UserId, build_fighter};
use tracing::{debug, warn};

use crate::api::{InventoryStore, Result, UserProfileStore};

/// Fetches a user's records and normalizes them into a fighter snapshot.
///
/// Any failed fetch aborts the whole construction.
#[derive(Clone)]
pub struct FighterService {
    users: Arc<dyn UserProfileStore>,
    inventory: Arc<dyn InventoryStore>,
    abilities: Arc<dyn AbilityOracle>,
    tables: BalanceTables,
}

impl FighterService {
    pub fn new(
        users: Arc<dyn UserProfileStore>,
        inventory: Arc<dyn InventoryStore>,
        abilities: Arc<dyn AbilityOracle>,
        tables: BalanceTables,
    ) -> Self {
        Self {
            users,
            inventory,
            abilities,
            tables,
        }
    }

    pub fn tables(&self) -> &BalanceTables {
        &self.tables
    }

    pub async fn build(&self, user: UserId) -> Result<Fighter> {
        let record = self.users.get_user(user).await.inspect_err(|e| {
            warn!(target: "arena::profile", %user, error = %e, "user lookup failed");
        })?;
        let items = self.inventory.owned_items(user).await.inspect_err(|e| {
            warn!(target: "arena::profile", %user, error = %e, "inventory lookup failed");
        })?;

        let fighter = build_fighter(&record, &items, self.abilities.as_ref(), &self.tables)
            .inspect_err(|e| {
                debug!(target: "arena::profile", %user, error = %e, "fighter rejected");
            })?;

        debug!(
            target: "arena::profile",
            %user,
            cp = fighter.balanced_cp,
            health = fighter.max_health,
            ability = %fighter.ability.name,
            "fighter built"
        );
        Ok(fighter)
    }
}
