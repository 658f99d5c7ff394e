//! Asynchronous abstractions over the collaborators the arena consumes.
//!
//! User profiles, inventories and fallback opponents live outside this
//! crate. Implementations may hit a database, a remote service or the
//! in-memory adapters from [`crate::repository`].
use async_trait::async_trait;

use arena_core::{Fighter, OwnedItem, UserId, UserRecord};

use super::errors::StoreError;

/// Source of user profile records.
#[async_trait]
pub trait UserProfileStore: Send + Sync {
    async fn get_user(&self, user: UserId) -> Result<UserRecord, StoreError>;
}

/// Source of the items a user owns.
#[async_trait]
pub trait InventoryStore: Send + Sync {
    /// Returns every owned item, duplicates included.
    async fn owned_items(&self, user: UserId) -> Result<Vec<OwnedItem>, StoreError>;
}

/// Supplier of synthetic opponents for queue entries whose search expired.
#[async_trait]
pub trait NpcProvider: Send + Sync {
    /// Returns a fresh fighter whose balanced CP is close to `target_cp`.
    ///
    /// The snapshot must carry a user id that no real player uses.
    async fn fallback_opponent(&self, target_cp: u32) -> Result<Fighter, StoreError>;
}
