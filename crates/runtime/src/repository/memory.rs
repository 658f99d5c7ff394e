use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use arena_core::{OwnedItem, UserId, UserRecord};

use crate::api::{InventoryStore, StoreError, UserProfileStore};

fn poisoned() -> StoreError {
    StoreError::Unavailable("store lock was poisoned".to_string())
}

/// In-memory user profile store.
#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    users: RwLock<HashMap<UserId, UserRecord>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, record: UserRecord) -> Result<(), StoreError> {
        let mut users = self.users.write().map_err(|_| poisoned())?;
        users.insert(record.user_id, record);
        Ok(())
    }
}

#[async_trait]
impl UserProfileStore for InMemoryUserStore {
    async fn get_user(&self, user: UserId) -> Result<UserRecord, StoreError> {
        let users = self.users.read().map_err(|_| poisoned())?;
        users.get(&user).cloned().ok_or(StoreError::UserNotFound(user))
    }
}

/// In-memory inventory store. Unknown users own nothing.
#[derive(Debug, Default)]
pub struct InMemoryInventoryStore {
    items: RwLock<HashMap<UserId, Vec<OwnedItem>>>,
}

impl InMemoryInventoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the full collection of `user`.
    pub fn set_items(&self, user: UserId, items: Vec<OwnedItem>) -> Result<(), StoreError> {
        let mut all = self.items.write().map_err(|_| poisoned())?;
        all.insert(user, items);
        Ok(())
    }

    pub fn grant(&self, user: UserId, item: OwnedItem) -> Result<(), StoreError> {
        let mut all = self.items.write().map_err(|_| poisoned())?;
        all.entry(user).or_default().push(item);
        Ok(())
    }
}

#[async_trait]
impl InventoryStore for InMemoryInventoryStore {
    async fn owned_items(&self, user: UserId) -> Result<Vec<OwnedItem>, StoreError> {
        let all = self.items.read().map_err(|_| poisoned())?;
        Ok(all.get(&user).cloned().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use arena_core::{ItemId, Rarity};

    use super::*;

    #[tokio::test]
    async fn user_store_round_trip() {
        let store = InMemoryUserStore::new();
        store.insert(UserRecord::new(UserId(1), "nami", 30)).unwrap();

        assert_eq!(store.get_user(UserId(1)).await.unwrap().username, "nami");
        assert_eq!(
            store.get_user(UserId(2)).await,
            Err(StoreError::UserNotFound(UserId(2)))
        );
    }

    #[tokio::test]
    async fn inventory_grants_accumulate() {
        let store = InMemoryInventoryStore::new();
        let item = OwnedItem::new(ItemId::new("hana_hana"), Rarity::Rare, 80);
        store.grant(UserId(1), item.clone()).unwrap();
        store.grant(UserId(1), item.clone()).unwrap();

        assert_eq!(store.owned_items(UserId(1)).await.unwrap(), vec![item.clone(), item]);
        assert!(store.owned_items(UserId(9)).await.unwrap().is_empty());
    }
}
