#![allow(dead_code)]

use arena_content::{NpcRoster, NpcTemplate};
use arena_core::{Ability, ArenaConfig, Fighter, UserId};
use arena_runtime::{
    AbilityCatalog, Arena, ArenaSettings, Event, InMemoryInventoryStore, InMemoryUserStore,
    RosterNpcProvider,
};
use tokio::sync::broadcast;

pub fn fighter(id: u64, cp: u32) -> Fighter {
    Fighter::new(UserId(id), format!("pirate{id}"), 20, cp, 400, Ability::new("Pistol", 150, 1))
}

pub fn roster() -> NpcRoster {
    NpcRoster::new(vec![NpcTemplate {
        name: "Marine Captain".to_string(),
        level: 20,
        balanced_cp: 500,
        max_health: 500,
        ability: Ability::new("Iron Fist", 120, 1),
    }])
}

/// Arena with empty stores and no background workers.
pub async fn arena(settings: ArenaSettings) -> Arena {
    arena_with_stores(
        settings.with_workers(false),
        InMemoryUserStore::new(),
        InMemoryInventoryStore::new(),
        AbilityCatalog::new(),
    )
    .await
}

/// Arena with empty stores; workers follow `settings`.
pub async fn running_arena(settings: ArenaSettings) -> Arena {
    arena_with_stores(
        settings,
        InMemoryUserStore::new(),
        InMemoryInventoryStore::new(),
        AbilityCatalog::new(),
    )
    .await
}

pub async fn arena_with_stores(
    settings: ArenaSettings,
    users: InMemoryUserStore,
    inventory: InMemoryInventoryStore,
    abilities: AbilityCatalog,
) -> Arena {
    Arena::builder()
        .settings(settings)
        .config(ArenaConfig::default())
        .users(users)
        .inventory(inventory)
        .abilities(abilities)
        .npcs(RosterNpcProvider::new(roster()))
        .build()
        .await
        .unwrap()
}

/// Every event already published on `rx`.
pub fn drain(rx: &mut broadcast::Receiver<Event>) -> Vec<Event> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}
