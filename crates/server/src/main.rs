//! Fruit arena server binary.
//!
//! Composition root that loads content, seeds the in-memory stores, starts
//! the arena workers and runs until Ctrl-C.
//!
//! ```bash
//! RUST_LOG=arena=debug cargo run -p arena-server
//! ```
mod config;
mod logging;

use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;

use arena_content::ContentFactory;
use arena_core::UserId;
use arena_runtime::{
    AbilityCatalog, Arena, ArenaHandle, ArenaSettings, Event, InMemoryInventoryStore,
    InMemoryUserStore, JoinOutcome, RosterNpcProvider, Topic,
};

use crate::config::ServerConfig;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = ServerConfig::from_env();
    let _log_guard = logging::setup_logging(&config.log_dir)?;

    tracing::info!("Starting fruit arena");
    tracing::info!("Data directory: {}", config.data_dir.display());

    let factory = ContentFactory::new(&config.data_dir);
    let arena_config = factory.load_config().context("loading config.toml")?;
    let abilities = AbilityCatalog::from_entries(factory.load_abilities()?);
    let roster = factory.load_npcs()?;
    let players = factory.load_players()?;
    tracing::info!(
        abilities = abilities.len(),
        npcs = roster.len(),
        players = players.len(),
        "content loaded"
    );

    let users = InMemoryUserStore::new();
    let inventory = InMemoryInventoryStore::new();
    for player in &players {
        users.insert(player.record())?;
        inventory.set_items(UserId(player.user_id), player.items.clone())?;
    }

    let mut settings = ArenaSettings::from_env();
    if std::env::var("ARENA_SEED").is_err() {
        settings.seed = SystemTime::now().duration_since(UNIX_EPOCH)?.as_nanos() as u64;
    }

    let arena = Arena::builder()
        .settings(settings)
        .config(arena_config)
        .users(users)
        .inventory(inventory)
        .abilities(abilities)
        .npcs(RosterNpcProvider::new(roster))
        .build()
        .await?;
    let handle = arena.handle();

    let event_log = spawn_event_log(&handle);

    for player in &players {
        let user = UserId(player.user_id);
        match handle.enqueue_user(user).await {
            Ok(JoinOutcome::Queued(entry)) => {
                tracing::info!(%user, cp = entry.balanced_cp(), "{} is searching", player.username);
            }
            Ok(JoinOutcome::Matched { battle_id, opponent }) => {
                tracing::info!(%user, %opponent, %battle_id, "{} matched", player.username);
            }
            Err(e) => tracing::warn!(%user, error = %e, "{} cannot queue", player.username),
        }
    }
    tracing::info!(stats = ?handle.queue_stats()?, "queue seeded");

    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutdown requested");

    event_log.abort();
    arena.shutdown().await?;
    Ok(())
}

/// Mirrors every arena event into the log as one JSON line.
fn spawn_event_log(handle: &ArenaHandle) -> JoinHandle<()> {
    let mut queue = handle.subscribe(Topic::Queue);
    let mut battle = handle.subscribe(Topic::Battle);

    tokio::spawn(async move {
        loop {
            let received = tokio::select! {
                event = queue.recv() => event,
                event = battle.recv() => event,
            };

            match received {
                Ok(event) => log_event(&event),
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "event log fell behind");
                }
                Err(RecvError::Closed) => break,
            }
        }
    })
}

fn log_event(event: &Event) {
    match serde_json::to_string(event) {
        Ok(json) => tracing::info!(target: "arena::events", topic = ?event.topic(), "{json}"),
        Err(e) => tracing::warn!(error = %e, "event could not be serialized"),
    }
}
