//! Arena owner and builder.
//!
//! The arena owns the background workers and the cancellation token that
//! stops them. [`ArenaHandle`] provides a cloneable façade for clients.

use std::sync::atomic::AtomicU64;
use std::sync::{Arc, Mutex};

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::info;

use arena_core::{AbilityOracle, ArenaConfig};

use crate::api::{
    ArenaHandle, ArenaInner, InventoryStore, NpcProvider, Result, RuntimeError, UserProfileStore,
};
use crate::battles::BattleRegistry;
use crate::config::ArenaSettings;
use crate::events::EventBus;
use crate::profile::FighterService;
use crate::queue::MatchmakingQueue;
use crate::workers::{BattleDriver, QueueScheduler};

/// Running arena with its background workers.
pub struct Arena {
    handle: ArenaHandle,
    cancel: CancellationToken,
    workers: Vec<JoinHandle<()>>,
}

impl Arena {
    /// Create a new arena builder
    pub fn builder() -> ArenaBuilder {
        ArenaBuilder::new()
    }

    /// Get a cloneable handle to this arena
    pub fn handle(&self) -> ArenaHandle {
        self.handle.clone()
    }

    /// Stops the workers and waits for them to finish.
    ///
    /// Queued entries and live battles are dropped with the arena.
    pub async fn shutdown(self) -> Result<()> {
        self.cancel.cancel();
        for worker in self.workers {
            worker.await.map_err(RuntimeError::WorkerJoin)?;
        }
        info!(target: "arena::scheduler", "arena shut down");
        Ok(())
    }
}

/// Builder for [`Arena`].
pub struct ArenaBuilder {
    settings: ArenaSettings,
    config: ArenaConfig,
    users: Option<Arc<dyn UserProfileStore>>,
    inventory: Option<Arc<dyn InventoryStore>>,
    abilities: Option<Arc<dyn AbilityOracle>>,
    npcs: Option<Arc<dyn NpcProvider>>,
}

impl ArenaBuilder {
    fn new() -> Self {
        Self {
            settings: ArenaSettings::default(),
            config: ArenaConfig::default(),
            users: None,
            inventory: None,
            abilities: None,
            npcs: None,
        }
    }

    /// Override runtime settings
    pub fn settings(mut self, settings: ArenaSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Battle rules and balance tables, usually loaded from `config.toml`
    pub fn config(mut self, config: ArenaConfig) -> Self {
        self.config = config;
        self
    }

    pub fn users(mut self, store: impl UserProfileStore + 'static) -> Self {
        self.users = Some(Arc::new(store));
        self
    }

    pub fn inventory(mut self, store: impl InventoryStore + 'static) -> Self {
        self.inventory = Some(Arc::new(store));
        self
    }

    pub fn abilities(mut self, oracle: impl AbilityOracle + 'static) -> Self {
        self.abilities = Some(Arc::new(oracle));
        self
    }

    pub fn npcs(mut self, provider: impl NpcProvider + 'static) -> Self {
        self.npcs = Some(Arc::new(provider));
        self
    }

    /// Spawn the scheduler and driver workers (default: true)
    pub fn enable_workers(mut self, enable: bool) -> Self {
        self.settings.enable_workers = enable;
        self
    }

    /// Build the arena
    ///
    /// Fails with [`RuntimeError::MissingStores`] unless every store was set.
    pub async fn build(self) -> Result<Arena> {
        let (Some(users), Some(inventory), Some(abilities), Some(npcs)) =
            (self.users, self.inventory, self.abilities, self.npcs)
        else {
            return Err(RuntimeError::MissingStores);
        };

        let mut rules = self.config.battle;
        if let Some(turn_cap) = self.settings.turn_cap {
            rules.turn_cap = turn_cap;
        }

        let settings = self.settings;
        let inner = ArenaInner {
            rules,
            fighters: FighterService::new(users, inventory, abilities, self.config.balance),
            npcs,
            queue: Mutex::new(MatchmakingQueue::new(settings.queue.clone())),
            battles: Mutex::new(BattleRegistry::new()),
            events: EventBus::with_capacity(settings.event_buffer_size),
            battle_counter: AtomicU64::new(0),
            settings,
        };
        let handle = ArenaHandle::new(Arc::new(inner));

        let cancel = CancellationToken::new();
        let mut workers = Vec::new();

        if handle.settings().enable_workers {
            let scheduler = QueueScheduler::new(
                handle.clone(),
                handle.settings().queue.tick_interval,
                cancel.child_token(),
            );
            workers.push(tokio::spawn(scheduler.run()));

            let driver = BattleDriver::new(
                handle.clone(),
                handle.settings().driver.turn_interval,
                cancel.child_token(),
            );
            workers.push(tokio::spawn(driver.run()));
        }

        info!(
            target: "arena::scheduler",
            capacity = handle.settings().queue.capacity,
            turn_cap = rules.turn_cap,
            workers = workers.len(),
            "arena built"
        );

        Ok(Arena {
            handle,
            cancel,
            workers,
        })
    }
}
