//! Async orchestration for the fruit arena.
//!
//! This crate wires the deterministic rules from `arena-core` to external
//! stores, the matchmaking queue, the live battle registry and background
//! workers. Consumers build an [`Arena`] and interact with it through the
//! cloneable [`ArenaHandle`].
//!
//! Modules are organized by responsibility:
//! - [`arena`] hosts the owner of the workers and its builder
//! - [`api`] exposes the handle, errors and store traits
//! - [`queue`] and [`battles`] are the explicitly owned shared stores
//! - [`events`] provides the topic-based event bus
//! - [`oracle`] and [`repository`] provide adapters for content and tests
pub mod api;
pub mod arena;
pub mod battles;
pub mod config;
pub mod events;
pub mod oracle;
pub mod profile;
pub mod queue;
pub mod repository;

mod workers;

pub use api::{
    ArenaHandle, Challenge, InventoryStore, JoinOutcome, NpcProvider, QueueError, Result,
    RuntimeError, StoreError, TickReport, UserProfileStore,
};
pub use arena::{Arena, ArenaBuilder};
pub use battles::{BattleId, BattleOrigin, BattleRegistry};
pub use config::{ArenaSettings, DriverConfig, QueueConfig};
pub use events::{BattleEvent, Event, EventBus, QueueEvent, Topic};
pub use oracle::{AbilityCatalog, RosterNpcProvider};
pub use profile::FighterService;
pub use queue::{MatchmakingQueue, QueueEntry, QueueStats, within_tolerance};
pub use repository::{InMemoryInventoryStore, InMemoryUserStore};
