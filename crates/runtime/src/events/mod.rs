//! Topic-based event system for the arena.
//!
//! Queue progress and battle turns are published here so the presentation
//! layer can push updates without the core knowing about any channel.
mod bus;
mod types;

pub use bus::{Event, EventBus, Topic};
pub use types::{BattleEvent, QueueEvent};
