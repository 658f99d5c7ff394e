//! Store implementations that keep everything in process memory.
//!
//! Useful for tests and the local server; not persistent across restarts.
mod memory;

pub use memory::{InMemoryInventoryStore, InMemoryUserStore};
