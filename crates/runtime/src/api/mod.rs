//! Public runtime API surface.
//!
//! Re-exports the handle, the error taxonomy and the store traits so that
//! downstream crates can depend on a single module.
mod errors;
mod handle;
mod stores;

pub use errors::{QueueError, Result, RuntimeError, StoreError};
pub use handle::{ArenaHandle, Challenge, JoinOutcome, TickReport};
pub use stores::{InventoryStore, NpcProvider, UserProfileStore};

pub(crate) use handle::ArenaInner;
