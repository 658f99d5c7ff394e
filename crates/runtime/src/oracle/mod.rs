//! Adapters that expose loaded content through the runtime's seams.
mod abilities;
mod npc;

pub use abilities::AbilityCatalog;
pub use npc::RosterNpcProvider;
