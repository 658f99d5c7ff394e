//! Background workers owned by [`crate::Arena`].
//!
//! Both workers only call into [`crate::ArenaHandle`]; they hold no state of
//! their own beyond their interval and cancellation token.
mod driver;
mod scheduler;

pub(crate) use driver::BattleDriver;
pub(crate) use scheduler::QueueScheduler;
