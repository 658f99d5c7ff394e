use std::time::Duration;

use arena_core::{Fighter, UserId};
use serde::{Deserialize, Serialize};
use tokio::time::Instant;

/// A fighter waiting for an opponent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueueEntry {
    pub fighter: Fighter,
    pub enqueued_at: Instant,
    pub search_deadline: Instant,
}

impl QueueEntry {
    pub fn new(fighter: Fighter, now: Instant, search_window: Duration) -> Self {
        Self {
            fighter,
            enqueued_at: now,
            search_deadline: now + search_window,
        }
    }

    pub fn user_id(&self) -> UserId {
        self.fighter.user_id
    }

    pub fn balanced_cp(&self) -> u32 {
        self.fighter.balanced_cp
    }

    pub fn waited(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.enqueued_at)
    }

    pub fn remaining(&self, now: Instant) -> Duration {
        self.search_deadline.saturating_duration_since(now)
    }

    pub fn is_overdue(&self, now: Instant) -> bool {
        now >= self.search_deadline
    }
}

/// Aggregate view of the queue. All CP fields are zero when empty.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueStats {
    pub size: usize,
    pub capacity: usize,
    pub avg_cp: u32,
    pub min_cp: u32,
    pub max_cp: u32,
}
