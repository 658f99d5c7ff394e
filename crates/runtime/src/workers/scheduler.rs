use std::time::Duration;

use tokio::time::{self, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

use crate::api::ArenaHandle;

/// Periodically re-attempts matching and expires overdue entries.
pub(crate) struct QueueScheduler {
    handle: ArenaHandle,
    period: Duration,
    cancel: CancellationToken,
}

impl QueueScheduler {
    pub(crate) fn new(handle: ArenaHandle, period: Duration, cancel: CancellationToken) -> Self {
        Self {
            handle,
            // `interval` rejects a zero period.
            period: period.max(Duration::from_millis(1)),
            cancel,
        }
    }

    /// Main worker loop.
    pub(crate) async fn run(self) {
        let mut interval = time::interval(self.period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        // The first tick completes immediately.
        interval.tick().await;

        info!(target: "arena::scheduler", period = ?self.period, "queue scheduler started");
        loop {
            tokio::select! {
                _ = self.cancel.cancelled() => break,
                _ = interval.tick() => {
                    if let Err(e) = self.handle.tick_queue().await {
                        error!(target: "arena::scheduler", error = %e, "queue tick failed");
                    }
                }
            }
        }
        debug!(target: "arena::scheduler", "queue scheduler stopped");
    }
}
