use std::time::Duration;

use tokio::time::{self, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

use crate::api::ArenaHandle;

/// Advances every queue-originated battle one turn per period.
pub(crate) struct BattleDriver {
    handle: ArenaHandle,
    period: Duration,
    cancel: CancellationToken,
}

impl BattleDriver {
    pub(crate) fn new(handle: ArenaHandle, period: Duration, cancel: CancellationToken) -> Self {
        Self {
            handle,
            // `interval` rejects a zero period.
            period: period.max(Duration::from_millis(1)),
            cancel,
        }
    }

    pub(crate) async fn run(self) {
        let mut interval = time::interval(self.period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        interval.tick().await;

        info!(target: "arena::battle", period = ?self.period, "battle driver started");
        loop {
            tokio::select! {
                _ = self.cancel.cancelled() => break,
                _ = interval.tick() => {
                    match self.handle.drive_battles() {
                        Ok(0) => {}
                        Ok(advanced) => {
                            debug!(target: "arena::battle", advanced, "battles advanced")
                        }
                        Err(e) => {
                            error!(target: "arena::battle", error = %e, "battle drive failed")
                        }
                    }
                }
            }
        }
        debug!(target: "arena::battle", "battle driver stopped");
    }
}
