//! Matchmaking queue.
//!
//! [`MatchmakingQueue`] is a plain owned store: it never locks, spawns or
//! sleeps. The arena keeps it behind a single mutex so every join, leave and
//! match commit applies as one step, and passes the current instant in so
//! timing stays testable.
mod entry;

pub use entry::{QueueEntry, QueueStats};

use arena_core::{Fighter, UserId};
use tokio::time::Instant;

use crate::api::QueueError;
use crate::config::QueueConfig;

/// Whether `candidate_cp` lies inside the symmetric band around `requester_cp`.
pub fn within_tolerance(requester_cp: u32, candidate_cp: u32, tolerance_pct: u32) -> bool {
    let gap = candidate_cp.abs_diff(requester_cp) as u64 * 100;
    gap <= requester_cp as u64 * tolerance_pct as u64
}

#[derive(Debug)]
pub struct MatchmakingQueue {
    config: QueueConfig,
    entries: Vec<QueueEntry>,
}

impl MatchmakingQueue {
    pub fn new(config: QueueConfig) -> Self {
        Self {
            config,
            entries: Vec::new(),
        }
    }

    pub fn config(&self) -> &QueueConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, user: UserId) -> bool {
        self.position(user).is_some()
    }

    pub fn entries(&self) -> &[QueueEntry] {
        &self.entries
    }

    /// Enqueues `fighter` unless a rejection applies.
    ///
    /// Rejections are checked in order: live battle, duplicate, capacity.
    pub fn join(
        &mut self,
        fighter: Fighter,
        now: Instant,
        in_battle: bool,
    ) -> Result<QueueEntry, QueueError> {
        let user = fighter.user_id;
        if in_battle {
            return Err(QueueError::AlreadyInBattle(user));
        }
        if self.contains(user) {
            return Err(QueueError::AlreadyQueued(user));
        }
        if self.entries.len() >= self.config.capacity {
            return Err(QueueError::QueueFull {
                capacity: self.config.capacity,
            });
        }

        let entry = QueueEntry::new(fighter, now, self.config.search_window);
        self.entries.push(entry.clone());
        Ok(entry)
    }

    pub fn leave(&mut self, user: UserId) -> Result<QueueEntry, QueueError> {
        self.remove(user).ok_or(QueueError::NotQueued(user))
    }

    pub fn remove(&mut self, user: UserId) -> Option<QueueEntry> {
        self.position(user).map(|index| self.entries.remove(index))
    }

    /// First entry, in queue order, whose CP lies in the requester's band.
    ///
    /// The requester's own entry is skipped. This is first-fit, not best-fit.
    pub fn find_match(&self, fighter: &Fighter) -> Option<&QueueEntry> {
        self.entries.iter().find(|entry| {
            entry.user_id() != fighter.user_id
                && within_tolerance(
                    fighter.balanced_cp,
                    entry.balanced_cp(),
                    self.config.tolerance_pct,
                )
        })
    }

    /// Removes both entries, or neither if either is missing.
    pub fn take_pair(&mut self, a: UserId, b: UserId) -> Option<(QueueEntry, QueueEntry)> {
        if a == b || !self.contains(a) || !self.contains(b) {
            return None;
        }
        let first = self.remove(a)?;
        let second = self.remove(b)?;
        Some((first, second))
    }

    /// First pairing found by re-attempting every waiting entry in queue
    /// order. The requester comes first. Nothing is removed.
    pub fn next_match(&self) -> Option<(Fighter, Fighter)> {
        self.entries.iter().find_map(|entry| {
            self.find_match(&entry.fighter)
                .map(|opponent| (entry.fighter.clone(), opponent.fighter.clone()))
        })
    }

    /// Entries whose search deadline has passed, in queue order.
    pub fn overdue(&self, now: Instant) -> Vec<QueueEntry> {
        self.entries
            .iter()
            .filter(|entry| entry.is_overdue(now))
            .cloned()
            .collect()
    }

    pub fn stats(&self) -> QueueStats {
        let capacity = self.config.capacity;
        if self.entries.is_empty() {
            return QueueStats {
                capacity,
                ..QueueStats::default()
            };
        }

        let cps = self.entries.iter().map(QueueEntry::balanced_cp);
        let total: u64 = cps.clone().map(u64::from).sum();
        let avg = total / self.entries.len() as u64;

        QueueStats {
            size: self.entries.len(),
            capacity,
            avg_cp: u32::try_from(avg).unwrap_or(u32::MAX),
            min_cp: cps.clone().min().unwrap_or_default(),
            max_cp: cps.max().unwrap_or_default(),
        }
    }

    fn position(&self, user: UserId) -> Option<usize> {
        self.entries.iter().position(|entry| entry.user_id() == user)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use arena_core::Ability;

    use super::*;

    fn fighter(id: u64, cp: u32) -> Fighter {
        Fighter::new(UserId(id), format!("user{id}"), 10, cp, 500, Ability::new("Jab", 50, 1))
    }

    fn queue(capacity: usize) -> MatchmakingQueue {
        MatchmakingQueue::new(QueueConfig {
            capacity,
            ..QueueConfig::default()
        })
    }

    #[test]
    fn tolerance_band_is_inclusive() {
        assert!(within_tolerance(1000, 1300, 30));
        assert!(within_tolerance(1000, 700, 30));
        assert!(!within_tolerance(1000, 1301, 30));
        assert!(!within_tolerance(1000, 699, 30));
    }

    #[test]
    fn join_rejections_leave_queue_untouched() {
        let now = Instant::now();
        let mut queue = queue(2);
        queue.join(fighter(1, 100), now, false).unwrap();

        assert_eq!(
            queue.join(fighter(1, 100), now, false),
            Err(QueueError::AlreadyQueued(UserId(1)))
        );
        assert_eq!(
            queue.join(fighter(2, 100), now, true),
            Err(QueueError::AlreadyInBattle(UserId(2)))
        );

        queue.join(fighter(2, 5000), now, false).unwrap();
        assert_eq!(
            queue.join(fighter(3, 100), now, false),
            Err(QueueError::QueueFull { capacity: 2 })
        );
        assert_eq!(queue.len(), 2);
    }

    #[test]
    fn entry_deadline_follows_search_window() {
        let now = Instant::now();
        let mut queue = queue(4);
        let entry = queue.join(fighter(1, 100), now, false).unwrap();

        assert_eq!(entry.search_deadline, now + QueueConfig::DEFAULT_SEARCH_WINDOW);
        assert!(!entry.is_overdue(now + Duration::from_secs(119)));
        assert!(entry.is_overdue(now + Duration::from_secs(120)));
    }

    #[test]
    fn find_match_is_first_fit_and_skips_self() {
        let now = Instant::now();
        let mut queue = queue(4);
        queue.join(fighter(1, 1000), now, false).unwrap();
        queue.join(fighter(2, 1500), now, false).unwrap();

        // 1500 is the closer CP but 1000 was queued first.
        let requester = fighter(3, 1300);
        assert_eq!(queue.find_match(&requester).map(QueueEntry::user_id), Some(UserId(1)));

        let own = fighter(1, 1000);
        assert_eq!(queue.find_match(&own), None);
    }

    #[test]
    fn take_pair_is_all_or_nothing() {
        let now = Instant::now();
        let mut queue = queue(4);
        queue.join(fighter(1, 100), now, false).unwrap();

        assert!(queue.take_pair(UserId(1), UserId(9)).is_none());
        assert!(queue.contains(UserId(1)));
    }

    #[test]
    fn next_match_scans_in_queue_order() {
        let now = Instant::now();
        let mut queue = queue(8);
        for (id, cp) in [(1, 100), (2, 5000), (3, 110), (4, 5200), (5, 90_000)] {
            queue.join(fighter(id, cp), now, false).unwrap();
        }

        let mut pairs = Vec::new();
        while let Some((a, b)) = queue.next_match() {
            queue.take_pair(a.user_id, b.user_id).unwrap();
            pairs.push((a.user_id, b.user_id));
        }

        assert_eq!(pairs, vec![(UserId(1), UserId(3)), (UserId(2), UserId(4))]);
        assert_eq!(queue.len(), 1);
        assert!(queue.contains(UserId(5)));
    }

    #[test]
    fn stats_summarise_entries() {
        let now = Instant::now();
        let mut queue = queue(20);
        assert_eq!(
            queue.stats(),
            QueueStats {
                size: 0,
                capacity: 20,
                avg_cp: 0,
                min_cp: 0,
                max_cp: 0
            }
        );

        for (id, cp) in [(1, 100), (2, 400), (3, 1000)] {
            queue.join(fighter(id, cp), now, false).unwrap();
        }
        let stats = queue.stats();
        assert_eq!(stats.size, 3);
        assert_eq!(stats.avg_cp, 500);
        assert_eq!(stats.min_cp, 100);
        assert_eq!(stats.max_cp, 1000);
    }
}
