//! Runtime settings and their environment loaders.
use std::env;
use std::time::Duration;

/// Matchmaking queue tuning.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueueConfig {
    pub capacity: usize,
    /// How long an entry searches before it is paired with an NPC.
    pub search_window: Duration,
    /// Symmetric CP band around the requester, in percent.
    pub tolerance_pct: u32,
    /// Period of the scheduler that re-attempts matching.
    pub tick_interval: Duration,
}

impl QueueConfig {
    pub const DEFAULT_CAPACITY: usize = 20;
    pub const DEFAULT_SEARCH_WINDOW: Duration = Duration::from_secs(120);
    pub const DEFAULT_TOLERANCE_PCT: u32 = 30;
    pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_secs(10);
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            capacity: Self::DEFAULT_CAPACITY,
            search_window: Self::DEFAULT_SEARCH_WINDOW,
            tolerance_pct: Self::DEFAULT_TOLERANCE_PCT,
            tick_interval: Self::DEFAULT_TICK_INTERVAL,
        }
    }
}

/// Pacing of queue-originated battles.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DriverConfig {
    pub turn_interval: Duration,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            turn_interval: Duration::from_secs(2),
        }
    }
}

/// Settings shared by the arena and its workers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArenaSettings {
    pub queue: QueueConfig,
    pub driver: DriverConfig,
    pub event_buffer_size: usize,
    /// Overrides the loaded battle rules when set.
    pub turn_cap: Option<u32>,
    /// Root from which every battle seed is derived.
    pub seed: u64,
    /// Spawn the scheduler and driver workers on build.
    pub enable_workers: bool,
}

impl Default for ArenaSettings {
    fn default() -> Self {
        Self {
            queue: QueueConfig::default(),
            driver: DriverConfig::default(),
            event_buffer_size: 100,
            turn_cap: None,
            seed: 0,
            enable_workers: true,
        }
    }
}

impl ArenaSettings {
    /// Construct settings from process environment variables.
    ///
    /// Environment variables:
    /// - `ARENA_QUEUE_CAPACITY` - Maximum queued entries (default: 20)
    /// - `ARENA_SEARCH_WINDOW_SECS` - Search window before NPC fallback (default: 120)
    /// - `ARENA_MATCH_TOLERANCE_PCT` - CP tolerance band in percent (default: 30)
    /// - `ARENA_TICK_INTERVAL_SECS` - Scheduler period (default: 10)
    /// - `ARENA_TURN_INTERVAL_SECS` - Driver period per battle turn (default: 2)
    /// - `ARENA_TURN_CAP` - Overrides the configured turn cap
    /// - `ARENA_SEED` - Root battle seed (default: 0)
    /// - `ARENA_EVENT_BUFFER` - Event bus capacity per topic (default: 100)
    pub fn from_env() -> Self {
        let mut settings = Self::default();

        if let Some(capacity) = read_env::<usize>("ARENA_QUEUE_CAPACITY") {
            settings.queue.capacity = capacity.max(1);
        }
        if let Some(secs) = read_env::<u64>("ARENA_SEARCH_WINDOW_SECS") {
            settings.queue.search_window = Duration::from_secs(secs);
        }
        if let Some(pct) = read_env::<u32>("ARENA_MATCH_TOLERANCE_PCT") {
            settings.queue.tolerance_pct = pct;
        }
        if let Some(secs) = read_env::<u64>("ARENA_TICK_INTERVAL_SECS") {
            settings.queue.tick_interval = Duration::from_secs(secs.max(1));
        }
        if let Some(secs) = read_env::<u64>("ARENA_TURN_INTERVAL_SECS") {
            settings.driver.turn_interval = Duration::from_secs(secs.max(1));
        }
        if let Some(capacity) = read_env::<usize>("ARENA_EVENT_BUFFER") {
            settings.event_buffer_size = capacity.max(1);
        }

        settings.turn_cap = read_env::<u32>("ARENA_TURN_CAP").map(|cap| cap.max(1));
        settings.seed = read_env::<u64>("ARENA_SEED").unwrap_or_default();

        settings
    }

    pub fn with_workers(mut self, enable: bool) -> Self {
        self.enable_workers = enable;
        self
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
