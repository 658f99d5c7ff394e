//! Cloneable façade over the arena's shared stores.
//!
//! [`ArenaHandle`] owns no tasks. Every method locks the queue before the
//! battle registry and never holds either lock across an `.await`.
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use tokio::sync::broadcast;
use tokio::time::Instant;
use tracing::{debug, error, info, warn};

use arena_core::{
    BalanceReport, Battle, BattleConfig, BattleError, BattleResult, Fighter, Side, TurnAdvance,
    UserId, compute_seed, context, simulate, validate_balance,
};

use super::errors::{QueueError, Result, RuntimeError};
use super::stores::NpcProvider;
use crate::battles::{BattleId, BattleOrigin, BattleRegistry};
use crate::config::ArenaSettings;
use crate::events::{BattleEvent, Event, EventBus, QueueEvent, Topic};
use crate::profile::FighterService;
use crate::queue::{MatchmakingQueue, QueueEntry, QueueStats};

/// Result of a successful join.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum JoinOutcome {
    /// No opponent in range yet; the entry waits for the scheduler.
    Queued(QueueEntry),
    /// Matched on arrival; both entries left the queue.
    Matched {
        battle_id: BattleId,
        opponent: UserId,
    },
}

/// A one-shot battle together with its advisory balance report.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Challenge {
    pub report: BalanceReport,
    pub result: BattleResult,
}

/// Summary of one scheduler pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    pub matched: usize,
    pub timed_out: usize,
    pub waiting: usize,
}

pub(crate) struct ArenaInner {
    pub(crate) settings: ArenaSettings,
    pub(crate) rules: BattleConfig,
    pub(crate) fighters: FighterService,
    pub(crate) npcs: Arc<dyn NpcProvider>,
    pub(crate) queue: Mutex<MatchmakingQueue>,
    pub(crate) battles: Mutex<BattleRegistry>,
    pub(crate) events: EventBus,
    pub(crate) battle_counter: AtomicU64,
}

impl ArenaInner {
    fn lock_queue(&self) -> Result<MutexGuard<'_, MatchmakingQueue>> {
        self.queue.lock().map_err(|_| RuntimeError::LockPoisoned)
    }

    fn lock_battles(&self) -> Result<MutexGuard<'_, BattleRegistry>> {
        self.battles.lock().map_err(|_| RuntimeError::LockPoisoned)
    }

    fn next_seed(&self) -> u64 {
        let nonce = self.battle_counter.fetch_add(1, Ordering::Relaxed);
        compute_seed(self.settings.seed.wrapping_add(nonce), 0, context::BATTLE)
    }

    /// Builds the battle first, then removes both entries and registers it.
    fn commit_match(
        &self,
        queue: &mut MatchmakingQueue,
        battles: &mut BattleRegistry,
        requester: Fighter,
        opponent: Fighter,
        events: &mut Vec<Event>,
    ) -> Result<BattleId> {
        let battle = Battle::new(requester, opponent, self.next_seed(), self.rules)?;
        let participants = battle.participants();
        queue
            .take_pair(participants[0], participants[1])
            .ok_or(QueueError::NotQueued(participants[1]))?;

        let battle_id = battles.insert(battle, BattleOrigin::Matchmaking);
        info!(
            target: "arena::queue",
            %battle_id,
            a = %participants[0],
            b = %participants[1],
            "match committed"
        );

        events.push(
            QueueEvent::Matched {
                battle_id,
                participants,
            }
            .into(),
        );
        events.push(
            BattleEvent::Started {
                battle_id,
                origin: BattleOrigin::Matchmaking,
                participants,
            }
            .into(),
        );
        Ok(battle_id)
    }

    fn publish_all(&self, events: Vec<Event>) {
        for event in events {
            self.events.publish(event);
        }
    }
}

/// Client-facing handle to interact with the arena
#[derive(Clone)]
pub struct ArenaHandle {
    inner: Arc<ArenaInner>,
}

impl ArenaHandle {
    pub(crate) fn new(inner: Arc<ArenaInner>) -> Self {
        Self { inner }
    }

    pub fn settings(&self) -> &ArenaSettings {
        &self.inner.settings
    }

    pub fn rules(&self) -> &BattleConfig {
        &self.inner.rules
    }

    /// Builds a fighter snapshot for `user` from the external stores.
    pub async fn build_fighter(&self, user: UserId) -> Result<Fighter> {
        self.inner.fighters.build(user).await
    }

    /// Enqueues a fighter and immediately tries to match it.
    ///
    /// Rejections leave the queue unchanged.
    pub fn join_queue(&self, fighter: Fighter) -> Result<JoinOutcome> {
        let user = fighter.user_id;
        fighter
            .validate()
            .map_err(|reason| BattleError::InvalidFighter {
                side: Side::A,
                reason,
            })?;

        let now = Instant::now();
        let mut events = Vec::new();

        let outcome = {
            let mut queue = self.inner.lock_queue()?;
            let mut battles = self.inner.lock_battles()?;

            let entry = queue
                .join(fighter, now, battles.contains_user(user))
                .inspect_err(|e| {
                    debug!(target: "arena::queue", %user, error = %e, "join rejected");
                })?;

            info!(
                target: "arena::queue",
                %user,
                cp = entry.balanced_cp(),
                size = queue.len(),
                "joined queue"
            );
            events.push(
                QueueEvent::Joined {
                    user,
                    balanced_cp: entry.balanced_cp(),
                    queue_size: queue.len(),
                }
                .into(),
            );

            let opponent = queue.find_match(&entry.fighter).map(|e| e.fighter.clone());
            match opponent {
                Some(opponent) => {
                    let opponent_id = opponent.user_id;
                    let committed = self.inner.commit_match(
                        &mut queue,
                        &mut battles,
                        entry.fighter,
                        opponent,
                        &mut events,
                    );
                    match committed {
                        Ok(battle_id) => JoinOutcome::Matched {
                            battle_id,
                            opponent: opponent_id,
                        },
                        Err(e) => {
                            queue.remove(user);
                            warn!(target: "arena::queue", %user, error = %e, "match rejected");
                            return Err(e);
                        }
                    }
                }
                None => JoinOutcome::Queued(entry),
            }
        };

        self.inner.publish_all(events);
        Ok(outcome)
    }

    /// Builds the fighter for `user` and joins the queue with it.
    pub async fn enqueue_user(&self, user: UserId) -> Result<JoinOutcome> {
        let fighter = self.build_fighter(user).await?;
        self.join_queue(fighter)
    }

    /// Withdraws a queued entry before it is matched.
    pub fn leave_queue(&self, user: UserId) -> Result<QueueEntry> {
        let entry = self
            .inner
            .lock_queue()?
            .leave(user)
            .inspect_err(|e| {
                debug!(target: "arena::queue", %user, error = %e, "leave rejected");
            })?;

        info!(target: "arena::queue", %user, "left queue");
        self.inner.events.publish(QueueEvent::Left { user });
        Ok(entry)
    }

    pub fn is_queued(&self, user: UserId) -> Result<bool> {
        Ok(self.inner.lock_queue()?.contains(user))
    }

    /// Users currently waiting, in queue order.
    pub fn queued_users(&self) -> Result<Vec<UserId>> {
        Ok(self
            .inner
            .lock_queue()?
            .entries()
            .iter()
            .map(QueueEntry::user_id)
            .collect())
    }

    pub fn queue_stats(&self) -> Result<QueueStats> {
        Ok(self.inner.lock_queue()?.stats())
    }

    /// Runs a full battle in one synchronous pass without registering it.
    pub fn run_battle(&self, a: Fighter, b: Fighter) -> Result<BattleResult> {
        let result = simulate(a, b, self.inner.next_seed(), self.inner.rules)?;
        info!(
            target: "arena::battle",
            winner = ?result.winner(),
            reason = %result.reason,
            turns = result.turns_elapsed,
            "quick battle resolved"
        );
        Ok(result)
    }

    /// Reports on the pairing, then fights it. Warnings never block the fight.
    pub fn challenge(&self, challenger: Fighter, opponent: Fighter) -> Result<Challenge> {
        let report = self.validate_balance(&challenger, &opponent);
        for warning in &report.warnings {
            warn!(
                target: "arena::battle",
                challenger = %challenger.user_id,
                opponent = %opponent.user_id,
                %warning,
                "challenge is unbalanced"
            );
        }

        let result = self.run_battle(challenger, opponent)?;
        Ok(Challenge { report, result })
    }

    pub fn validate_balance(&self, a: &Fighter, b: &Fighter) -> BalanceReport {
        validate_balance(a, b, &self.inner.rules)
    }

    /// Registers a battle the caller advances turn by turn.
    ///
    /// Neither fighter may be queued or in another live battle.
    pub fn start_battle(&self, a: Fighter, b: Fighter) -> Result<BattleId> {
        let (battle_id, participants) = {
            let queue = self.inner.lock_queue()?;
            let mut battles = self.inner.lock_battles()?;

            for user in [a.user_id, b.user_id] {
                if battles.contains_user(user) {
                    return Err(QueueError::AlreadyInBattle(user).into());
                }
                if queue.contains(user) {
                    return Err(QueueError::AlreadyQueued(user).into());
                }
            }

            let battle = Battle::new(a, b, self.inner.next_seed(), self.inner.rules)?;
            let participants = battle.participants();
            (battles.insert(battle, BattleOrigin::Direct), participants)
        };

        info!(target: "arena::battle", %battle_id, "battle started");
        self.inner.events.publish(BattleEvent::Started {
            battle_id,
            origin: BattleOrigin::Direct,
            participants,
        });
        Ok(battle_id)
    }

    /// Resolves exactly one turn of a live battle.
    pub fn advance_turn(&self, battle_id: BattleId) -> Result<TurnAdvance> {
        let advance = self.inner.lock_battles()?.advance(battle_id)?;

        match &advance {
            TurnAdvance::InProgress(snapshot) => {
                debug!(target: "arena::battle", %battle_id, turn = snapshot.turn, "turn resolved");
                self.inner.events.publish(BattleEvent::TurnResolved {
                    battle_id,
                    log: snapshot.last_turn.clone(),
                    health: [
                        snapshot.fighters[0].current_health,
                        snapshot.fighters[1].current_health,
                    ],
                });
            }
            TurnAdvance::Concluded(result) => {
                if let Some(log) = result.turns.last() {
                    self.inner.events.publish(BattleEvent::TurnResolved {
                        battle_id,
                        log: log.clone(),
                        health: result.final_health,
                    });
                }
                self.publish_conclusion(battle_id, result);
            }
        }

        Ok(advance)
    }

    /// Concludes the live battle of `user` with them as the loser.
    pub fn forfeit(&self, user: UserId) -> Result<BattleResult> {
        let (battle_id, result) = self.inner.lock_battles()?.forfeit(user)?;
        info!(target: "arena::battle", %battle_id, %user, "battle forfeited");
        self.publish_conclusion(battle_id, &result);
        Ok(result)
    }

    pub fn battle_of(&self, user: UserId) -> Result<Option<BattleId>> {
        Ok(self.inner.lock_battles()?.battle_of(user))
    }

    pub fn live_battles(&self) -> Result<usize> {
        Ok(self.inner.lock_battles()?.len())
    }

    /// One scheduler pass: commits every available match, reports progress
    /// for waiting entries and sends expired entries against an NPC.
    ///
    /// An entry whose NPC cannot be fetched stays queued for the next pass.
    pub async fn tick_queue(&self) -> Result<TickReport> {
        let now = Instant::now();
        let mut report = TickReport::default();
        let mut events = Vec::new();

        let overdue = {
            let mut queue = self.inner.lock_queue()?;
            let mut battles = self.inner.lock_battles()?;

            while let Some((requester, opponent)) = queue.next_match() {
                self.inner
                    .commit_match(&mut queue, &mut battles, requester, opponent, &mut events)?;
                report.matched += 1;
            }

            for entry in queue.entries().iter().filter(|e| !e.is_overdue(now)) {
                events.push(
                    QueueEvent::SearchProgress {
                        user: entry.user_id(),
                        waited_secs: entry.waited(now).as_secs(),
                        remaining_secs: entry.remaining(now).as_secs(),
                    }
                    .into(),
                );
            }
            queue.overdue(now)
        };
        self.inner.publish_all(events);

        for entry in overdue {
            if self.fall_back(&entry).await? {
                report.timed_out += 1;
            }
        }

        report.waiting = self.inner.lock_queue()?.len();
        debug!(
            target: "arena::scheduler",
            matched = report.matched,
            timed_out = report.timed_out,
            waiting = report.waiting,
            "queue tick"
        );
        Ok(report)
    }

    /// Advances every queue-originated battle by one turn.
    pub fn drive_battles(&self) -> Result<usize> {
        let ids = self.inner.lock_battles()?.driven_ids();
        let mut advanced = 0;

        for battle_id in ids {
            match self.advance_turn(battle_id) {
                Ok(_) => advanced += 1,
                // Forfeited between listing and advancing.
                Err(RuntimeError::BattleNotFound(_)) => {}
                Err(e) => return Err(e),
            }
        }
        Ok(advanced)
    }

    /// Subscribe to events from a specific topic
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.inner.events.subscribe(topic)
    }

    pub fn event_bus(&self) -> &EventBus {
        &self.inner.events
    }

    /// Pairs an expired entry with an NPC. Returns `false` when the entry
    /// is gone or no opponent could be produced.
    async fn fall_back(&self, entry: &QueueEntry) -> Result<bool> {
        let user = entry.user_id();
        let npc = match self.inner.npcs.fallback_opponent(entry.balanced_cp()).await {
            Ok(npc) => npc,
            Err(e) => {
                warn!(
                    target: "arena::scheduler",
                    %user,
                    error = %e,
                    "fallback opponent unavailable"
                );
                return Ok(false);
            }
        };
        let opponent = npc.user_id;

        let battle_id = {
            let mut queue = self.inner.lock_queue()?;
            let mut battles = self.inner.lock_battles()?;

            // Left, matched or rejoined with a fresh window while the NPC was
            // being fetched.
            let Some(current) = queue
                .entries()
                .iter()
                .find(|e| e.user_id() == user && e.is_overdue(Instant::now()))
            else {
                return Ok(false);
            };

            let seed = self.inner.next_seed();
            let battle = match Battle::new(current.fighter.clone(), npc, seed, self.inner.rules) {
                Ok(battle) => battle,
                Err(e) => {
                    error!(
                        target: "arena::scheduler",
                        %user,
                        error = %e,
                        "fallback battle rejected"
                    );
                    return Ok(false);
                }
            };

            queue.remove(user);
            battles.insert(battle, BattleOrigin::Fallback)
        };

        info!(
            target: "arena::scheduler",
            %user,
            %battle_id,
            npc = %opponent,
            "search window expired, fighting NPC"
        );
        self.inner.events.publish(QueueEvent::TimedOut {
            user,
            battle_id,
            opponent,
        });
        self.inner.events.publish(BattleEvent::Started {
            battle_id,
            origin: BattleOrigin::Fallback,
            participants: [user, opponent],
        });
        Ok(true)
    }

    fn publish_conclusion(&self, battle_id: BattleId, result: &BattleResult) {
        info!(
            target: "arena::battle",
            %battle_id,
            winner = ?result.winner(),
            reason = %result.reason,
            turns = result.turns_elapsed,
            "battle concluded"
        );
        self.inner.events.publish(BattleEvent::Concluded {
            battle_id,
            result: result.clone(),
        });
    }
}
