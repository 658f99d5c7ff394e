mod common;

use std::sync::{Arc, OnceLock};
use std::time::Duration;

use arena_core::{ArenaConfig, Fighter, TurnAdvance, UserId};
use arena_runtime::{
    AbilityCatalog, Arena, ArenaHandle, ArenaSettings, BattleEvent, Event, InMemoryInventoryStore,
    InMemoryUserStore, JoinOutcome, NpcProvider, QueueConfig, QueueEvent, RosterNpcProvider,
    StoreError, Topic,
};
use async_trait::async_trait;
use tokio::time;

use common::{arena, drain, fighter, roster, running_arena};

/// Roster provider that makes user 1 leave and rejoin while the NPC is
/// being fetched.
struct RejoiningProvider {
    roster: RosterNpcProvider,
    handle: Arc<OnceLock<ArenaHandle>>,
}

#[async_trait]
impl NpcProvider for RejoiningProvider {
    async fn fallback_opponent(&self, target_cp: u32) -> Result<Fighter, StoreError> {
        if let Some(handle) = self.handle.get() {
            handle.leave_queue(UserId(1)).unwrap();
            handle.join_queue(fighter(1, 500)).unwrap();
        }
        self.roster.fallback_opponent(target_cp).await
    }
}

#[tokio::test(start_paused = true)]
async fn expired_entry_faces_an_npc() {
    let arena = arena(ArenaSettings::default()).await;
    let handle = arena.handle();
    let mut queue_events = handle.subscribe(Topic::Queue);

    handle.join_queue(fighter(1, 500)).unwrap();

    time::advance(Duration::from_secs(60)).await;
    let report = handle.tick_queue().await.unwrap();
    assert_eq!((report.timed_out, report.waiting), (0, 1));

    time::advance(Duration::from_secs(60)).await;
    let report = handle.tick_queue().await.unwrap();
    assert_eq!((report.timed_out, report.waiting), (1, 0));
    assert!(!handle.is_queued(UserId(1)).unwrap());

    let battle_id = handle.battle_of(UserId(1)).unwrap().unwrap();
    let result = loop {
        if let TurnAdvance::Concluded(result) = handle.advance_turn(battle_id).unwrap() {
            break result;
        }
    };

    assert_eq!(result.participants[0], UserId(1));
    assert!(result.participants[1].is_npc());
    assert!(result.turns_elapsed <= handle.rules().turn_cap);
    assert_eq!(handle.battle_of(UserId(1)).unwrap(), None);

    let events = drain(&mut queue_events);
    assert!(events.iter().any(|event| matches!(
        event,
        Event::Queue(QueueEvent::SearchProgress {
            user: UserId(1),
            waited_secs: 60,
            remaining_secs: 60
        })
    )));
    assert!(events.iter().any(|event| matches!(
        event,
        Event::Queue(QueueEvent::TimedOut {
            user: UserId(1),
            battle_id: id,
            ..
        }) if *id == battle_id
    )));
}

#[tokio::test(start_paused = true)]
async fn entry_left_before_deadline_is_not_expired() {
    let arena = arena(ArenaSettings::default()).await;
    let handle = arena.handle();

    handle.join_queue(fighter(1, 500)).unwrap();
    handle.leave_queue(UserId(1)).unwrap();

    time::advance(Duration::from_secs(300)).await;
    let report = handle.tick_queue().await.unwrap();
    assert_eq!(report.timed_out, 0);
    assert_eq!(handle.live_battles().unwrap(), 0);
}

#[tokio::test(start_paused = true)]
async fn rejoined_entry_keeps_its_fresh_window() {
    let slot = Arc::new(OnceLock::new());
    let arena = Arena::builder()
        .settings(ArenaSettings::default().with_workers(false))
        .config(ArenaConfig::default())
        .users(InMemoryUserStore::new())
        .inventory(InMemoryInventoryStore::new())
        .abilities(AbilityCatalog::new())
        .npcs(RejoiningProvider {
            roster: RosterNpcProvider::new(roster()),
            handle: Arc::clone(&slot),
        })
        .build()
        .await
        .unwrap();
    let handle = arena.handle();

    handle.join_queue(fighter(1, 500)).unwrap();
    time::advance(Duration::from_secs(121)).await;
    assert!(slot.set(handle.clone()).is_ok());

    let report = handle.tick_queue().await.unwrap();
    assert_eq!((report.timed_out, report.waiting), (0, 1));
    assert!(handle.is_queued(UserId(1)).unwrap());
    assert_eq!(handle.battle_of(UserId(1)).unwrap(), None);
    assert_eq!(handle.live_battles().unwrap(), 0);
}

#[tokio::test(start_paused = true)]
async fn workers_resolve_a_timed_out_search() {
    let settings = ArenaSettings {
        queue: QueueConfig {
            search_window: Duration::from_secs(30),
            ..QueueConfig::default()
        },
        ..ArenaSettings::default()
    };
    let arena = running_arena(settings).await;
    let handle = arena.handle();
    let mut battle_events = handle.subscribe(Topic::Battle);

    assert!(matches!(
        handle.join_queue(fighter(1, 500)).unwrap(),
        JoinOutcome::Queued(_)
    ));

    let result = time::timeout(Duration::from_secs(600), async {
        loop {
            if let Event::Battle(BattleEvent::Concluded { result, .. }) =
                battle_events.recv().await.unwrap()
            {
                break result;
            }
        }
    })
    .await
    .unwrap();

    assert_eq!(result.participants[0], UserId(1));
    assert!(result.participants[1].is_npc());
    assert!(!handle.is_queued(UserId(1)).unwrap());

    arena.shutdown().await.unwrap();
}
