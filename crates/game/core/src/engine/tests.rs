use super::*;
use crate::combat::StatusEffectKind;
use crate::fighter::{Ability, AbilityFlags, EffectTemplate, FighterDefect};

fn fighter(id: u64, cp: u32, health: u32, ability: Ability) -> Fighter {
    Fighter::new(UserId(id), format!("pirate-{id}"), 20, cp, health, ability)
}

fn pistol() -> Ability {
    Ability::new("Gum-Gum Pistol", 150, 1)
}

fn rules() -> BattleConfig {
    BattleConfig::default()
}

#[test]
fn even_fight_follows_the_reference_scenario() {
    let a = fighter(1, 300, 400, pistol());
    let b = fighter(2, 300, 400, pistol());
    let mut battle = Battle::new(a, b, 42, rules()).unwrap();

    let TurnAdvance::InProgress(one) = battle.advance_turn().unwrap() else {
        panic!("battle ended on turn 1");
    };
    assert_eq!(one.turn, 1);
    assert!(one.last_turn.actions.iter().all(|a| a.kind == ActionKind::Ability));
    assert!(one.last_turn.actions.iter().all(|a| a.damage == 30));
    assert_eq!(one.fighters[0].current_health, 370);
    assert_eq!(one.fighters[1].current_health, 370);

    let TurnAdvance::InProgress(two) = battle.advance_turn().unwrap() else {
        panic!("battle ended on turn 2");
    };
    assert!(two.last_turn.actions.iter().all(|a| a.damage == 150));
    assert_eq!(two.fighters[0].current_health, 220);
    assert_eq!(two.fighters[1].current_health, 220);

    let result = battle.run().unwrap();
    assert_eq!(result.reason, TerminationReason::HealthDepleted);
    assert_eq!(result.turns_elapsed, 4);

    // Whoever strikes first on turn 4 lands the finishing blow.
    let last = &result.turns[3];
    assert_eq!(last.actions.len(), 1);
    assert!(last.ticks.is_empty());
    assert_eq!(result.winner(), last.first_actor());
    assert_eq!(result.health_of(result.winner().unwrap()), Some(70));
    assert_eq!(result.health_of(result.loser().unwrap()), Some(0));
    assert_eq!(battle.phase(), BattlePhase::Concluded(TerminationReason::HealthDepleted));
}

#[test]
fn rejects_malformed_fighters_before_starting() {
    let broken = fighter(2, 300, 0, pistol());
    let err = Battle::new(fighter(1, 300, 400, pistol()), broken, 1, rules()).unwrap_err();
    assert_eq!(
        err,
        BattleError::InvalidFighter {
            side: Side::B,
            reason: FighterDefect::ZeroMaxHealth,
        }
    );

    let twin = fighter(1, 300, 400, pistol());
    let err = Battle::new(twin.clone(), twin, 1, rules()).unwrap_err();
    assert_eq!(err, BattleError::SameFighter(UserId(1)));
}

#[test]
fn defeated_snapshots_cannot_enter_a_battle() {
    for seed in 0..8 {
        let mut fallen = fighter(1, 300, 400, pistol());
        fallen.current_health = 0;

        let err = Battle::new(fallen, fighter(2, 300, 400, pistol()), seed, rules()).unwrap_err();
        assert_eq!(
            err,
            BattleError::InvalidFighter {
                side: Side::A,
                reason: FighterDefect::AlreadyDefeated,
            }
        );
    }

    let mut a = fighter(1, 300, 400, pistol());
    let mut b = fighter(2, 300, 400, pistol());
    a.current_health = 0;
    b.current_health = 0;
    assert!(simulate(a, b, 3, rules()).is_err());
}

#[test]
fn exact_tie_at_turn_cap_is_a_draw() {
    let a = fighter(1, 300, 100_000, pistol());
    let b = fighter(2, 300, 100_000, pistol());

    let result = simulate(a, b, 9, rules()).unwrap();
    assert_eq!(result.reason, TerminationReason::TurnLimitReached);
    assert_eq!(result.turns_elapsed, 15);
    assert!(result.is_draw());
    assert_eq!(result.winner(), None);
}

#[test]
fn higher_health_wins_at_turn_cap() {
    let a = fighter(1, 600, 100_000, pistol());
    let b = fighter(2, 300, 100_000, pistol());

    let result = simulate(a, b, 9, rules().with_turn_cap(5)).unwrap();
    assert_eq!(result.reason, TerminationReason::TurnLimitReached);
    assert_eq!(result.turns_elapsed, 5);
    assert_eq!(result.winner(), Some(UserId(1)));
}

#[test]
fn always_terminates_within_cap_and_health_stays_in_range() {
    for seed in 0..32u64 {
        let a = fighter(1, 250 + seed as u32 * 10, 500, pistol());
        let b = fighter(2, 400, 450, Ability::new("Oni Giri", 90, 0));
        let mut battle = Battle::new(a, b, seed, rules()).unwrap();

        let result = battle.run().unwrap();
        assert!(result.turns_elapsed <= rules().turn_cap);
        assert!(result.final_health[0] <= 500);
        assert!(result.final_health[1] <= 450);
        for turn in &result.turns {
            for action in &turn.actions {
                assert!(action.target_health <= 500);
            }
        }
    }
}

#[test]
fn same_seed_replays_identically() {
    let make = || {
        (
            fighter(1, 320, 600, pistol()),
            fighter(2, 280, 640, Ability::new("Oni Giri", 120, 2)),
        )
    };
    let (a, b) = make();
    let first = simulate(a, b, 1234, rules()).unwrap();
    let (a, b) = make();
    let second = simulate(a, b, 1234, rules()).unwrap();

    assert_eq!(first, second);
}

#[test]
fn initiative_is_redrawn_every_turn() {
    let battle = Battle::new(
        fighter(1, 300, 400, pistol()),
        fighter(2, 300, 400, pistol()),
        7,
        rules(),
    )
    .unwrap();

    let sides: Vec<Side> = (1..=64).map(|turn| battle.initiative(turn)).collect();
    assert!(sides.contains(&Side::A));
    assert!(sides.contains(&Side::B));
}

#[test]
fn cooldown_falls_back_to_basic_attack() {
    let slow = Ability::new("Conqueror's Strike", 200, 2);
    let a = fighter(1, 300, 100_000, slow.clone());
    let b = fighter(2, 300, 100_000, slow);
    let mut battle = Battle::new(a, b, 3, rules()).unwrap();

    let kinds: Vec<Vec<ActionKind>> = (0..4)
        .map(|_| match battle.advance_turn().unwrap() {
            TurnAdvance::InProgress(snapshot) => {
                snapshot.last_turn.actions.iter().map(|a| a.kind).collect()
            }
            TurnAdvance::Concluded(_) => panic!("ended early"),
        })
        .collect();

    assert_eq!(kinds[0], vec![ActionKind::Ability; 2]);
    assert_eq!(kinds[1], vec![ActionKind::Basic; 2]);
    assert_eq!(kinds[2], vec![ActionKind::Ability; 2]);
    assert_eq!(kinds[3], vec![ActionKind::Basic; 2]);

    let basic = &battle.turns()[1].actions[0];
    assert_eq!(basic.base_damage, rules().basic_attack_power);
}

#[test]
fn burn_ticks_on_the_opponent() {
    let flame = Ability::new("Fire Fist", 60, 0)
        .with_effect(EffectTemplate::standard(StatusEffectKind::Burn));
    let mut battle = Battle::new(
        fighter(1, 300, 10_000, flame),
        fighter(2, 300, 10_000, pistol()),
        5,
        rules(),
    )
    .unwrap();
    battle.advance_turn().unwrap();

    let ticks = &battle.turns()[0].ticks;
    let on_b = ticks.iter().find(|t| t.fighter == UserId(2)).unwrap();
    let on_a = ticks.iter().find(|t| t.fighter == UserId(1)).unwrap();
    assert_eq!(on_b.periodic_damage, 20);
    assert_eq!(on_a.periodic_damage, 0);
}

#[test]
fn bind_costs_the_opponent_an_action() {
    let chains = Ability::new("Haki Chains", 10, 0)
        .with_effect(EffectTemplate::standard(StatusEffectKind::Bind));

    for seed in 0..8u64 {
        let mut battle = Battle::new(
            fighter(1, 300, 10_000, chains.clone()),
            fighter(2, 300, 10_000, pistol()),
            seed,
            rules(),
        )
        .unwrap();
        battle.advance_turn().unwrap();
        battle.advance_turn().unwrap();

        let bound: Vec<&ActionLog> = battle
            .turns()
            .iter()
            .flat_map(|t| &t.actions)
            .filter(|a| a.actor == UserId(2) && a.kind == ActionKind::Bound)
            .collect();
        assert!(!bound.is_empty(), "seed {seed}");
        assert!(bound.iter().all(|a| a.damage == 0));
    }
}

#[test]
fn shield_mitigates_then_breaks() {
    let guard = Ability::new("Iron Body", 50, 0)
        .with_effect(EffectTemplate::standard(StatusEffectKind::HeavyShield));

    for seed in 0..8u64 {
        let mut battle = Battle::new(
            fighter(1, 300, 10_000, guard.clone()),
            fighter(2, 300, 10_000, pistol()),
            seed,
            rules(),
        )
        .unwrap();
        battle.advance_turn().unwrap();
        battle.advance_turn().unwrap();

        let shielded = battle
            .turns()
            .iter()
            .flat_map(|t| &t.actions)
            .find(|a| a.actor == UserId(2) && a.effect_multiplier == 300)
            .unwrap_or_else(|| panic!("seed {seed}: no mitigated hit"));
        assert_eq!(shielded.shields_consumed, vec![StatusEffectKind::HeavyShield]);
    }
}

#[test]
fn defense_bypass_ignores_shields() {
    let guard = Ability::new("Iron Body", 50, 0)
        .with_effect(EffectTemplate::standard(StatusEffectKind::HeavyShield));
    let pierce = Ability::new("Ryuo", 100, 0).with_flags(AbilityFlags::BYPASS_DEFENSE);

    let mut battle = Battle::new(
        fighter(1, 300, 10_000, guard),
        fighter(2, 300, 10_000, pierce),
        11,
        rules(),
    )
    .unwrap();
    battle.advance_turn().unwrap();
    battle.advance_turn().unwrap();

    for action in battle.turns().iter().flat_map(|t| &t.actions) {
        if action.actor == UserId(2) {
            assert_eq!(action.effect_multiplier, 1000);
            assert!(action.shields_consumed.is_empty());
        }
    }
}

#[test]
fn forfeit_concludes_with_forfeiting_loser() {
    let mut battle = Battle::new(
        fighter(1, 300, 400, pistol()),
        fighter(2, 300, 400, pistol()),
        8,
        rules(),
    )
    .unwrap();

    assert_eq!(
        battle.forfeit(UserId(99)).unwrap_err(),
        BattleError::UnknownParticipant(UserId(99))
    );

    battle.advance_turn().unwrap();
    let result = battle.forfeit(UserId(1)).unwrap();
    assert_eq!(result.reason, TerminationReason::Forfeit);
    assert_eq!(result.loser(), Some(UserId(1)));
    assert_eq!(result.winner(), Some(UserId(2)));
    assert_eq!(result.turns_elapsed, 1);

    assert_eq!(battle.advance_turn().unwrap_err(), BattleError::AlreadyConcluded);
    assert_eq!(battle.forfeit(UserId(2)).unwrap_err(), BattleError::AlreadyConcluded);
    assert_eq!(battle.result(), Some(&result));
}
