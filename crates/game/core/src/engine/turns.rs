use crate::combat::{EffectTarget, StatusEffect, StatusEffectKind, Strike, resolve_damage};

use super::{ActionKind, ActionLog, Battle, Side, TerminationReason, TickLog, TurnLog};

impl Battle {
    /// Plays both actions and the end-of-turn tick. Returns the termination
    /// reason if a fighter went down.
    pub(super) fn resolve_turn(
        &mut self,
        turn: u32,
        first: Side,
        log: &mut TurnLog,
    ) -> Option<TerminationReason> {
        for actor in [first, first.other()] {
            if self.fighter(actor).is_defeated() {
                continue;
            }
            let action = self.act(actor, turn);
            log.actions.push(action);
            if self.fighter(actor.other()).is_defeated() {
                return Some(TerminationReason::HealthDepleted);
            }
        }

        for side in [first, first.other()] {
            let tick = self.tick(side);
            log.ticks.push(tick);
            if self.fighter(side).is_defeated() {
                return Some(TerminationReason::HealthDepleted);
            }
        }

        None
    }

    fn act(&mut self, actor: Side, turn: u32) -> ActionLog {
        let rules = self.rules;
        let (attacker, defender) = self.pair_mut(actor);

        if attacker.effects.consume(StatusEffectKind::Bind) {
            return ActionLog::bound(attacker.user_id, defender.current_health);
        }

        let use_ability = attacker.ability_ready();
        let (kind, base_damage, bypass) = if use_ability {
            attacker.ability_cooldown = attacker.ability.cooldown_turns;
            (
                ActionKind::Ability,
                attacker.ability.base_damage,
                attacker.ability.bypasses_defense(),
            )
        } else {
            (ActionKind::Basic, rules.basic_attack_power, false)
        };

        let strike = Strike {
            base_damage,
            attacker_cp: attacker.balanced_cp,
            defender_cp: defender.balanced_cp,
            bypass_defense: bypass,
        };
        let hit = resolve_damage(&strike, &defender.effects, turn, &rules);

        let shields_consumed = if bypass {
            Vec::new()
        } else {
            defender.effects.consume_shields()
        };
        let damage = defender.take_damage(hit.damage);

        let effect_applied = match attacker.ability.effect.filter(|_| use_ability) {
            Some(template) => {
                let holder = match template.kind.target() {
                    EffectTarget::User => &mut *attacker,
                    EffectTarget::Opponent => &mut *defender,
                };
                holder
                    .effects
                    .apply(StatusEffect::from(template))
                    .then_some(template.kind)
            }
            None => None,
        };

        ActionLog {
            actor: attacker.user_id,
            kind,
            base_damage,
            damage,
            effect_multiplier: hit.effect_multiplier,
            target_health: defender.current_health,
            effect_applied,
            shields_consumed,
        }
    }

    fn tick(&mut self, side: Side) -> TickLog {
        let (fighter, _) = self.pair_mut(side);

        let outcome = fighter.effects.tick();
        let periodic_damage = fighter.take_damage(outcome.periodic_damage);
        fighter.ability_cooldown = fighter.ability_cooldown.saturating_sub(1);

        TickLog {
            fighter: fighter.user_id,
            periodic_damage,
            expired: outcome.expired,
            health_after: fighter.current_health,
            cooldown_after: fighter.ability_cooldown,
        }
    }
}
