//! Effect resolution - executing effects on game state.
//!
//! `EffectResolver` applies one effect to one bound target. It never removes
//! dead units itself; the stack drains deaths after each resolved item so
//! death triggers queue in a single place.
//!
//! A target that vanished between binding and resolution (unit already
//! dead, stack item already gone) makes the effect fizzle. Fizzling is a
//! normal outcome, not an error.

use super::effect::{EffectKind, EffectTarget};
use super::persistent::PersistentEffect;
use crate::cards::Card;
use crate::core::config::{MAX_MANA, SPELL_MANA_CAP};
use crate::core::entity::CardInstanceId;
use crate::core::error::GameError;
use crate::core::player::PlayerId;
use crate::core::state::GameState;

/// Who is resolving an effect and from where.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EffectContext {
    pub controller: PlayerId,
    pub source: Option<CardInstanceId>,
}

impl EffectContext {
    #[must_use]
    pub fn new(controller: PlayerId) -> Self {
        Self {
            controller,
            source: None,
        }
    }
}

/// Result of resolving an effect.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResolveResult {
    Applied,
    /// Nothing to act on.
    Fizzled(&'static str),
}

/// Resolves effects on game state.
pub struct EffectResolver;

impl EffectResolver {
    pub fn resolve(
        state: &mut GameState,
        effect: &EffectKind,
        target: EffectTarget,
        ctx: EffectContext,
    ) -> Result<ResolveResult, GameError> {
        let result = match effect {
            EffectKind::Damage { amount } => Self::damage(state, *amount, target),
            EffectKind::Heal { amount } => Self::heal(state, *amount, target),
            EffectKind::DrawCards { count } => match target {
                EffectTarget::Player(player) => {
                    for _ in 0..*count {
                        state.draw_card(player);
                    }
                    ResolveResult::Applied
                }
                _ => ResolveResult::Fizzled("draw needs a player target"),
            },
            EffectKind::GainMana { amount } => match target {
                EffectTarget::Player(player) => {
                    let seat = state.player_mut(player);
                    let raised = seat.max_mana.saturating_add(*amount).min(MAX_MANA);
                    let gained = raised - seat.max_mana;
                    seat.max_mana = raised;
                    seat.mana = seat.mana.saturating_add(gained).min(seat.max_mana);
                    ResolveResult::Applied
                }
                _ => ResolveResult::Fizzled("mana gain needs a player target"),
            },
            EffectKind::GainSpellMana { amount } => match target {
                EffectTarget::Player(player) => {
                    let seat = state.player_mut(player);
                    seat.spell_mana = seat.spell_mana.saturating_add(*amount).min(SPELL_MANA_CAP);
                    ResolveResult::Applied
                }
                _ => ResolveResult::Fizzled("spell mana gain needs a player target"),
            },
            EffectKind::DestroyByHealthThreshold { max_health } => {
                let threshold = *max_health;
                let hit = Self::for_each_unit(state, target, |card| {
                    if card.current_health <= threshold {
                        card.current_health = card.current_health.min(0);
                    }
                });
                Self::unit_result(hit)
            }
            EffectKind::Buff { attack, health } => {
                let hit = Self::for_each_unit(state, target, |card| card.buff(*attack, *health));
                Self::unit_result(hit)
            }
            EffectKind::Counter => match target {
                EffectTarget::StackItem(id) => {
                    if state.stack.counter_effect(id, ctx.controller) {
                        ResolveResult::Applied
                    } else {
                        ResolveResult::Fizzled("stack item gone or uncounterable")
                    }
                }
                _ => ResolveResult::Fizzled("counter needs a stack item target"),
            },
            EffectKind::Lingering { effect, turns } => {
                if matches!(**effect, EffectKind::Lingering { .. }) {
                    return Err(GameError::EffectResolutionFailure {
                        reason: "lingering effects cannot nest".to_string(),
                    });
                }
                state.persistent_effects.push_back(PersistentEffect {
                    effect: (**effect).clone(),
                    target,
                    remaining_turns: *turns,
                    owner: ctx.controller,
                    source: ctx.source,
                });
                ResolveResult::Applied
            }
            EffectKind::DeclareVictory => {
                state.declared_victory.get_or_insert(ctx.controller);
                ResolveResult::Applied
            }
        };

        match &result {
            ResolveResult::Applied => {
                tracing::debug!(effect = effect.name(), ?target, controller = %ctx.controller, "effect resolved");
            }
            ResolveResult::Fizzled(reason) => {
                tracing::debug!(effect = effect.name(), ?target, reason, "effect fizzled");
            }
        }
        Ok(result)
    }

    fn damage(state: &mut GameState, amount: i32, target: EffectTarget) -> ResolveResult {
        if let EffectTarget::Player(player) = target {
            let seat = state.player_mut(player);
            seat.health = seat.health.saturating_sub(amount.max(0));
            return ResolveResult::Applied;
        }
        let hit = Self::for_each_unit(state, target, |card| card.take_damage(amount));
        Self::unit_result(hit)
    }

    fn heal(state: &mut GameState, amount: i32, target: EffectTarget) -> ResolveResult {
        if let EffectTarget::Player(player) = target {
            let ceiling = state.config.starting_health;
            let seat = state.player_mut(player);
            if seat.health < ceiling {
                seat.health = seat.health.saturating_add(amount.max(0)).min(ceiling);
            }
            return ResolveResult::Applied;
        }
        let hit = Self::for_each_unit(state, target, |card| card.heal(amount));
        Self::unit_result(hit)
    }

    /// Apply `f` to every live unit the target covers. Returns how many.
    fn for_each_unit(state: &mut GameState, target: EffectTarget, mut f: impl FnMut(&mut Card)) -> usize {
        let mut hit = 0;
        let mut visit = |card: &mut Card| {
            if !card.is_dead() {
                f(card);
                hit += 1;
            }
        };

        match target {
            EffectTarget::Unit(id) => {
                if let Some(card) = state.battlefield.unit_mut(id) {
                    visit(card);
                }
            }
            EffectTarget::Side(player) => state.battlefield.units_mut(player).for_each(&mut visit),
            EffectTarget::AllUnits => {
                for player in PlayerId::both() {
                    state.battlefield.units_mut(player).for_each(&mut visit);
                }
            }
            EffectTarget::None | EffectTarget::Player(_) | EffectTarget::StackItem(_) => {}
        }
        hit
    }

    fn unit_result(hit: usize) -> ResolveResult {
        if hit > 0 {
            ResolveResult::Applied
        } else {
            ResolveResult::Fizzled("no unit to act on")
        }
    }
}
