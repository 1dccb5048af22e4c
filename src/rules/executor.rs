//! Applying validated actions to a draft state.
//!
//! `execute` is the only entry point. It validates against the caller's
//! snapshot, clones it, and runs the action on the clone. The caller's
//! snapshot is never touched, so a failed action needs no rollback.

use crate::cards::{AbilityTrigger, Card, CardKind};
use crate::combat;
use crate::core::action::{AttackTarget, GameAction};
use crate::core::entity::CardInstanceId;
use crate::core::error::GameError;
use crate::core::phase::Phase;
use crate::core::player::PlayerId;
use crate::core::state::GameState;
use crate::effects::EffectTarget;
use crate::mana;
use crate::stack::{self, PassOutcome, ResolutionStatus, StackMetadata};
use crate::victory::WinConditionEvaluator;

use super::turn;
use super::validator::{self, PlayPlan};

/// Validate `action` and return the state it produces.
pub fn execute(
    state: &GameState,
    action: &GameAction,
    evaluator: &WinConditionEvaluator,
) -> Result<GameState, GameError> {
    validator::validate(state, action)?;

    let mut draft = state.clone();
    draft.record_action(action.clone());
    match action {
        GameAction::Mulligan { player, replace } => turn::mulligan(&mut draft, *player, replace)?,
        GameAction::PlayCard {
            player,
            card,
            slot,
            target,
        } => {
            let plan = validator::plan_play(state, *player, *card, *slot, *target)?;
            play_card(&mut draft, *player, *card, plan)?;
        }
        GameAction::Attack {
            player,
            attacker,
            target,
        } => attack(&mut draft, *player, *attacker, *target)?,
        GameAction::PassPriority { player } => pass_priority(&mut draft, *player),
        GameAction::EndTurn { .. } => turn::end_turn(&mut draft, evaluator)?,
    }

    draft.outcome = evaluator.check_outcome(&draft);
    if let Some(winner) = draft.outcome.winner() {
        tracing::info!(%winner, turn = draft.turn, round = draft.round, "game over");
    }
    Ok(draft)
}

/// Move between phases, refusing transitions the state machine forbids.
pub(crate) fn transition(state: &mut GameState, next: Phase) -> Result<(), GameError> {
    if !state.phase.can_transition_to(next) {
        return Err(GameError::internal(format!(
            "illegal phase transition {} -> {next}",
            state.phase
        )));
    }
    state.phase = next;
    Ok(())
}

fn play_card(state: &mut GameState, player: PlayerId, id: CardInstanceId, plan: PlayPlan) -> Result<(), GameError> {
    let Some(mut card) = state.player_mut(player).take_from_hand(id) else {
        return Err(GameError::internal(format!("{id} vanished from hand after validation")));
    };
    let paid = plan.payment;
    mana::apply_payment(state.player_mut(player), paid)?;
    tracing::debug!(
        %player,
        card = card.name(),
        mana = paid.mana_used,
        spell_mana = paid.spell_mana_used,
        "card played"
    );

    match plan.kind {
        CardKind::Unit => {
            let slot = plan
                .slot
                .ok_or_else(|| GameError::internal("unit play planned without a slot"))?;
            card.enter_battlefield();
            let source = card.clone();
            state.battlefield.place(player, slot, card)?;
            queue_play_abilities(state, player, &source, plan.target, false);
            stack::process(state);
        }
        CardKind::Spell => {
            let source = card.clone();
            card.reset();
            state.bury(card);
            queue_play_abilities(state, player, &source, plan.target, true);
            if state.config.response_window {
                state.stack.open_window(player);
            } else {
                stack::process(state);
            }
        }
    }
    Ok(())
}

/// Push every on-play ability of `card`. The first takes the planned
/// target; the rest pick their own. Unit abilities with nothing to aim at
/// are skipped.
fn queue_play_abilities(
    state: &mut GameState,
    player: PlayerId,
    card: &Card,
    planned: Option<EffectTarget>,
    is_spell: bool,
) {
    for (i, ability) in card.abilities_for(AbilityTrigger::OnPlay).enumerate() {
        let target = if i == 0 {
            planned
        } else {
            ability.target.auto_target(state, player)
        };
        let target = match target {
            Some(t) => t,
            None => {
                tracing::debug!(card = card.name(), is_spell, "on-play ability has no target, skipped");
                continue;
            }
        };
        let meta = StackMetadata {
            priority: ability.stack_priority(card.is_reversed),
            source_player: player,
            source_card: Some(card.id),
            can_be_countered: ability.counterable,
        };
        state
            .stack
            .add_to_stack(ability.effect_for(card.is_reversed).clone(), target, meta);
    }
}

fn attack(state: &mut GameState, player: PlayerId, attacker: CardInstanceId, target: AttackTarget) -> Result<(), GameError> {
    transition(state, Phase::CombatResolution)?;
    let report = combat::resolve_direct_attack(state, attacker, target)?;
    tracing::debug!(
        %player,
        attacker = %report.attacker,
        dealt = report.damage_dealt,
        taken = report.damage_taken,
        destroyed = report.destroyed.len(),
        "attack resolved"
    );
    stack::process(state);
    transition(state, Phase::Action)
}

fn pass_priority(state: &mut GameState, player: PlayerId) {
    match state.stack.pass_priority(player) {
        PassOutcome::Waiting(next) => {
            tracing::debug!(%player, %next, "priority passed");
        }
        PassOutcome::AllPassed => {
            state.stack.close_window();
            if let ResolutionStatus::Complete { resolved } = stack::process(state) {
                tracing::debug!(resolved, "both players passed, stack resolved");
            }
        }
    }
}
