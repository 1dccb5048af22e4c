//! Draining the stack.
//!
//! `resolve_stack` pops items one at a time, resolves each, then settles
//! deaths so on-death abilities land on the stack one level deeper than the
//! item that caused them. `process` wraps it with the failure policy: on any
//! resolution error the pre-resolution snapshot is restored, the stack is
//! cleared, and play continues.

use crate::cards::{AbilityTrigger, Card};
use crate::core::entity::CardInstanceId;
use crate::core::error::GameError;
use crate::core::player::PlayerId;
use crate::core::state::GameState;
use crate::effects::{EffectContext, EffectResolver};

use super::priority::StackMetadata;

/// Upper bound on items resolved in one drain.
pub const MAX_RESOLUTION_STEPS: usize = 256;

/// Status returned by `process`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResolutionStatus {
    /// The stack is empty; `resolved` items ran.
    Complete { resolved: usize },
    /// A response window is open and this player holds priority.
    WaitingForPriority(PlayerId),
    /// Resolution failed; the stack was cleared.
    Cleared { reason: String },
}

/// Resolve every pending item in order.
pub fn resolve_stack(state: &mut GameState) -> Result<usize, GameError> {
    state.stack.close_window();
    let mut resolved = 0;

    while let Some(item) = state.stack.pop_next() {
        resolved += 1;
        if resolved > MAX_RESOLUTION_STEPS {
            return Err(GameError::EffectResolutionFailure {
                reason: format!("stack did not settle within {MAX_RESOLUTION_STEPS} steps"),
            });
        }

        state.stack.set_push_depth(item.depth + 1);
        let ctx = EffectContext {
            controller: item.source_player,
            source: item.source_card,
        };
        EffectResolver::resolve(state, &item.effect, item.target, ctx)?;
        settle_deaths(state);
    }

    state.stack.set_push_depth(0);
    Ok(resolved)
}

/// Drain the stack unless a response window is waiting on a player.
///
/// Never fails: a resolution error restores the snapshot taken before
/// draining, clears the stack, and is reported as `Cleared`.
pub fn process(state: &mut GameState) -> ResolutionStatus {
    if let Some(holder) = state.stack.priority_holder() {
        return ResolutionStatus::WaitingForPriority(holder);
    }
    if state.stack.is_empty() {
        return ResolutionStatus::Complete { resolved: 0 };
    }

    let checkpoint = state.clone();
    match resolve_stack(state) {
        Ok(resolved) => ResolutionStatus::Complete { resolved },
        Err(err) => {
            tracing::warn!(error = %err, pending = checkpoint.stack.len(), "stack resolution failed, clearing stack");
            *state = checkpoint;
            state.stack.clear();
            ResolutionStatus::Cleared {
                reason: err.to_string(),
            }
        }
    }
}

/// Remove dead units, bury them, and queue their on-death abilities.
///
/// Returns the ids of the units removed.
pub fn settle_deaths(state: &mut GameState) -> Vec<CardInstanceId> {
    let dead = state.battlefield.remove_dead();
    let mut removed = Vec::with_capacity(dead.len());

    for mut card in dead {
        removed.push(card.id);
        tracing::debug!(card = %card.id, name = card.name(), owner = %card.owner, "unit destroyed");
        queue_death_triggers(state, &card);
        card.reset();
        state.bury(card);
    }
    removed
}

fn queue_death_triggers(state: &mut GameState, card: &Card) {
    for ability in card.abilities_for(AbilityTrigger::OnDeath) {
        let Some(target) = ability.target.auto_target(state, card.owner) else {
            tracing::debug!(card = %card.id, "death trigger has no target");
            continue;
        };
        state.stack.add_to_stack(
            ability.effect_for(card.is_reversed).clone(),
            target,
            StackMetadata {
                priority: ability.stack_priority(card.is_reversed),
                source_player: card.owner,
                source_card: Some(card.id),
                can_be_countered: ability.counterable,
            },
        );
    }
}
