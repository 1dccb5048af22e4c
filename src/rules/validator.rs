//! Action validation.
//!
//! Pure checks against an immutable snapshot. Each check returns the first
//! failing reason in a fixed order, so the same illegal action always gets
//! the same error. Nothing here mutates state.
//!
//! ## Check order
//!
//! | Action | Order |
//! |---|---|
//! | `mulligan` | `WrongPhase`, `MulliganAlreadyCompleted`, `CardNotOwned` |
//! | `play_card` | `NotYourTurn`, `WrongPhase`, `CardNotOwned`, `InsufficientMana`, slot errors, `InvalidTarget` |
//! | `attack` | `NotYourTurn`, `NoAttackToken`, `WrongPhase`, `AttackerNotFound`, `SummoningSickness`, `AlreadyAttacked`, `InvalidTarget` |
//! | `pass_priority` | `WrongPhase`, `NotYourTurn` |
//! | `end_turn` | `WrongPhase`, `NotYourTurn` |
//!
//! Every action on a finished game fails with `GameOver` first.

use crate::cards::CardKind;
use crate::core::action::{AttackTarget, GameAction};
use crate::core::entity::CardInstanceId;
use crate::core::error::GameError;
use crate::core::phase::Phase;
use crate::core::player::PlayerId;
use crate::core::state::GameState;
use crate::effects::EffectTarget;
use crate::mana::{self, ManaPayment};

/// Everything the executor needs to carry out a validated play.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlayPlan {
    pub kind: CardKind,
    pub payment: ManaPayment,
    /// Slot for units.
    pub slot: Option<usize>,
    /// Bound target of the first on-play ability, if it has one.
    pub target: Option<EffectTarget>,
}

/// Validate any action.
pub fn validate(state: &GameState, action: &GameAction) -> Result<(), GameError> {
    match action {
        GameAction::Mulligan { player, replace } => validate_mulligan(state, *player, replace),
        GameAction::PlayCard {
            player,
            card,
            slot,
            target,
        } => plan_play(state, *player, *card, *slot, *target).map(|_| ()),
        GameAction::Attack {
            player,
            attacker,
            target,
        } => validate_attack(state, *player, *attacker, *target),
        GameAction::PassPriority { player } => validate_pass(state, *player),
        GameAction::EndTurn { player } => validate_end_turn(state, *player),
    }
}

fn ensure_ongoing(state: &GameState) -> Result<(), GameError> {
    if state.is_terminal() {
        Err(GameError::GameOver)
    } else {
        Ok(())
    }
}

pub fn validate_mulligan(state: &GameState, player: PlayerId, replace: &[CardInstanceId]) -> Result<(), GameError> {
    ensure_ongoing(state)?;
    if state.phase != Phase::Mulligan {
        return Err(GameError::WrongPhase { phase: state.phase });
    }
    let seat = state.player(player);
    if seat.mulligan.completed {
        return Err(GameError::MulliganAlreadyCompleted { player });
    }
    for (i, &card) in replace.iter().enumerate() {
        if seat.hand_card(card).is_none() {
            return Err(GameError::CardNotOwned { player, card });
        }
        if replace[..i].contains(&card) {
            return Err(GameError::invalid_target(format!("{card} listed twice")));
        }
    }
    Ok(())
}

/// Validate a play and work out how it will be carried out.
pub fn plan_play(
    state: &GameState,
    player: PlayerId,
    card: CardInstanceId,
    slot: Option<usize>,
    target: Option<EffectTarget>,
) -> Result<PlayPlan, GameError> {
    ensure_ongoing(state)?;
    if player != state.acting_player() {
        return Err(GameError::NotYourTurn { player });
    }
    if state.phase != Phase::Action {
        return Err(GameError::WrongPhase { phase: state.phase });
    }
    let seat = state.player(player);
    let Some(in_hand) = seat.hand_card(card) else {
        return Err(GameError::CardNotOwned { player, card });
    };
    if state.stack.is_window_open() && in_hand.kind() != CardKind::Spell {
        // Only spells may answer a pending stack.
        return Err(GameError::WrongPhase { phase: state.phase });
    }
    let payment = mana::quote(seat, in_hand.cost())?;

    let slot = match in_hand.kind() {
        CardKind::Unit => Some(state.battlefield.resolve_slot(player, slot)?),
        CardKind::Spell => None,
    };

    let bound = match in_hand.definition.play_ability() {
        Some(ability) => {
            let variant = ability.target.bind(state, player, target)?;
            if variant.is_none() && in_hand.kind() == CardKind::Spell {
                return Err(GameError::invalid_target(format!(
                    "{} has no legal target",
                    in_hand.name()
                )));
            }
            variant
        }
        None if target.is_some() => {
            return Err(GameError::invalid_target(format!("{} takes no target", in_hand.name())));
        }
        None => None,
    };

    Ok(PlayPlan {
        kind: in_hand.kind(),
        payment,
        slot,
        target: bound,
    })
}

pub fn validate_attack(
    state: &GameState,
    player: PlayerId,
    attacker: CardInstanceId,
    target: AttackTarget,
) -> Result<(), GameError> {
    ensure_ongoing(state)?;
    if player != state.active_player {
        return Err(GameError::NotYourTurn { player });
    }
    if !state.player(player).has_attack_token {
        return Err(GameError::NoAttackToken { player });
    }
    if state.phase != Phase::Action || state.stack.is_window_open() {
        return Err(GameError::WrongPhase { phase: state.phase });
    }
    let Some(unit) = state.battlefield.units(player).find(|c| c.id == attacker) else {
        return Err(GameError::AttackerNotFound { attacker });
    };
    if unit.has_summoning_sickness {
        return Err(GameError::SummoningSickness { attacker });
    }
    if unit.has_attacked_this_turn {
        return Err(GameError::AlreadyAttacked { attacker });
    }
    state.battlefield.check_attack_target(player.opponent(), target)
}

pub fn validate_pass(state: &GameState, player: PlayerId) -> Result<(), GameError> {
    ensure_ongoing(state)?;
    let Some(holder) = state.stack.priority_holder() else {
        return Err(GameError::WrongPhase { phase: state.phase });
    };
    if player != holder {
        return Err(GameError::NotYourTurn { player });
    }
    Ok(())
}

pub fn validate_end_turn(state: &GameState, player: PlayerId) -> Result<(), GameError> {
    ensure_ongoing(state)?;
    if state.phase != Phase::Action || state.stack.is_window_open() {
        return Err(GameError::WrongPhase { phase: state.phase });
    }
    if player != state.active_player {
        return Err(GameError::NotYourTurn { player });
    }
    Ok(())
}
