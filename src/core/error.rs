//! Engine error taxonomy.
//!
//! Validation failures are ordinary values returned to the caller; they are
//! produced before any mutation, so a rejected action leaves the submitted
//! state untouched. Nothing in the engine panics on bad input.

use serde::{Deserialize, Serialize};

use super::entity::CardInstanceId;
use super::phase::Phase;
use super::player::PlayerId;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum GameError {
    #[error("it is not {player}'s turn")]
    NotYourTurn { player: PlayerId },

    #[error("action not allowed during {phase} phase")]
    WrongPhase { phase: Phase },

    #[error("{card} is not in {player}'s hand")]
    CardNotOwned { player: PlayerId, card: CardInstanceId },

    #[error("insufficient mana: need {required}, have {available}")]
    InsufficientMana { required: u32, available: u32 },

    #[error("battlefield slot {slot} is occupied")]
    SlotOccupied { slot: usize },

    #[error("battlefield slot {slot} is out of range")]
    SlotOutOfRange { slot: usize },

    #[error("battlefield is full")]
    BattlefieldFull,

    #[error("attacker {attacker} not found on the battlefield")]
    AttackerNotFound { attacker: CardInstanceId },

    #[error("{attacker} has summoning sickness")]
    SummoningSickness { attacker: CardInstanceId },

    #[error("{attacker} already attacked this turn")]
    AlreadyAttacked { attacker: CardInstanceId },

    #[error("invalid target: {reason}")]
    InvalidTarget { reason: String },

    #[error("{player} does not hold the attack token")]
    NoAttackToken { player: PlayerId },

    #[error("{player} already completed their mulligan")]
    MulliganAlreadyCompleted { player: PlayerId },

    #[error("the game is over")]
    GameOver,

    #[error("effect resolution failed: {reason}")]
    EffectResolutionFailure { reason: String },

    #[error("internal engine error: {reason}")]
    InternalError { reason: String },
}

impl GameError {
    pub(crate) fn invalid_target(reason: impl Into<String>) -> Self {
        GameError::InvalidTarget {
            reason: reason.into(),
        }
    }

    pub(crate) fn internal(reason: impl Into<String>) -> Self {
        GameError::InternalError {
            reason: reason.into(),
        }
    }

    /// True for rejections a player can fix by choosing a different action.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        !matches!(
            self,
            GameError::EffectResolutionFailure { .. } | GameError::InternalError { .. }
        )
    }
}
