//! Win condition evaluation.
//!
//! Alternative conditions run first, in registration order. If none names
//! a winner, health decides: player one's defeat is checked before player
//! two's, so a simultaneous double knockout goes to player two.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::conditions::{AlternativeWinCondition, BoardDomination, DeclaredVictory};
use crate::core::config::GameMode;
use crate::core::player::PlayerId;
use crate::core::state::GameState;

/// Result of a win check.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Player1Wins,
    Player2Wins,
    #[default]
    Ongoing,
}

impl Outcome {
    #[must_use]
    pub fn for_winner(player: PlayerId) -> Self {
        if player == PlayerId::ONE {
            Outcome::Player1Wins
        } else {
            Outcome::Player2Wins
        }
    }

    #[must_use]
    pub fn winner(self) -> Option<PlayerId> {
        match self {
            Outcome::Player1Wins => Some(PlayerId::ONE),
            Outcome::Player2Wins => Some(PlayerId::TWO),
            Outcome::Ongoing => None,
        }
    }

    #[must_use]
    pub fn is_terminal(self) -> bool {
        self != Outcome::Ongoing
    }
}

/// Checks alternative conditions, then health.
///
/// ```
/// use arcana_ccg::core::{GameConfig, GameMode, GameState, PlayerId};
/// use arcana_ccg::victory::{Outcome, WinConditionEvaluator};
///
/// let evaluator = WinConditionEvaluator::for_mode(GameMode::Standard);
/// let mut state = GameState::new(GameConfig::default());
///
/// state.players[PlayerId::TWO].health = 0;
/// assert_eq!(evaluator.check_outcome(&state), Outcome::Player1Wins);
/// ```
#[derive(Clone, Debug, Default)]
pub struct WinConditionEvaluator {
    alternatives: Vec<Arc<dyn AlternativeWinCondition>>,
}

impl WinConditionEvaluator {
    /// Health only.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The conditions a game mode plays with.
    #[must_use]
    pub fn for_mode(mode: GameMode) -> Self {
        match mode {
            GameMode::Tutorial => Self::new(),
            GameMode::Standard => Self::new().with_condition(DeclaredVictory),
            GameMode::Arcana => Self::new()
                .with_condition(DeclaredVictory)
                .with_condition(BoardDomination),
        }
    }

    #[must_use]
    pub fn with_condition(mut self, condition: impl AlternativeWinCondition + 'static) -> Self {
        self.alternatives.push(Arc::new(condition));
        self
    }

    /// Names of the registered alternative conditions.
    pub fn condition_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.alternatives.iter().map(|c| c.name())
    }

    pub fn check_outcome(&self, state: &GameState) -> Outcome {
        for condition in &self.alternatives {
            if let Some(winner) = condition.check(state) {
                tracing::debug!(condition = condition.name(), %winner, "alternative win condition met");
                return Outcome::for_winner(winner);
            }
        }

        if !state.player(PlayerId::ONE).is_alive() {
            Outcome::Player2Wins
        } else if !state.player(PlayerId::TWO).is_alive() {
            Outcome::Player1Wins
        } else {
            Outcome::Ongoing
        }
    }
}
