//! Alternative win conditions.
//!
//! Game modes plug extra ways to win into the evaluator. Each condition
//! names a winner or stays silent; the evaluator asks them in order before
//! falling back to health.

use std::fmt::Debug;

use crate::core::player::PlayerId;
use crate::core::state::GameState;

/// A pluggable win condition checked ahead of health depletion.
pub trait AlternativeWinCondition: Debug + Send + Sync {
    /// Name for logs.
    fn name(&self) -> &'static str;

    /// The winner, if this condition is met.
    fn check(&self, state: &GameState) -> Option<PlayerId>;
}

/// Victory declared by an ability (`EffectKind::DeclareVictory`).
#[derive(Clone, Copy, Debug, Default)]
pub struct DeclaredVictory;

impl AlternativeWinCondition for DeclaredVictory {
    fn name(&self) -> &'static str {
        "declared_victory"
    }

    fn check(&self, state: &GameState) -> Option<PlayerId> {
        state.declared_victory
    }
}

/// A player whose every battlefield slot is filled wins.
#[derive(Clone, Copy, Debug, Default)]
pub struct BoardDomination;

impl AlternativeWinCondition for BoardDomination {
    fn name(&self) -> &'static str {
        "board_domination"
    }

    fn check(&self, state: &GameState) -> Option<PlayerId> {
        PlayerId::both().find(|&p| state.battlefield.is_full(p))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Card, CardDefinition, CardId};
    use crate::core::{CardInstanceId, GameConfig, BATTLEFIELD_SLOTS};

    #[test]
    fn test_declared_victory() {
        let mut state = GameState::new(GameConfig::default());
        assert_eq!(DeclaredVictory.check(&state), None);

        state.declared_victory = Some(PlayerId::TWO);
        assert_eq!(DeclaredVictory.check(&state), Some(PlayerId::TWO));
    }

    #[test]
    fn test_board_domination() {
        let mut state = GameState::new(GameConfig::default());
        let def = CardDefinition::unit(CardId::new(1), "Pawn", 1, 1, 1);

        for slot in 0..BATTLEFIELD_SLOTS - 1 {
            let card = Card::new(CardInstanceId(slot as u32 + 1), &def, PlayerId::TWO);
            state.battlefield.place(PlayerId::TWO, slot, card).unwrap();
        }
        assert_eq!(BoardDomination.check(&state), None);

        let last = Card::new(CardInstanceId(100), &def, PlayerId::TWO);
        state.battlefield.place(PlayerId::TWO, BATTLEFIELD_SLOTS - 1, last).unwrap();
        assert_eq!(BoardDomination.check(&state), Some(PlayerId::TWO));
    }
}
