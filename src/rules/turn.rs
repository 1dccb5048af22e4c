//! Turn structure: opening deal, mulligan, and the end-turn sequence.
//!
//! ## End turn
//!
//! 1. Fire persistent effects and drain the stack
//! 2. Refresh the departing player's units
//! 3. Bank unspent mana as spell mana
//! 4. Hand the turn over; every odd turn starts a new round and moves the
//!    attack token
//! 5. Refill and draw for the incoming player
//!
//! A win during step 1 stops the sequence: the finished game keeps its
//! current active player and turn counter.

use crate::cards::{build_decks, CardRegistry, DeckSelection};
use crate::core::entity::CardInstanceId;
use crate::core::error::GameError;
use crate::core::phase::Phase;
use crate::core::player::PlayerId;
use crate::core::state::GameState;
use crate::effects::tick_persistent_effects;
use crate::mana;
use crate::stack;
use crate::victory::WinConditionEvaluator;

use super::executor::transition;

/// Build decks, shuffle them and deal the opening hands.
pub fn deal_opening_hands(state: &mut GameState, registry: &CardRegistry, selection: Option<&DeckSelection>) {
    let decks = build_decks(registry, selection, state.config.deck_size, &mut state.instances);
    for (player, deck) in decks.iter() {
        let mut deck = deck.clone();
        state.rng.shuffle_vector(&mut deck);
        state.players[player].deck = deck;
    }

    let opening = state.config.opening_hand_size;
    for player in PlayerId::both() {
        for _ in 0..opening {
            state.draw_card(player);
        }
    }
    tracing::info!(
        seed = state.config.seed,
        mode = ?state.config.mode,
        deck_one = state.players[PlayerId::ONE].deck.len(),
        deck_two = state.players[PlayerId::TWO].deck.len(),
        "game created"
    );
}

/// Send back the chosen cards, shuffle, and draw as many replacements.
pub(crate) fn mulligan(state: &mut GameState, player: PlayerId, replace: &[CardInstanceId]) -> Result<(), GameError> {
    let mut returned = 0u32;
    for &id in replace {
        let Some(mut card) = state.player_mut(player).take_from_hand(id) else {
            return Err(GameError::internal(format!("{id} vanished from hand during mulligan")));
        };
        card.is_reversed = false;
        state.player_mut(player).deck.push_back(card);
        returned += 1;
    }

    if returned > 0 {
        let mut deck = std::mem::take(&mut state.player_mut(player).deck);
        state.rng.shuffle_vector(&mut deck);
        state.player_mut(player).deck = deck;
        for _ in 0..returned {
            state.draw_card(player);
        }
    }

    let seat = state.player_mut(player);
    seat.mulligan.completed = true;
    seat.mulligan.replaced = returned;
    tracing::debug!(%player, replaced = returned, "mulligan submitted");

    if PlayerId::both().all(|p| state.player(p).mulligan.completed) {
        transition(state, Phase::Action)?;
        state.active_player = PlayerId::ONE;
        state.reset_sequence();
        let round = state.round;
        mana::refill(state.player_mut(PlayerId::ONE), round);
        tracing::info!(round, "mulligan complete, action phase begins");
    }
    Ok(())
}

/// Run the end-turn sequence on a draft.
pub(crate) fn end_turn(state: &mut GameState, evaluator: &WinConditionEvaluator) -> Result<(), GameError> {
    transition(state, Phase::EndRound)?;
    let departing = state.active_player;

    let fired = tick_persistent_effects(state);
    if fired > 0 {
        stack::process(state);
    }
    state.outcome = evaluator.check_outcome(state);
    if state.outcome.is_terminal() {
        return transition(state, Phase::Action);
    }

    state.battlefield.refresh(departing);
    let banked = mana::end_of_turn_rollover(state.player_mut(departing));

    let incoming = departing.opponent();
    state.active_player = incoming;
    state.turn += 1;
    if state.turn % 2 == 1 {
        state.round += 1;
        for p in PlayerId::both() {
            let seat = state.player_mut(p);
            seat.has_attack_token = !seat.has_attack_token;
        }
    }
    state.reset_sequence();

    let round = state.round;
    mana::refill(state.player_mut(incoming), round);
    state.draw_card(incoming);

    tracing::debug!(
        from = %departing,
        to = %incoming,
        turn = state.turn,
        round,
        banked,
        persistent = fired,
        "turn ended"
    );
    transition(state, Phase::Action)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Card, CardDefinition, CardId};
    use crate::core::GameConfig;
    use crate::effects::{EffectKind, EffectTarget, PersistentEffect};
    use crate::victory::Outcome;

    fn dealt(config: GameConfig) -> GameState {
        let mut state = GameState::new(config);
        deal_opening_hands(&mut state, &CardRegistry::builtin(), None);
        state
    }

    fn action_state() -> GameState {
        let mut state = dealt(GameConfig::default());
        for p in PlayerId::both() {
            mulligan(&mut state, p, &[]).unwrap();
        }
        state
    }

    #[test]
    fn test_opening_deal() {
        let state = dealt(GameConfig::default());
        for p in PlayerId::both() {
            assert_eq!(state.players[p].hand.len(), 4);
            assert_eq!(state.players[p].deck.len(), 26);
        }
    }

    #[test]
    fn test_same_seed_same_deal() {
        let a = dealt(GameConfig::default().with_seed(9));
        let b = dealt(GameConfig::default().with_seed(9));
        assert_eq!(a.players, b.players);
    }

    #[test]
    fn test_mulligan_replaces_cards() {
        let mut state = dealt(GameConfig::default());
        let sent: Vec<_> = state.players[PlayerId::ONE].hand.iter().take(2).map(|c| c.id).collect();

        mulligan(&mut state, PlayerId::ONE, &sent).unwrap();
        let seat = &state.players[PlayerId::ONE];
        assert_eq!(seat.hand.len(), 4);
        assert_eq!(seat.deck.len(), 26);
        assert_eq!(seat.mulligan.replaced, 2);
        assert_eq!(state.phase, Phase::Mulligan);
    }

    #[test]
    fn test_both_mulligans_start_play() {
        let state = action_state();
        assert_eq!(state.phase, Phase::Action);
        assert_eq!(state.active_player, PlayerId::ONE);
        assert_eq!(state.players[PlayerId::ONE].mana, 1);
        assert_eq!(state.players[PlayerId::TWO].mana, 0);
    }

    #[test]
    fn test_end_turn_sequence() {
        let mut state = action_state();
        let eval = WinConditionEvaluator::new();

        end_turn(&mut state, &eval).unwrap();
        assert_eq!((state.turn, state.round), (2, 1));
        assert_eq!(state.active_player, PlayerId::TWO);
        assert_eq!(state.attack_token_holder(), PlayerId::ONE);
        assert_eq!(state.players[PlayerId::ONE].spell_mana, 1);
        assert_eq!(state.players[PlayerId::ONE].mana, 0);
        assert_eq!(state.players[PlayerId::TWO].mana, 1);
        assert_eq!(state.players[PlayerId::TWO].hand.len(), 5);

        end_turn(&mut state, &eval).unwrap();
        assert_eq!((state.turn, state.round), (3, 2));
        assert_eq!(state.active_player, PlayerId::ONE);
        assert_eq!(state.attack_token_holder(), PlayerId::TWO);
        assert_eq!(state.players[PlayerId::ONE].max_mana, 2);
        assert_eq!(state.phase, Phase::Action);
    }

    #[test]
    fn test_end_turn_refreshes_departing_units() {
        let mut state = action_state();
        let def = CardDefinition::unit(CardId::new(1), "Acolyte", 1, 1, 2);
        let id = state.instances.next_id();
        let mut card = Card::new(id, &def, PlayerId::ONE);
        card.has_attacked_this_turn = true;
        card.has_summoning_sickness = true;
        state.battlefield.place(PlayerId::ONE, 0, card).unwrap();

        end_turn(&mut state, &WinConditionEvaluator::new()).unwrap();
        assert!(state.battlefield.unit(id).unwrap().can_attack());
    }

    #[test]
    fn test_lethal_persistent_effect_stops_the_turn() {
        let mut state = action_state();
        state.players[PlayerId::TWO].health = 1;
        state.persistent_effects.push_back(PersistentEffect {
            effect: EffectKind::Damage { amount: 1 },
            target: EffectTarget::Player(PlayerId::TWO),
            remaining_turns: 2,
            owner: PlayerId::ONE,
            source: None,
        });

        end_turn(&mut state, &WinConditionEvaluator::new()).unwrap();
        assert_eq!(state.outcome, Outcome::Player1Wins);
        assert_eq!(state.turn, 1);
        assert_eq!(state.active_player, PlayerId::ONE);
        assert_eq!(state.persistent_effects.len(), 1);
    }
}
