//! Deck building.
//!
//! A `DeckSelection` names definition ids per player. Building a deck turns
//! those ids into card instances with game-unique ids. Unknown ids are
//! skipped; an empty or missing selection yields the default deck, which
//! cycles the registry in ascending id order up to the configured size.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::definition::CardId;
use super::instance::Card;
use super::registry::CardRegistry;
use crate::core::entity::InstanceAllocator;
use crate::core::player::{PlayerId, PlayerMap};

/// Chosen deck lists for both players.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeckSelection {
    pub player_one: Vec<CardId>,
    pub player_two: Vec<CardId>,
}

impl DeckSelection {
    #[must_use]
    pub fn new(player_one: Vec<CardId>, player_two: Vec<CardId>) -> Self {
        Self {
            player_one,
            player_two,
        }
    }

    /// Same list for both seats.
    #[must_use]
    pub fn mirrored(list: Vec<CardId>) -> Self {
        Self {
            player_two: list.clone(),
            player_one: list,
        }
    }

    #[must_use]
    pub fn for_player(&self, player: PlayerId) -> &[CardId] {
        if player == PlayerId::ONE {
            &self.player_one
        } else {
            &self.player_two
        }
    }
}

/// Default list: registry ids in ascending order, repeated to `size`.
#[must_use]
pub fn default_list(registry: &CardRegistry, size: usize) -> Vec<CardId> {
    let ids: Vec<CardId> = registry.sorted().iter().map(|d| d.id).collect();
    ids.iter().copied().cycle().take(size).collect()
}

/// Build one player's deck (unshuffled; the top card is the back).
pub fn build_deck(
    registry: &CardRegistry,
    list: &[CardId],
    owner: PlayerId,
    deck_size: usize,
    instances: &mut InstanceAllocator,
) -> Vector<Card> {
    let mut deck = Vector::new();
    for &card_id in list {
        match registry.get(card_id) {
            Some(def) => deck.push_back(Card::new(instances.next_id(), def, owner)),
            None => tracing::warn!(player = %owner, card = %card_id, "unknown card in deck selection, skipped"),
        }
    }

    if deck.is_empty() {
        for card_id in default_list(registry, deck_size) {
            if let Some(def) = registry.get(card_id) {
                deck.push_back(Card::new(instances.next_id(), def, owner));
            }
        }
    }
    deck
}

/// Build both decks in seat order so instance ids are stable for a seed.
pub fn build_decks(
    registry: &CardRegistry,
    selection: Option<&DeckSelection>,
    deck_size: usize,
    instances: &mut InstanceAllocator,
) -> PlayerMap<Vector<Card>> {
    let empty = DeckSelection::default();
    let selection = selection.unwrap_or(&empty);
    let one = build_deck(registry, selection.for_player(PlayerId::ONE), PlayerId::ONE, deck_size, instances);
    let two = build_deck(registry, selection.for_player(PlayerId::TWO), PlayerId::TWO, deck_size, instances);
    let mut decks = PlayerMap::new(|_| Vector::new());
    decks[PlayerId::ONE] = one;
    decks[PlayerId::TWO] = two;
    decks
}
