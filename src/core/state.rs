//! Game state snapshots.
//!
//! A `GameState` is one immutable-by-contract snapshot of a game. The engine
//! never edits a caller's snapshot: it clones it into a draft, mutates the
//! draft, and hands the draft back only if the whole action succeeded.
//!
//! Zones, the battlefield and history use `im` persistent structures, so the
//! clone at the start of every action is O(1) and unchanged parts are shared
//! between consecutive snapshots.
//!
//! ## Invariants
//!
//! - Exactly one player holds the attack token.
//! - `round == (turn + 1) / 2`.
//! - A card instance lives in exactly one zone: hand, deck, slot or graveyard.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::action::{ActionRecord, GameAction};
use super::config::GameConfig;
use super::entity::{CardInstanceId, InstanceAllocator};
use super::phase::Phase;
use super::player::{Player, PlayerId, PlayerMap};
use super::rng::GameRng;
use crate::battlefield::Battlefield;
use crate::cards::Card;
use crate::effects::PersistentEffect;
use crate::stack::EffectStack;
use crate::victory::Outcome;

/// What happened when a player tried to draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DrawResult {
    /// Card went to hand.
    Drawn(CardInstanceId),
    /// Hand was full; card went to the graveyard.
    Burned(CardInstanceId),
    /// Nothing left to draw.
    DeckEmpty,
}

/// Complete game state.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameState {
    pub config: GameConfig,

    // === Progression ===
    /// Starts at 1; increments every second turn.
    pub round: u32,

    /// Starts at 1; increments on every end turn.
    pub turn: u32,

    pub active_player: PlayerId,

    pub phase: Phase,

    // === Table ===
    pub players: PlayerMap<Player>,

    pub battlefield: Battlefield,

    /// Pending spell and ability resolutions.
    pub stack: EffectStack,

    /// Effects that fire on every end-turn tick until they expire.
    pub persistent_effects: Vector<PersistentEffect>,

    // === Terminal ===
    pub outcome: Outcome,

    /// Set by an ability that wins the game outright.
    pub declared_victory: Option<PlayerId>,

    // === Bookkeeping ===
    pub rng: GameRng,

    pub instances: InstanceAllocator,

    pub history: Vector<ActionRecord>,

    action_sequence: u32,
}

impl GameState {
    /// Create an empty table: no cards anywhere, player one active and
    /// holding the attack token, mulligan phase.
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        let health = config.starting_health;
        let mut players = PlayerMap::new(|id| Player::new(id, health));
        players[PlayerId::ONE].has_attack_token = true;

        Self {
            rng: GameRng::new(config.seed),
            config,
            round: 1,
            turn: 1,
            active_player: PlayerId::ONE,
            phase: Phase::Mulligan,
            players,
            battlefield: Battlefield::new(),
            stack: EffectStack::new(),
            persistent_effects: Vector::new(),
            outcome: Outcome::Ongoing,
            declared_victory: None,
            instances: InstanceAllocator::default(),
            history: Vector::new(),
            action_sequence: 0,
        }
    }

    #[must_use]
    pub fn player(&self, id: PlayerId) -> &Player {
        &self.players[id]
    }

    pub fn player_mut(&mut self, id: PlayerId) -> &mut Player {
        &mut self.players[id]
    }

    #[must_use]
    pub fn active(&self) -> &Player {
        &self.players[self.active_player]
    }

    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.outcome.is_terminal()
    }

    /// The player currently allowed to act: the priority holder while
    /// effects wait on the stack, otherwise the active player.
    #[must_use]
    pub fn acting_player(&self) -> PlayerId {
        self.stack.priority_holder().unwrap_or(self.active_player)
    }

    /// Which player holds the attack token.
    #[must_use]
    pub fn attack_token_holder(&self) -> PlayerId {
        if self.players[PlayerId::ONE].has_attack_token {
            PlayerId::ONE
        } else {
            PlayerId::TWO
        }
    }

    // === Cards ===

    /// Draw the top card for `player`, flipping its orientation.
    ///
    /// Orientation is decided here, at draw time, never at deck build.
    pub fn draw_card(&mut self, player: PlayerId) -> DrawResult {
        let max_hand = self.config.max_hand_size;
        let Some(mut card) = self.players[player].pop_deck() else {
            tracing::warn!(%player, "draw from empty deck");
            return DrawResult::DeckEmpty;
        };

        card.is_reversed = self.rng.coin_flip();
        let id = card.id;

        let seat = &mut self.players[player];
        if seat.hand.len() >= max_hand {
            tracing::warn!(%player, card = %id, "hand full, card burned");
            seat.graveyard.push_back(card);
            DrawResult::Burned(id)
        } else {
            tracing::debug!(%player, card = %id, reversed = card.is_reversed, "card drawn");
            seat.hand.push_back(card);
            DrawResult::Drawn(id)
        }
    }

    /// Put a card on top of its owner's graveyard.
    pub fn bury(&mut self, card: Card) {
        self.players[card.owner].graveyard.push_back(card);
    }

    // === History ===

    /// Append an accepted action to the history.
    pub fn record_action(&mut self, action: GameAction) {
        let sequence = self.action_sequence;
        self.action_sequence += 1;
        self.history.push_back(ActionRecord {
            action,
            turn: self.turn,
            sequence,
        });
    }

    /// Reset the per-turn sequence counter.
    pub(crate) fn reset_sequence(&mut self) {
        self.action_sequence = 0;
    }
}
