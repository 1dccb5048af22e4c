//! Player identification, per-player storage, and the player record.
//!
//! ## PlayerId
//!
//! The game is strictly two-player: `PlayerId::ONE` and `PlayerId::TWO`.
//!
//! ## PlayerMap
//!
//! Per-player data storage indexed by `PlayerId`.
//!
//! ## Player
//!
//! Health, mana pools, zones and attack token for one side of the table.

use im::Vector;
use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};
use thiserror::Error;

use crate::cards::Card;
use crate::core::entity::CardInstanceId;

/// Number of seats at the table.
pub const PLAYER_COUNT: usize = 2;

/// Player identifier.
///
/// Player indices are 0-based: player one is seat 0. Only the two seats
/// exist; out-of-range ids are refused on construction and deserialization.
///
/// ```
/// use arcana_ccg::core::PlayerId;
///
/// assert_eq!(PlayerId::new(1), Some(PlayerId::TWO));
/// assert_eq!(PlayerId::new(2), None);
/// assert!(serde_json::from_str::<PlayerId>("2").is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct PlayerId(u8);

/// A seat number outside `0..PLAYER_COUNT`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("no seat {0} at a {PLAYER_COUNT}-player table")]
pub struct InvalidSeat(pub u8);

impl PlayerId {
    /// First player. Starts active and holds the first attack token.
    pub const ONE: PlayerId = PlayerId(0);
    /// Second player.
    pub const TWO: PlayerId = PlayerId(1);

    /// The seat with index `id`, if there is one.
    #[must_use]
    pub const fn new(id: u8) -> Option<Self> {
        if (id as usize) < PLAYER_COUNT {
            Some(Self(id))
        } else {
            None
        }
    }

    /// Get the raw player index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The other seat.
    #[must_use]
    pub const fn opponent(self) -> Self {
        Self(1 - self.0)
    }

    /// Both players in seat order.
    pub fn both() -> impl Iterator<Item = PlayerId> {
        [PlayerId::ONE, PlayerId::TWO].into_iter()
    }
}

impl TryFrom<u8> for PlayerId {
    type Error = InvalidSeat;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        Self::new(id).ok_or(InvalidSeat(id))
    }
}

impl From<PlayerId> for u8 {
    fn from(player: PlayerId) -> Self {
        player.0
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0 + 1)
    }
}

/// Per-player data storage with O(1) access.
///
/// ```
/// use arcana_ccg::core::{PlayerId, PlayerMap};
///
/// let mut health: PlayerMap<i32> = PlayerMap::new(|_| 20);
/// health[PlayerId::TWO] -= 3;
///
/// assert_eq!(health[PlayerId::ONE], 20);
/// assert_eq!(health[PlayerId::TWO], 17);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: [T; PLAYER_COUNT],
}

impl<T> PlayerMap<T> {
    /// Create a map with values from a factory function.
    pub fn new(factory: impl Fn(PlayerId) -> T) -> Self {
        Self {
            data: [factory(PlayerId::ONE), factory(PlayerId::TWO)],
        }
    }

    /// Create a map with both entries set to the same value.
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self::new(|_| value.clone())
    }

    /// Get a reference to a player's data.
    #[must_use]
    pub fn get(&self, player: PlayerId) -> &T {
        &self.data[player.index()]
    }

    /// Get a mutable reference to a player's data.
    pub fn get_mut(&mut self, player: PlayerId) -> &mut T {
        &mut self.data[player.index()]
    }

    /// Iterate over (PlayerId, &T) pairs in seat order.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }

    /// Iterate over (PlayerId, &mut T) pairs in seat order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (PlayerId, &mut T)> {
        self.data
            .iter_mut()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        self.get(player)
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        self.get_mut(player)
    }
}

/// Mulligan bookkeeping for one player.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MulliganState {
    /// Player has submitted their mulligan (possibly replacing nothing).
    pub completed: bool,
    /// Number of cards sent back.
    pub replaced: u32,
}

/// One side of the table.
///
/// Zones use `im::Vector` so snapshots share structure. The deck's top card
/// is the back of the vector.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    /// Goes negative on overkill; alive while > 0.
    pub health: i32,
    pub mana: u32,
    pub max_mana: u32,
    /// Banked mana from previous turns, 0..=3.
    pub spell_mana: u32,
    pub hand: Vector<Card>,
    pub deck: Vector<Card>,
    pub graveyard: Vector<Card>,
    pub has_attack_token: bool,
    pub mulligan: MulliganState,
}

impl Player {
    /// Create a player with empty zones and pools.
    #[must_use]
    pub fn new(id: PlayerId, health: i32) -> Self {
        Self {
            id,
            health,
            mana: 0,
            max_mana: 0,
            spell_mana: 0,
            hand: Vector::new(),
            deck: Vector::new(),
            graveyard: Vector::new(),
            has_attack_token: false,
            mulligan: MulliganState::default(),
        }
    }

    /// Regular plus banked mana.
    #[must_use]
    pub fn total_mana(&self) -> u32 {
        self.mana.saturating_add(self.spell_mana)
    }

    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Find a card in hand.
    #[must_use]
    pub fn hand_card(&self, id: CardInstanceId) -> Option<&Card> {
        self.hand.iter().find(|c| c.id == id)
    }

    /// Remove a card from hand, returning it.
    pub fn take_from_hand(&mut self, id: CardInstanceId) -> Option<Card> {
        let pos = self.hand.iter().position(|c| c.id == id)?;
        Some(self.hand.remove(pos))
    }

    /// Pop the top card of the deck.
    pub fn pop_deck(&mut self) -> Option<Card> {
        self.deck.pop_back()
    }
}
