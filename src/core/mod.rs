//! Core engine types: ids, players, state, actions, RNG, configuration, errors.
//!
//! Everything here is plain data. Rules live in `rules`, `combat`, `stack`
//! and friends; they read and write these types but own none of them.

pub mod entity;
pub mod player;
pub mod rng;
pub mod config;
pub mod phase;
pub mod error;
pub mod action;
pub mod state;

pub use entity::{CardInstanceId, InstanceAllocator};
pub use player::{InvalidSeat, MulliganState, Player, PlayerId, PlayerMap, PLAYER_COUNT};
pub use rng::{GameRng, GameRngState};
pub use config::{
    GameConfig, GameMode, BATTLEFIELD_SLOTS, COUNTER_PRIORITY, MAX_MANA, PERSISTENT_PRIORITY,
    SPELL_MANA_CAP, SPELL_PRIORITY,
};
pub use phase::Phase;
pub use error::GameError;
pub use action::{ActionRecord, AttackTarget, GameAction};
pub use state::{DrawResult, GameState};
