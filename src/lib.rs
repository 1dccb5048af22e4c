//! # arcana-ccg
//!
//! Deterministic rules engine for a two-player, slot-based collectible card
//! game with tarot-style orientation, a priority effect stack and an AI
//! opponent.
//!
//! ## Design Principles
//!
//! 1. **Snapshots, not mutation**: `RulesEngine::apply` takes a state and
//!    returns the next one. A rejected action leaves its input untouched.
//!
//! 2. **Explicit instances**: engines, evaluators, AI seats and session
//!    stores are values constructed per game. There is no global state, so
//!    any number of games run side by side.
//!
//! 3. **Typed content**: card abilities are data (`EffectKind`,
//!    `TargetRule`) compiled once from the catalog, dispatched by exhaustive
//!    matching.
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: zones, battlefield and history use
//!   `im`, so the per-action clone is O(1).
//!
//! - **Deterministic RNG**: shuffles, draw orientation and AI noise come
//!   from seeded ChaCha8 streams.
//!
//! ## Modules
//!
//! - `core`: ids, players, state, actions, RNG, configuration, errors
//! - `cards`: definitions, instances, registry, catalog, decks
//! - `effects`: effect kinds, targeting, resolution, persistent effects
//! - `stack`: priority-ordered effect stack and response windows
//! - `battlefield`: the seven slots per side
//! - `mana`: payment, rollover and refill
//! - `combat`: direct attacks
//! - `victory`: win condition evaluation
//! - `rules`: validation, execution, turn structure
//! - `ai`: computer opponent
//! - `session`: single-writer game sessions and snapshot stores

pub mod core;
pub mod cards;
pub mod effects;
pub mod stack;
pub mod battlefield;
pub mod mana;
pub mod combat;
pub mod victory;
pub mod rules;
pub mod ai;
pub mod session;

// Re-export commonly used types
pub use crate::core::{
    AttackTarget, CardInstanceId, GameAction, GameConfig, GameError, GameMode, GameRng, GameState, Phase,
    Player, PlayerId, PlayerMap,
};

pub use crate::cards::{
    Ability, AbilityTrigger, Card, CardCatalog, CardDefinition, CardId, CardKind, CardRegistry, DeckSelection,
    JsonCatalog, Keyword,
};

pub use crate::effects::{EffectKind, EffectTarget, TargetRule};

pub use crate::stack::{EffectStack, ResolutionStatus, StackItem, StackItemId};

pub use crate::victory::{Outcome, WinConditionEvaluator};

pub use crate::rules::{ArcanaEngine, RulesEngine};

pub use crate::ai::{AiOpponent, AiPersonality, Difficulty};

pub use crate::session::{GameId, GameSession, InMemorySessionStore, SessionError, SessionStore};
