//! The Arcana rules: validation, action execution and turn structure.
//!
//! Hosts talk to `RulesEngine`:
//! - `validate` judges an action against a snapshot without touching it
//! - `apply` returns the next snapshot
//! - `legal_actions` enumerates what a player may do
//!
//! The validator and executor share one check order, so an action that
//! validates always applies.

pub mod engine;
mod executor;
mod turn;
pub mod validator;

pub use engine::{ArcanaEngine, ArcanaEngineBuilder, RulesEngine};
pub use turn::deal_opening_hands;
pub use validator::PlayPlan;
