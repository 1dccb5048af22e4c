//! Win condition evaluation.
//!
//! ## Key Types
//!
//! - `Outcome`: player one wins, player two wins, or ongoing
//! - `AlternativeWinCondition`: pluggable per game mode
//! - `WinConditionEvaluator`: alternatives first, then health depletion

mod conditions;
mod evaluator;

pub use conditions::{AlternativeWinCondition, BoardDomination, DeclaredVictory};
pub use evaluator::{Outcome, WinConditionEvaluator};
