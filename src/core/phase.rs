//! Turn phases and the legal transitions between them.
//!
//! ```text
//! mulligan ──> action ──> combat_resolution ──> action
//!                 │
//!                 └──> end_round ──> action (next player)
//! ```
//!
//! `combat_resolution` and `end_round` are transient: the engine enters and
//! leaves them inside a single action, so callers only ever observe
//! `mulligan` or `action` in a returned snapshot.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Mulligan,
    Action,
    CombatResolution,
    EndRound,
}

impl Phase {
    /// Whether the state machine allows `self -> next`.
    #[must_use]
    pub fn can_transition_to(self, next: Phase) -> bool {
        matches!(
            (self, next),
            (Phase::Mulligan, Phase::Action)
                | (Phase::Action, Phase::CombatResolution)
                | (Phase::CombatResolution, Phase::Action)
                | (Phase::Action, Phase::EndRound)
                | (Phase::EndRound, Phase::Action)
        )
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Mulligan => "mulligan",
            Phase::Action => "action",
            Phase::CombatResolution => "combat_resolution",
            Phase::EndRound => "end_round",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
