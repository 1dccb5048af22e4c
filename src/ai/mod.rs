//! Computer-controlled opponent.
//!
//! ## Key Types
//!
//! - `AiPersonality`: aggression, value scaling, mistake rate, thinking time
//! - `Difficulty`: presets from tutorial to hard
//! - `AiOpponent`: plays a whole turn through any `RulesEngine`
//!
//! Thinking time is advice for the host's scheduler; the AI itself never
//! sleeps.

mod mulligan;
mod opponent;
mod personality;

pub use mulligan::choose_mulligan;
pub use opponent::{AiOpponent, MAX_AI_ACTIONS};
pub use personality::{AiPersonality, Difficulty, MulliganStrategy};
