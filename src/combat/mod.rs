//! Combat: direct attacks against units or the defending player.

mod resolver;

pub use resolver::{resolve_direct_attack, CombatReport};
