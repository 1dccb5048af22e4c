//! Lingering effects.
//!
//! A `Lingering` ability registers a `PersistentEffect`. Each end-turn tick
//! pushes one copy of the inner effect onto the stack and counts down; the
//! entry is dropped once its count reaches zero.

use serde::{Deserialize, Serialize};

use super::effect::{EffectKind, EffectTarget};
use crate::core::config::PERSISTENT_PRIORITY;
use crate::core::entity::CardInstanceId;
use crate::core::player::PlayerId;
use crate::core::state::GameState;
use crate::stack::StackMetadata;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistentEffect {
    pub effect: EffectKind,
    pub target: EffectTarget,
    /// Ticks left, including the next one.
    pub remaining_turns: u32,
    pub owner: PlayerId,
    pub source: Option<CardInstanceId>,
}

impl PersistentEffect {
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.remaining_turns == 0
    }
}

/// Queue one firing of every persistent effect and count them down.
///
/// Returns how many items were pushed. The caller drains the stack.
pub fn tick_persistent_effects(state: &mut GameState) -> usize {
    let mut fired = 0;
    let mut survivors = im::Vector::new();

    for mut entry in std::mem::take(&mut state.persistent_effects) {
        if entry.is_expired() {
            continue;
        }
        state.stack.add_to_stack(
            entry.effect.clone(),
            entry.target,
            StackMetadata {
                priority: PERSISTENT_PRIORITY,
                source_player: entry.owner,
                source_card: entry.source,
                can_be_countered: false,
            },
        );
        fired += 1;
        entry.remaining_turns -= 1;
        if entry.is_expired() {
            tracing::debug!(owner = %entry.owner, effect = entry.effect.name(), "persistent effect expired");
        } else {
            survivors.push_back(entry);
        }
    }

    state.persistent_effects = survivors;
    fired
}
