//! Effect stack and resolution.
//!
//! Every spell and ability resolves through the stack. Two modes share the
//! same structure:
//!
//! - **Immediate** (default): the engine drains the stack right after each push
//! - **Response window**: a cast spell waits while the opponent may respond
//!   or pass; two passes in a row drain it
//!
//! ## Example Usage
//!
//! ```
//! use arcana_ccg::core::{GameConfig, GameState, PlayerId, SPELL_PRIORITY};
//! use arcana_ccg::effects::{EffectKind, EffectTarget};
//! use arcana_ccg::stack::{process, ResolutionStatus, StackMetadata};
//!
//! let mut state = GameState::new(GameConfig::default());
//! state.stack.add_to_stack(
//!     EffectKind::Damage { amount: 3 },
//!     EffectTarget::Player(PlayerId::TWO),
//!     StackMetadata {
//!         priority: SPELL_PRIORITY,
//!         source_player: PlayerId::ONE,
//!         source_card: None,
//!         can_be_countered: true,
//!     },
//! );
//!
//! assert_eq!(process(&mut state), ResolutionStatus::Complete { resolved: 1 });
//! assert_eq!(state.player(PlayerId::TWO).health, 17);
//! ```

mod priority;
mod resolution;

pub use priority::{EffectStack, PassOutcome, StackItem, StackItemId, StackMetadata};
pub use resolution::{process, resolve_stack, settle_deaths, ResolutionStatus, MAX_RESOLUTION_STEPS};
