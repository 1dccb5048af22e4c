//! Effect system for card abilities.
//!
//! - `EffectKind`: the closed set of typed effects an ability can carry
//! - `TargetRule` / `EffectTarget`: what an ability may hit, and what it hit
//! - `EffectResolver`: applies one effect to game state
//! - `PersistentEffect`: lingering effects that fire on end-turn ticks
//!
//! Effects never run directly from an action; they go through the stack,
//! which calls the resolver one item at a time.

mod effect;
mod persistent;
mod resolver;
mod targeting;

pub use effect::{EffectKind, EffectTarget};
pub use persistent::{tick_persistent_effects, PersistentEffect};
pub use resolver::{EffectContext, EffectResolver, ResolveResult};
pub use targeting::TargetRule;
