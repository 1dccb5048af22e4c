//! Session management: per-game single-writer handles and snapshot stores.
//!
//! There is no global registry of live games. Hosts construct a store,
//! share it between sessions, and keep the sessions wherever they like.

mod error;
mod game;
mod store;

pub use error::{Result, SessionError};
pub use game::{GameSession, StateListener};
pub use store::{GameId, InMemorySessionStore, SessionStore};
