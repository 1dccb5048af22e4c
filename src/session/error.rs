//! Error types raised by session stores and game sessions.

use thiserror::Error;

use super::store::GameId;
use crate::core::error::GameError;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("no saved game {0}")]
    UnknownGame(GameId),

    #[error("session lock was poisoned")]
    LockPoisoned,

    #[error("snapshot encoding failed: {0}")]
    Encode(#[source] bincode::Error),

    #[error("snapshot decoding failed: {0}")]
    Decode(#[source] bincode::Error),

    #[error("action rejected: {0}")]
    Rejected(#[from] GameError),
}

pub type Result<T> = std::result::Result<T, SessionError>;
