//! Snapshot persistence.
//!
//! The engine never stores anything itself. Hosts hand a `SessionStore` to
//! each `GameSession`, which saves the state after every accepted action.

use std::fmt;
use std::sync::RwLock;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::error::{Result, SessionError};
use crate::core::state::GameState;

/// Identifier for one game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GameId(pub u64);

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Game({})", self.0)
    }
}

/// Storage for the latest snapshot of each game.
pub trait SessionStore: Send + Sync {
    fn save(&self, id: GameId, state: &GameState) -> Result<()>;

    /// Load a snapshot; `Ok(None)` when the game was never saved.
    fn load(&self, id: GameId) -> Result<Option<GameState>>;

    fn delete(&self, id: GameId) -> Result<()>;

    fn exists(&self, id: GameId) -> bool {
        matches!(self.load(id), Ok(Some(_)))
    }

    /// Every saved game, ascending.
    fn list_games(&self) -> Result<Vec<GameId>> {
        Ok(vec![])
    }
}

/// In-memory store keeping bincode-encoded snapshots.
///
/// Encoding on save means a loaded state never aliases a live one, and
/// exercises the same path a durable store would.
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    snapshots: RwLock<FxHashMap<GameId, Vec<u8>>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Size of a stored snapshot in bytes.
    pub fn snapshot_len(&self, id: GameId) -> Option<usize> {
        self.snapshots.read().ok()?.get(&id).map(Vec::len)
    }
}

impl SessionStore for InMemorySessionStore {
    fn save(&self, id: GameId, state: &GameState) -> Result<()> {
        let bytes = bincode::serialize(state).map_err(SessionError::Encode)?;
        let mut snapshots = self.snapshots.write().map_err(|_| SessionError::LockPoisoned)?;
        tracing::debug!(game = %id, bytes = bytes.len(), "snapshot saved");
        snapshots.insert(id, bytes);
        Ok(())
    }

    fn load(&self, id: GameId) -> Result<Option<GameState>> {
        let snapshots = self.snapshots.read().map_err(|_| SessionError::LockPoisoned)?;
        snapshots
            .get(&id)
            .map(|bytes| bincode::deserialize(bytes).map_err(SessionError::Decode))
            .transpose()
    }

    fn delete(&self, id: GameId) -> Result<()> {
        let mut snapshots = self.snapshots.write().map_err(|_| SessionError::LockPoisoned)?;
        snapshots.remove(&id);
        Ok(())
    }

    fn exists(&self, id: GameId) -> bool {
        self.snapshots
            .read()
            .map(|snapshots| snapshots.contains_key(&id))
            .unwrap_or(false)
    }

    fn list_games(&self) -> Result<Vec<GameId>> {
        let snapshots = self.snapshots.read().map_err(|_| SessionError::LockPoisoned)?;
        let mut ids: Vec<GameId> = snapshots.keys().copied().collect();
        ids.sort_unstable();
        Ok(ids)
    }
}
