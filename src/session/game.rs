//! One live game.
//!
//! A `GameSession` is the single writer for its game: submissions take the
//! session's mutex, run through the engine, and the accepted state is
//! persisted before anyone is notified. Independent sessions share nothing
//! but the engine and store handles.

use std::sync::{Arc, Mutex};

use super::error::{Result, SessionError};
use super::store::{GameId, SessionStore};
use crate::ai::AiOpponent;
use crate::core::action::GameAction;
use crate::core::state::GameState;
use crate::rules::RulesEngine;
use crate::victory::Outcome;

/// Transport hook notified after every accepted change.
pub trait StateListener: Send + Sync {
    fn state_changed(&self, game: GameId, state: &GameState);
}

/// A game bound to an engine and a store.
pub struct GameSession<E: RulesEngine> {
    id: GameId,
    engine: Arc<E>,
    store: Arc<dyn SessionStore>,
    listener: Option<Arc<dyn StateListener>>,
    state: Mutex<GameState>,
}

impl<E: RulesEngine> GameSession<E> {
    /// Start a session from `initial` and persist it.
    pub fn start(id: GameId, engine: Arc<E>, store: Arc<dyn SessionStore>, initial: GameState) -> Result<Self> {
        store.save(id, &initial)?;
        tracing::info!(game = %id, "session started");
        Ok(Self {
            id,
            engine,
            store,
            listener: None,
            state: Mutex::new(initial),
        })
    }

    /// Resume a previously saved game.
    pub fn resume(id: GameId, engine: Arc<E>, store: Arc<dyn SessionStore>) -> Result<Self> {
        let state = store.load(id)?.ok_or(SessionError::UnknownGame(id))?;
        tracing::info!(game = %id, turn = state.turn, "session resumed");
        Ok(Self {
            id,
            engine,
            store,
            listener: None,
            state: Mutex::new(state),
        })
    }

    #[must_use]
    pub fn with_listener(mut self, listener: Arc<dyn StateListener>) -> Self {
        self.listener = Some(listener);
        self
    }

    pub fn id(&self) -> GameId {
        self.id
    }

    /// Copy of the current state.
    pub fn snapshot(&self) -> Result<GameState> {
        let state = self.state.lock().map_err(|_| SessionError::LockPoisoned)?;
        Ok(state.clone())
    }

    pub fn outcome(&self) -> Result<Outcome> {
        Ok(self.snapshot()?.outcome)
    }

    /// Validate and apply one action.
    ///
    /// A rejected action leaves the session untouched and is returned as
    /// `SessionError::Rejected`.
    pub fn submit(&self, action: &GameAction) -> Result<GameState> {
        let mut state = self.state.lock().map_err(|_| SessionError::LockPoisoned)?;
        let next = self.engine.apply(&state, action).map_err(|err| {
            tracing::debug!(game = %self.id, action = action.kind(), error = %err, "action rejected");
            err
        })?;
        self.commit(&mut state, next)
    }

    /// Let an AI seat take its turn.
    ///
    /// Each AI action is committed on its own, so the store and listener
    /// see every accepted state, exactly as with `submit`.
    pub fn run_ai(&self, ai: &mut AiOpponent) -> Result<GameState> {
        let mut state = self.state.lock().map_err(|_| SessionError::LockPoisoned)?;
        let start = state.clone();
        ai.play_turn(self.engine.as_ref(), &start, |current: &GameState, action: &GameAction| -> Result<GameState> {
            let next = self.engine.apply(current, action)?;
            self.commit(&mut state, next)
        })
    }

    fn commit(&self, current: &mut GameState, next: GameState) -> Result<GameState> {
        self.store.save(self.id, &next)?;
        *current = next;
        if let Some(listener) = &self.listener {
            listener.state_changed(self.id, current);
        }
        Ok(current.clone())
    }
}
