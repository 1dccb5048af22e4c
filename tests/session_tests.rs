//! Session integration tests.
//!
//! Independent games running side by side on one engine and one store.

use std::sync::{Arc, Mutex};
use std::thread;

use arcana_ccg::ai::{AiOpponent, AiPersonality, Difficulty};
use arcana_ccg::core::{GameAction, GameConfig, GameState, Phase, PlayerId};
use arcana_ccg::rules::ArcanaEngine;
use arcana_ccg::session::{GameId, GameSession, InMemorySessionStore, SessionError, SessionStore, StateListener};

/// Records the turn of every notification.
#[derive(Default)]
struct TurnLog(Mutex<Vec<(GameId, u32)>>);

impl StateListener for TurnLog {
    fn state_changed(&self, game: GameId, state: &GameState) {
        self.0.lock().unwrap().push((game, state.turn));
    }
}

/// Records the history length of every notified state.
#[derive(Default)]
struct HistoryLog(Mutex<Vec<usize>>);

impl StateListener for HistoryLog {
    fn state_changed(&self, _game: GameId, state: &GameState) {
        self.0.lock().unwrap().push(state.history.len());
    }
}

fn drive(session: &GameSession<ArcanaEngine>, ais: &mut [AiOpponent; 2], turns: u32) -> GameState {
    for ai in ais.iter_mut() {
        session.run_ai(ai).unwrap();
    }
    loop {
        let state = session.snapshot().unwrap();
        if state.is_terminal() || state.turn > turns {
            return state;
        }
        let seat = state.acting_player().index();
        session.run_ai(&mut ais[seat]).unwrap();
    }
}

fn pair(seed: u64) -> [AiOpponent; 2] {
    let personality = AiPersonality::for_difficulty(Difficulty::Easy);
    [
        AiOpponent::new(PlayerId::ONE, personality.clone(), seed),
        AiOpponent::new(PlayerId::TWO, personality, seed + 1),
    ]
}

// =============================================================================
// Parallel Games
// =============================================================================

/// Test that several games on separate threads never interfere.
#[test]
fn test_parallel_sessions() {
    let engine = Arc::new(ArcanaEngine::new(GameConfig::default().with_seed(3)));
    let store = Arc::new(InMemorySessionStore::new());
    let log = Arc::new(TurnLog::default());

    let finals: Vec<GameState> = thread::scope(|scope| {
        let handles: Vec<_> = (0..4u64)
            .map(|n| {
                let engine = engine.clone();
                let store: Arc<dyn SessionStore> = store.clone();
                let log = log.clone();
                scope.spawn(move || {
                    let initial = engine.create_initial_state(None);
                    let session = GameSession::start(GameId(n), engine, store, initial)
                        .unwrap()
                        .with_listener(log);
                    drive(&session, &mut pair(100), 6)
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    // Same config and AI seeds: every game plays out identically.
    let bytes: Vec<Vec<u8>> = finals.iter().map(|s| bincode::serialize(s).unwrap()).collect();
    assert!(bytes.windows(2).all(|w| w[0] == w[1]));

    assert_eq!(store.list_games().unwrap(), vec![GameId(0), GameId(1), GameId(2), GameId(3)]);
    for n in 0..4 {
        let saved = store.load(GameId(n)).unwrap().unwrap();
        assert_eq!(bincode::serialize(&saved).unwrap(), bytes[0]);
    }

    let log = log.0.lock().unwrap();
    for n in 0..4 {
        let turns: Vec<u32> = log.iter().filter(|(id, _)| *id == GameId(n)).map(|(_, t)| *t).collect();
        assert!(!turns.is_empty());
        assert!(turns.windows(2).all(|w| w[0] <= w[1]), "turns went backwards in {n}");
    }
}

// =============================================================================
// Persistence
// =============================================================================

/// Test that AI turns persist and notify once per accepted action.
#[test]
fn test_ai_actions_commit_one_by_one() {
    let engine = Arc::new(ArcanaEngine::new(GameConfig::default().with_seed(9)));
    let store = Arc::new(InMemorySessionStore::new());
    let log = Arc::new(HistoryLog::default());
    let session = GameSession::start(GameId(5), engine.clone(), store.clone(), engine.create_initial_state(None))
        .unwrap()
        .with_listener(log.clone());

    let personality = AiPersonality::for_difficulty(Difficulty::Hard);
    let mut ais = [
        AiOpponent::new(PlayerId::ONE, personality.clone(), 31),
        AiOpponent::new(PlayerId::TWO, personality, 32),
    ];
    let state = drive(&session, &mut ais, 4);

    let seen = log.0.lock().unwrap().clone();
    assert_eq!(seen, (1..=state.history.len()).collect::<Vec<_>>());
    assert_eq!(store.load(GameId(5)).unwrap().unwrap().history.len(), state.history.len());
}

/// Test that a resumed session continues where the saved one stopped.
#[test]
fn test_resume_and_continue() {
    let engine = Arc::new(ArcanaEngine::new(GameConfig::default()));
    let store: Arc<dyn SessionStore> = Arc::new(InMemorySessionStore::new());

    {
        let session = GameSession::start(GameId(7), engine.clone(), store.clone(), engine.create_initial_state(None)).unwrap();
        session.submit(&GameAction::mulligan(PlayerId::ONE, &[])).unwrap();
        session.submit(&GameAction::mulligan(PlayerId::TWO, &[])).unwrap();
    }

    let resumed = GameSession::resume(GameId(7), engine, store.clone()).unwrap();
    let state = resumed.snapshot().unwrap();
    assert_eq!(state.phase, Phase::Action);
    assert_eq!(state.history.len(), 2);

    let next = resumed.submit(&GameAction::end_turn(PlayerId::ONE)).unwrap();
    assert_eq!(next.active_player, PlayerId::TWO);
    assert_eq!(store.load(GameId(7)).unwrap().unwrap().turn, 2);
}

/// Test that rejected submissions surface the engine error.
#[test]
fn test_rejected_submission() {
    let engine = Arc::new(ArcanaEngine::new(GameConfig::default()));
    let store = Arc::new(InMemorySessionStore::new());
    let session = GameSession::start(GameId(1), engine.clone(), store, engine.create_initial_state(None)).unwrap();

    let err = session.submit(&GameAction::pass(PlayerId::ONE)).unwrap_err();
    assert!(matches!(err, SessionError::Rejected(_)));
    assert!(session.snapshot().unwrap().history.is_empty());
}

/// Test that deleted games cannot be resumed.
#[test]
fn test_deleted_game() {
    let engine = Arc::new(ArcanaEngine::new(GameConfig::default()));
    let store: Arc<dyn SessionStore> = Arc::new(InMemorySessionStore::new());
    let session = GameSession::start(GameId(2), engine.clone(), store.clone(), engine.create_initial_state(None)).unwrap();
    assert_eq!(session.id(), GameId(2));

    store.delete(GameId(2)).unwrap();
    assert!(!store.exists(GameId(2)));
    assert!(matches!(
        GameSession::resume(GameId(2), engine, store),
        Err(SessionError::UnknownGame(GameId(2)))
    ));
}
