//! Rules engine trait and the Arcana implementation.
//!
//! The engine is a pure function of `(state, action)`: `apply` returns a new
//! snapshot and leaves the input alone. Hosts and AI players talk to it only
//! through `RulesEngine`.

use smallvec::SmallVec;

use crate::cards::{CardCatalog, CardKind, CardRegistry, DeckSelection};
use crate::core::action::GameAction;
use crate::core::config::GameConfig;
use crate::core::error::GameError;
use crate::core::phase::Phase;
use crate::core::player::PlayerId;
use crate::core::state::GameState;
use crate::effects::EffectTarget;
use crate::victory::{Outcome, WinConditionEvaluator};

use super::{executor, turn, validator};

/// Largest hand whose every mulligan subset is enumerated.
const MULLIGAN_ENUMERATION_LIMIT: usize = 6;

/// Rules engine trait.
///
/// ## Implementation Notes
///
/// - `validate` must not mutate anything
/// - `apply` must be deterministic given the state's RNG
/// - `candidate_actions` may over-approximate; `legal_actions` filters
pub trait RulesEngine {
    /// Get the game configuration.
    fn config(&self) -> &GameConfig;

    /// Check an action against a snapshot.
    fn validate(&self, state: &GameState, action: &GameAction) -> Result<(), GameError>;

    /// Validate and apply an action, returning the next snapshot.
    fn apply(&self, state: &GameState, action: &GameAction) -> Result<GameState, GameError>;

    /// Evaluate win conditions.
    fn check_outcome(&self, state: &GameState) -> Outcome;

    /// Actions worth trying for `player`. Not all need be legal.
    fn candidate_actions(&self, state: &GameState, player: PlayerId) -> Vec<GameAction>;

    // === Convenience Methods ===

    /// Every action `player` may legally take.
    fn legal_actions(&self, state: &GameState, player: PlayerId) -> Vec<GameAction> {
        self.candidate_actions(state, player)
            .into_iter()
            .filter(|action| self.validate(state, action).is_ok())
            .collect()
    }

    fn is_terminal(&self, state: &GameState) -> bool {
        self.check_outcome(state).is_terminal()
    }
}

/// The Arcana ruleset.
///
/// ```
/// use arcana_ccg::core::{GameAction, GameConfig, Phase, PlayerId};
/// use arcana_ccg::rules::{ArcanaEngine, RulesEngine};
///
/// let engine = ArcanaEngine::new(GameConfig::default().with_seed(3));
/// let state = engine.create_initial_state(None);
///
/// let state = engine.apply(&state, &GameAction::mulligan(PlayerId::ONE, &[])).unwrap();
/// let state = engine.apply(&state, &GameAction::mulligan(PlayerId::TWO, &[])).unwrap();
/// assert_eq!(state.phase, Phase::Action);
/// ```
#[derive(Clone, Debug)]
pub struct ArcanaEngine {
    config: GameConfig,
    registry: CardRegistry,
    evaluator: WinConditionEvaluator,
}

impl ArcanaEngine {
    /// Builtin cards and the win conditions of the configured mode.
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        ArcanaEngineBuilder::new(config).build()
    }

    #[must_use]
    pub fn builder(config: GameConfig) -> ArcanaEngineBuilder {
        ArcanaEngineBuilder::new(config)
    }

    #[must_use]
    pub fn registry(&self) -> &CardRegistry {
        &self.registry
    }

    #[must_use]
    pub fn evaluator(&self) -> &WinConditionEvaluator {
        &self.evaluator
    }

    /// Fresh game in the mulligan phase with opening hands dealt.
    ///
    /// Unknown ids in `selection` are skipped; an empty or missing list
    /// falls back to the registry's default deck.
    #[must_use]
    pub fn create_initial_state(&self, selection: Option<&DeckSelection>) -> GameState {
        let mut state = GameState::new(self.config.clone());
        turn::deal_opening_hands(&mut state, &self.registry, selection);
        state
    }

    fn mulligan_candidates(state: &GameState, player: PlayerId, out: &mut Vec<GameAction>) {
        let hand: SmallVec<[_; 8]> = state.player(player).hand.iter().map(|c| c.id).collect();
        if hand.len() > MULLIGAN_ENUMERATION_LIMIT {
            out.push(GameAction::mulligan(player, &[]));
            out.push(GameAction::mulligan(player, &hand));
            return;
        }
        for mask in 0u32..(1 << hand.len()) {
            let chosen: SmallVec<[_; 8]> = hand
                .iter()
                .enumerate()
                .filter(|(i, _)| mask & (1 << i) != 0)
                .map(|(_, id)| *id)
                .collect();
            out.push(GameAction::mulligan(player, &chosen));
        }
    }

    fn play_candidates(state: &GameState, player: PlayerId, out: &mut Vec<GameAction>) {
        for card in state.player(player).hand.iter() {
            let targets: Vec<EffectTarget> = match card.definition.play_ability() {
                Some(ability) if ability.target.requires_choice() => ability.target.candidates(state, player),
                _ => Vec::new(),
            };
            if targets.is_empty() {
                if card.kind() == CardKind::Unit || card.definition.play_ability().is_some() {
                    out.push(GameAction::play(player, card.id));
                }
            } else {
                out.extend(
                    targets
                        .into_iter()
                        .map(|target| GameAction::play_targeted(player, card.id, target)),
                );
            }
        }
    }
}

impl RulesEngine for ArcanaEngine {
    fn config(&self) -> &GameConfig {
        &self.config
    }

    fn validate(&self, state: &GameState, action: &GameAction) -> Result<(), GameError> {
        validator::validate(state, action)
    }

    fn apply(&self, state: &GameState, action: &GameAction) -> Result<GameState, GameError> {
        executor::execute(state, action, &self.evaluator)
    }

    fn check_outcome(&self, state: &GameState) -> Outcome {
        self.evaluator.check_outcome(state)
    }

    fn candidate_actions(&self, state: &GameState, player: PlayerId) -> Vec<GameAction> {
        let mut actions = Vec::new();
        if state.is_terminal() {
            return actions;
        }

        if state.phase == Phase::Mulligan {
            Self::mulligan_candidates(state, player, &mut actions);
            return actions;
        }

        if state.stack.is_window_open() {
            actions.push(GameAction::pass(player));
            Self::play_candidates(state, player, &mut actions);
            return actions;
        }

        Self::play_candidates(state, player, &mut actions);
        let targets = state.battlefield.valid_attack_targets(player.opponent());
        for unit in state.battlefield.attackable_units(player) {
            for &target in &targets {
                actions.push(GameAction::attack(player, unit.id, target));
            }
        }
        actions.push(GameAction::end_turn(player));
        actions
    }
}

/// Builder for `ArcanaEngine`.
#[derive(Clone, Debug)]
pub struct ArcanaEngineBuilder {
    config: GameConfig,
    registry: Option<CardRegistry>,
    evaluator: Option<WinConditionEvaluator>,
}

impl ArcanaEngineBuilder {
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            registry: None,
            evaluator: None,
        }
    }

    #[must_use]
    pub fn registry(mut self, registry: CardRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Load cards from a catalog, falling back to the builtin set.
    #[must_use]
    pub fn catalog(mut self, catalog: &dyn CardCatalog) -> Self {
        self.registry = Some(CardRegistry::load_or_default(catalog));
        self
    }

    /// Replace the mode's default win conditions.
    #[must_use]
    pub fn evaluator(mut self, evaluator: WinConditionEvaluator) -> Self {
        self.evaluator = Some(evaluator);
        self
    }

    #[must_use]
    pub fn build(self) -> ArcanaEngine {
        let evaluator = self
            .evaluator
            .unwrap_or_else(|| WinConditionEvaluator::for_mode(self.config.mode));
        ArcanaEngine {
            registry: self.registry.unwrap_or_else(CardRegistry::builtin),
            evaluator,
            config: self.config,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardId, JsonCatalog};
    use crate::core::action::AttackTarget;

    fn started(engine: &ArcanaEngine) -> GameState {
        let state = engine.create_initial_state(None);
        let state = engine.apply(&state, &GameAction::mulligan(PlayerId::ONE, &[])).unwrap();
        engine.apply(&state, &GameAction::mulligan(PlayerId::TWO, &[])).unwrap()
    }

    #[test]
    fn test_initial_state() {
        let engine = ArcanaEngine::new(GameConfig::default());
        let state = engine.create_initial_state(None);
        assert_eq!(state.phase, Phase::Mulligan);
        assert_eq!(state.players[PlayerId::ONE].hand.len(), 4);
        assert_eq!(state.players[PlayerId::TWO].hand.len(), 4);
    }

    #[test]
    fn test_mulligan_candidates_cover_every_subset() {
        let engine = ArcanaEngine::new(GameConfig::default());
        let state = engine.create_initial_state(None);
        let actions = engine.legal_actions(&state, PlayerId::ONE);
        assert_eq!(actions.len(), 16);
    }

    #[test]
    fn test_legal_actions_are_all_valid() {
        let engine = ArcanaEngine::new(GameConfig::default());
        let state = started(&engine);

        let actions = engine.legal_actions(&state, PlayerId::ONE);
        assert!(actions.contains(&GameAction::end_turn(PlayerId::ONE)));
        for action in &actions {
            assert!(engine.apply(&state, action).is_ok(), "{action:?}");
        }
        assert!(engine.legal_actions(&state, PlayerId::TWO).is_empty());
    }

    #[test]
    fn test_attack_candidates() {
        let engine = ArcanaEngine::new(GameConfig::default());
        let mut state = started(&engine);
        let def = engine.registry().get(CardId::new(5)).unwrap().clone();
        let id = state.instances.next_id();
        state
            .battlefield
            .place(PlayerId::ONE, 0, crate::cards::Card::new(id, &def, PlayerId::ONE))
            .unwrap();

        let fresh = state.instances.next_id();
        let mut card = crate::cards::Card::new(fresh, &def, PlayerId::ONE);
        card.has_summoning_sickness = true;
        state.battlefield.place(PlayerId::ONE, 1, card).unwrap();

        let actions = engine.legal_actions(&state, PlayerId::ONE);
        assert!(actions.contains(&GameAction::attack(PlayerId::ONE, id, AttackTarget::Nexus)));
        assert!(!actions.contains(&GameAction::attack(PlayerId::ONE, fresh, AttackTarget::Nexus)));
    }

    #[test]
    fn test_builder_with_catalog() {
        let json = r#"[{"id": 77, "name": "Lone Squire", "type": "unit", "cost": 1, "attack": 1, "health": 1}]"#;
        let engine = ArcanaEngine::builder(GameConfig::default())
            .catalog(&JsonCatalog::new(json))
            .evaluator(WinConditionEvaluator::new())
            .build();

        assert_eq!(engine.registry().len(), 1);
        assert_eq!(engine.evaluator().condition_names().count(), 0);

        let state = engine.create_initial_state(None);
        assert!(state.players[PlayerId::ONE]
            .hand
            .iter()
            .all(|c| c.definition.id == CardId::new(77)));
    }
}
