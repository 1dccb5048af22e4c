//! The AI opponent.
//!
//! Decisions are greedy over the engine's legal actions:
//!
//! - **Plays**: highest value density first, `(attack + health) / max(1, cost)`
//!   for units and an effect estimate for spells, until nothing affordable
//!   scores above zero
//! - **Attacks**: only while holding the attack token; each attacker takes
//!   its best trade with probability `aggression`, lethal always
//! - **Responses**: counter the opponent's pending effect when possible,
//!   otherwise pass
//!
//! Every decision is first exposed to `mistake_chance`, which swaps it for
//! a uniformly random legal action.

use crate::cards::{Card, CardKind};
use crate::core::action::{AttackTarget, GameAction};
use crate::core::entity::CardInstanceId;
use crate::core::error::GameError;
use crate::core::phase::Phase;
use crate::core::player::PlayerId;
use crate::core::rng::GameRng;
use crate::core::state::GameState;
use crate::effects::{EffectKind, EffectTarget};
use crate::rules::RulesEngine;

use super::mulligan::choose_mulligan;
use super::personality::AiPersonality;

/// Hard cap on actions submitted in one `resolve_turn`.
pub const MAX_AI_ACTIONS: usize = 64;

/// Score bonus for an attack that ends the game.
const LETHAL_BONUS: f64 = 100.0;

/// An AI seat.
#[derive(Clone, Debug)]
pub struct AiOpponent {
    pub personality: AiPersonality,
    pub player: PlayerId,
    rng: GameRng,
}

impl AiOpponent {
    #[must_use]
    pub fn new(player: PlayerId, personality: AiPersonality, seed: u64) -> Self {
        Self {
            personality,
            player,
            rng: GameRng::new(seed),
        }
    }

    /// Act until the AI has nothing left to do: the turn is handed over,
    /// priority moves to the other player, or the game ends.
    ///
    /// Returns the input state unchanged when it is not the AI's move.
    pub fn resolve_turn<E: RulesEngine>(&mut self, engine: &E, state: &GameState) -> Result<GameState, GameError> {
        self.play_turn(engine, state, |current, action| engine.apply(current, action))
    }

    /// Like `resolve_turn`, but every chosen action goes through `submit`,
    /// which returns the accepted state. Hosts use this to persist and
    /// broadcast each action as it lands.
    pub fn play_turn<E, F, Err>(&mut self, engine: &E, state: &GameState, mut submit: F) -> Result<GameState, Err>
    where
        E: RulesEngine,
        F: FnMut(&GameState, &GameAction) -> Result<GameState, Err>,
    {
        let mut current = state.clone();
        let mut declined: Vec<CardInstanceId> = Vec::new();

        for _ in 0..MAX_AI_ACTIONS {
            let Some(action) = self.next_action(engine, &current, &mut declined) else {
                break;
            };
            tracing::debug!(player = %self.player, action = action.kind(), "ai action");
            current = submit(&current, &action)?;
            if matches!(action, GameAction::EndTurn { .. } | GameAction::PassPriority { .. }) {
                break;
            }
        }
        Ok(current)
    }

    /// The single next action, or `None` when it is not the AI's move.
    pub fn choose_action<E: RulesEngine>(&mut self, engine: &E, state: &GameState) -> Option<GameAction> {
        self.next_action(engine, state, &mut Vec::new())
    }

    fn next_action<E: RulesEngine>(
        &mut self,
        engine: &E,
        state: &GameState,
        declined: &mut Vec<CardInstanceId>,
    ) -> Option<GameAction> {
        if state.is_terminal() {
            return None;
        }

        if state.phase == Phase::Mulligan {
            if state.player(self.player).mulligan.completed {
                return None;
            }
            let hand: Vec<Card> = state.player(self.player).hand.iter().cloned().collect();
            let replace = choose_mulligan(self.personality.mulligan_strategy, &hand, &mut self.rng);
            return Some(GameAction::mulligan(self.player, &replace));
        }

        if state.acting_player() != self.player {
            return None;
        }

        let legal = engine.legal_actions(state, self.player);
        if legal.is_empty() {
            return None;
        }

        if self.rng.chance(self.personality.mistake_chance) {
            let pick = self.rng.gen_range_usize(0..legal.len());
            tracing::debug!(player = %self.player, "ai mistake, random action");
            return Some(legal[pick].clone());
        }

        if state.stack.is_window_open() {
            return Some(self.respond(state, &legal));
        }

        if let Some(play) = self.best_play(state, &legal) {
            return Some(play);
        }
        if let Some(attack) = self.best_attack(state, &legal, declined) {
            return Some(attack);
        }
        Some(GameAction::end_turn(self.player))
    }

    fn respond(&self, state: &GameState, legal: &[GameAction]) -> GameAction {
        let counter = legal.iter().find(|action| match action {
            GameAction::PlayCard {
                target: Some(EffectTarget::StackItem(item)),
                ..
            } => state
                .stack
                .get(*item)
                .is_some_and(|pending| pending.source_player != self.player),
            _ => false,
        });
        counter.cloned().unwrap_or_else(|| GameAction::pass(self.player))
    }

    fn best_play(&mut self, state: &GameState, legal: &[GameAction]) -> Option<GameAction> {
        let jitter = self.personality.score_jitter();
        let mut best: Option<(f64, &GameAction)> = None;

        for action in legal {
            let GameAction::PlayCard { card, target, .. } = action else {
                continue;
            };
            let Some(card) = state.player(self.player).hand_card(*card) else {
                continue;
            };
            let raw = play_value(state, self.player, card, *target);
            if raw <= 0.0 {
                continue;
            }
            let noise = 1.0 + jitter * (self.rng.unit() - 0.5);
            let score = raw * self.personality.value_scale * noise;
            if best.map_or(true, |(top, _)| score > top) {
                best = Some((score, action));
            }
        }
        best.map(|(_, action)| action.clone())
    }

    fn best_attack(
        &mut self,
        state: &GameState,
        legal: &[GameAction],
        declined: &mut Vec<CardInstanceId>,
    ) -> Option<GameAction> {
        let mut best: Option<(f64, CardInstanceId, &GameAction)> = None;
        for action in legal {
            let GameAction::Attack { attacker, target, .. } = action else {
                continue;
            };
            if declined.contains(attacker) {
                continue;
            }
            let score = attack_value(state, self.player, *attacker, *target);
            if score > 0.0 && best.map_or(true, |(top, _, _)| score > top) {
                best = Some((score, *attacker, action));
            }
        }

        let (score, attacker, action) = best?;
        if score >= LETHAL_BONUS || self.rng.chance(self.personality.aggression) {
            Some(action.clone())
        } else {
            tracing::debug!(player = %self.player, %attacker, "ai holds back attacker");
            declined.push(attacker);
            self.best_attack(state, legal, declined)
        }
    }
}

/// Value of playing `card` at `target`, per mana spent.
fn play_value(state: &GameState, player: PlayerId, card: &Card, target: Option<EffectTarget>) -> f64 {
    let cost = f64::from(card.cost().max(1));
    let body = match card.kind() {
        CardKind::Unit => f64::from(card.attack() + card.max_health()),
        CardKind::Spell => 0.0,
    };
    let effect = card
        .definition
        .play_ability()
        .map_or(0.0, |ability| effect_value(state, player, ability.effect_for(card.is_reversed), target));
    (body + effect) / cost
}

fn effect_value(state: &GameState, player: PlayerId, effect: &EffectKind, target: Option<EffectTarget>) -> f64 {
    let enemy = player.opponent();
    match effect {
        EffectKind::Damage { amount } => match target {
            Some(EffectTarget::Player(p)) if p == enemy => f64::from(*amount),
            Some(EffectTarget::Unit(id)) => match state.battlefield.unit(id) {
                Some(unit) if unit.owner == enemy && unit.current_health <= *amount => {
                    f64::from(unit.attack() + unit.max_health())
                }
                Some(unit) if unit.owner == enemy => f64::from(*amount) * 0.5,
                _ => -1.0,
            },
            Some(EffectTarget::Side(p)) if p == enemy => f64::from(*amount * state.battlefield.occupied(p) as i32),
            _ => 0.0,
        },
        EffectKind::Heal { amount } => {
            let missing = state.config.starting_health - state.player(player).health;
            f64::from((*amount).min(missing.max(0))) * 0.5
        }
        EffectKind::DrawCards { count } => f64::from(*count) * 1.5,
        EffectKind::GainMana { amount } => f64::from(*amount),
        EffectKind::GainSpellMana { amount } => f64::from(*amount) * 0.5,
        EffectKind::DestroyByHealthThreshold { max_health } => state
            .battlefield
            .units(enemy)
            .filter(|u| u.current_health <= *max_health)
            .map(|u| f64::from(u.attack() + u.max_health()))
            .sum(),
        EffectKind::Buff { attack, health } => match target {
            Some(EffectTarget::Unit(id)) if state.battlefield.unit(id).is_some_and(|u| u.owner == player) => {
                f64::from(attack + health)
            }
            _ => 0.0,
        },
        // Only worth playing in answer to something.
        EffectKind::Counter => 0.0,
        EffectKind::Lingering { effect, turns } => effect_value(state, player, effect, target) * f64::from(*turns),
        EffectKind::DeclareVictory => LETHAL_BONUS,
    }
}

/// How good an attack is for `player`.
fn attack_value(state: &GameState, player: PlayerId, attacker: CardInstanceId, target: AttackTarget) -> f64 {
    let Some(unit) = state.battlefield.unit(attacker) else {
        return 0.0;
    };
    let power = unit.attack();
    match target {
        AttackTarget::Nexus => {
            if power >= state.player(player.opponent()).health {
                LETHAL_BONUS
            } else {
                f64::from(power)
            }
        }
        AttackTarget::Unit(id) => {
            let Some(defender) = state.battlefield.unit(id) else {
                return 0.0;
            };
            let kills = power >= defender.current_health;
            let dies = defender.attack() >= unit.current_health;
            let gained = if kills {
                f64::from(defender.attack() + defender.max_health())
            } else {
                0.0
            };
            let lost = if dies {
                f64::from(unit.attack() + unit.max_health())
            } else {
                0.0
            };
            gained - lost
        }
    }
}
