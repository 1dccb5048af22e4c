//! Effect targeting.
//!
//! A `TargetRule` on an ability says what it may hit; binding turns the rule
//! plus the player's requested target into a concrete `EffectTarget`
//! checked against the current snapshot.
//!
//! Rules that need a choice (`EnemyUnit`, `FriendlyUnit`, `AnyUnit`,
//! `EnemyUnitOrNexus`, `StackItem`) accept a requested target or fall back
//! to the first candidate. Fixed rules (`Caster`, `Opponent`, sides, all
//! units) ignore the choice except to check it matches.

use serde::{Deserialize, Serialize};

use super::effect::EffectTarget;
use crate::core::error::GameError;
use crate::core::player::PlayerId;
use crate::core::state::GameState;

/// What an ability may target, relative to its controller.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetRule {
    /// Untargeted.
    #[default]
    None,
    /// The controller.
    Caster,
    /// The controller's opponent.
    Opponent,
    EnemyUnit,
    FriendlyUnit,
    AnyUnit,
    /// An enemy unit or the enemy player.
    EnemyUnitOrNexus,
    /// Every unit on the enemy side.
    EnemySide,
    /// Every unit on the controller's side.
    FriendlySide,
    AllUnits,
    /// A counterable item waiting on the stack.
    StackItem,
}

impl TargetRule {
    /// Whether the player picks among several candidates.
    #[must_use]
    pub fn requires_choice(self) -> bool {
        matches!(
            self,
            TargetRule::EnemyUnit
                | TargetRule::FriendlyUnit
                | TargetRule::AnyUnit
                | TargetRule::EnemyUnitOrNexus
                | TargetRule::StackItem
        )
    }

    /// Every legal target in preference order.
    ///
    /// Units are listed in slot order; stack items in the order they would
    /// resolve.
    #[must_use]
    pub fn candidates(self, state: &GameState, controller: PlayerId) -> Vec<EffectTarget> {
        let enemy = controller.opponent();
        let units_of = |side: PlayerId| {
            state
                .battlefield
                .units(side)
                .map(|c| EffectTarget::Unit(c.id))
                .collect::<Vec<_>>()
        };

        match self {
            TargetRule::None => vec![EffectTarget::None],
            TargetRule::Caster => vec![EffectTarget::Player(controller)],
            TargetRule::Opponent => vec![EffectTarget::Player(enemy)],
            TargetRule::EnemySide => vec![EffectTarget::Side(enemy)],
            TargetRule::FriendlySide => vec![EffectTarget::Side(controller)],
            TargetRule::AllUnits => vec![EffectTarget::AllUnits],
            TargetRule::EnemyUnit => units_of(enemy),
            TargetRule::FriendlyUnit => units_of(controller),
            TargetRule::AnyUnit => {
                let mut all = units_of(enemy);
                all.extend(units_of(controller));
                all
            }
            TargetRule::EnemyUnitOrNexus => {
                let mut all = vec![EffectTarget::Player(enemy)];
                all.extend(units_of(enemy));
                all
            }
            TargetRule::StackItem => state
                .stack
                .resolution_order()
                .into_iter()
                .filter(|item| item.can_be_countered)
                .map(|item| EffectTarget::StackItem(item.id))
                .collect(),
        }
    }

    /// Check a concrete target against the rule.
    pub fn check(self, state: &GameState, controller: PlayerId, target: EffectTarget) -> Result<(), GameError> {
        if self.candidates(state, controller).contains(&target) {
            Ok(())
        } else {
            Err(GameError::invalid_target(format!(
                "{target:?} is not a legal target for {self:?}"
            )))
        }
    }

    /// The target used when the player does not choose one.
    #[must_use]
    pub fn auto_target(self, state: &GameState, controller: PlayerId) -> Option<EffectTarget> {
        self.candidates(state, controller).into_iter().next()
    }

    /// Bind a requested target, or pick one.
    ///
    /// Returns `Ok(None)` when nothing is requested and no candidate exists.
    pub fn bind(
        self,
        state: &GameState,
        controller: PlayerId,
        requested: Option<EffectTarget>,
    ) -> Result<Option<EffectTarget>, GameError> {
        match requested {
            Some(target) => {
                self.check(state, controller, target)?;
                Ok(Some(target))
            }
            None => Ok(self.auto_target(state, controller)),
        }
    }
}
