//! Effect kinds and resolved targets.
//!
//! Every card ability compiles to one `EffectKind`. Effects are a closed,
//! strongly-typed set dispatched by exhaustive matching; nothing here parses
//! rules text.

use serde::{Deserialize, Serialize};

use crate::core::config::{COUNTER_PRIORITY, SPELL_PRIORITY};
use crate::core::entity::CardInstanceId;
use crate::core::player::PlayerId;
use crate::stack::StackItemId;

/// An atomic game effect.
///
/// ## Player effects
///
/// - `Damage` / `Heal`: change a player's health (heals stop at starting health)
/// - `DrawCards`: draw from the target player's deck
/// - `GainMana` / `GainSpellMana`: ramp this turn, or bank spell mana
///
/// ## Unit effects
///
/// - `Damage` / `Heal` / `Buff` on one unit, one side, or every unit
/// - `DestroyByHealthThreshold`: destroy units at or below a health value
///
/// ## Stack and game effects
///
/// - `Counter`: remove a pending stack item without resolving it
/// - `Lingering`: fire `effect` on each end-turn tick for `turns` ticks
/// - `DeclareVictory`: the controller wins (when the game mode allows it)
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectKind {
    Damage { amount: i32 },
    Heal { amount: i32 },
    DrawCards { count: u32 },
    GainMana { amount: u32 },
    GainSpellMana { amount: u32 },
    DestroyByHealthThreshold { max_health: i32 },
    Buff { attack: i32, health: i32 },
    Counter,
    Lingering { effect: Box<EffectKind>, turns: u32 },
    DeclareVictory,
}

impl EffectKind {
    /// Stack priority when the ability does not override it.
    #[must_use]
    pub fn default_priority(&self) -> i32 {
        match self {
            EffectKind::Counter => COUNTER_PRIORITY,
            _ => SPELL_PRIORITY,
        }
    }

    /// Short name for logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            EffectKind::Damage { .. } => "damage",
            EffectKind::Heal { .. } => "heal",
            EffectKind::DrawCards { .. } => "draw_cards",
            EffectKind::GainMana { .. } => "gain_mana",
            EffectKind::GainSpellMana { .. } => "gain_spell_mana",
            EffectKind::DestroyByHealthThreshold { .. } => "destroy_by_health_threshold",
            EffectKind::Buff { .. } => "buff",
            EffectKind::Counter => "counter",
            EffectKind::Lingering { .. } => "lingering",
            EffectKind::DeclareVictory => "declare_victory",
        }
    }
}

/// A concrete target, bound when an ability is played or triggered.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectTarget {
    /// Untargeted.
    #[default]
    None,
    Player(PlayerId),
    Unit(CardInstanceId),
    /// Every unit on one side.
    Side(PlayerId),
    /// Every unit on the battlefield.
    AllUnits,
    StackItem(StackItemId),
}

impl EffectTarget {
    #[must_use]
    pub fn as_unit(self) -> Option<CardInstanceId> {
        match self {
            EffectTarget::Unit(id) => Some(id),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_player(self) -> Option<PlayerId> {
        match self {
            EffectTarget::Player(p) => Some(p),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_priorities() {
        assert_eq!(EffectKind::Damage { amount: 3 }.default_priority(), SPELL_PRIORITY);
        assert_eq!(EffectKind::Counter.default_priority(), COUNTER_PRIORITY);
        assert!(EffectKind::Counter.default_priority() > EffectKind::DeclareVictory.default_priority());
    }

    #[test]
    fn test_effect_json_shape() {
        let effect = EffectKind::Damage { amount: 2 };
        let json = serde_json::to_string(&effect).unwrap();
        assert_eq!(json, r#"{"damage":{"amount":2}}"#);

        let counter: EffectKind = serde_json::from_str(r#""counter""#).unwrap();
        assert_eq!(counter, EffectKind::Counter);
    }

    #[test]
    fn test_target_accessors() {
        assert_eq!(EffectTarget::Unit(CardInstanceId(4)).as_unit(), Some(CardInstanceId(4)));
        assert_eq!(EffectTarget::Player(PlayerId::TWO).as_unit(), None);
        assert_eq!(EffectTarget::Player(PlayerId::TWO).as_player(), Some(PlayerId::TWO));
        assert_eq!(EffectTarget::default(), EffectTarget::None);
    }
}
