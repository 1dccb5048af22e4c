//! Player actions.
//!
//! An action names the acting player and what they want to do. Actions are
//! plain data: the transport layer deserializes them, the validator judges
//! them against a snapshot, and the executor applies them.
//!
//! ```
//! use arcana_ccg::core::{AttackTarget, CardInstanceId, GameAction, PlayerId};
//!
//! let swing = GameAction::attack(PlayerId::ONE, CardInstanceId(9), AttackTarget::Nexus);
//! assert_eq!(swing.player(), PlayerId::ONE);
//! assert_eq!(swing.kind(), "attack");
//! ```

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::entity::CardInstanceId;
use super::player::PlayerId;
use crate::effects::EffectTarget;

/// What an attacking unit hits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttackTarget {
    /// The defending player directly.
    Nexus,
    /// A unit on the defending side.
    Unit(CardInstanceId),
}

/// A complete game action.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameAction {
    /// Send back any subset of the opening hand (possibly none).
    Mulligan {
        player: PlayerId,
        replace: SmallVec<[CardInstanceId; 4]>,
    },

    /// Play a card from hand. Units take `slot` (or the first empty slot);
    /// spells and targeted on-play abilities use `target`.
    PlayCard {
        player: PlayerId,
        card: CardInstanceId,
        slot: Option<usize>,
        target: Option<EffectTarget>,
    },

    /// Direct attack: resolved immediately against a unit or the player.
    Attack {
        player: PlayerId,
        attacker: CardInstanceId,
        target: AttackTarget,
    },

    /// Decline to respond to the pending stack.
    PassPriority { player: PlayerId },

    EndTurn { player: PlayerId },
}

impl GameAction {
    pub fn mulligan(player: PlayerId, replace: &[CardInstanceId]) -> Self {
        GameAction::Mulligan {
            player,
            replace: SmallVec::from_slice(replace),
        }
    }

    /// Play a unit into the first empty slot, or an untargeted spell.
    pub fn play(player: PlayerId, card: CardInstanceId) -> Self {
        GameAction::PlayCard {
            player,
            card,
            slot: None,
            target: None,
        }
    }

    pub fn play_in_slot(player: PlayerId, card: CardInstanceId, slot: usize) -> Self {
        GameAction::PlayCard {
            player,
            card,
            slot: Some(slot),
            target: None,
        }
    }

    pub fn play_targeted(player: PlayerId, card: CardInstanceId, target: EffectTarget) -> Self {
        GameAction::PlayCard {
            player,
            card,
            slot: None,
            target: Some(target),
        }
    }

    pub fn attack(player: PlayerId, attacker: CardInstanceId, target: AttackTarget) -> Self {
        GameAction::Attack {
            player,
            attacker,
            target,
        }
    }

    pub fn end_turn(player: PlayerId) -> Self {
        GameAction::EndTurn { player }
    }

    pub fn pass(player: PlayerId) -> Self {
        GameAction::PassPriority { player }
    }

    /// The acting player.
    #[must_use]
    pub fn player(&self) -> PlayerId {
        match self {
            GameAction::Mulligan { player, .. }
            | GameAction::PlayCard { player, .. }
            | GameAction::Attack { player, .. }
            | GameAction::PassPriority { player }
            | GameAction::EndTurn { player } => *player,
        }
    }

    /// Short name for logs.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            GameAction::Mulligan { .. } => "mulligan",
            GameAction::PlayCard { .. } => "play_card",
            GameAction::Attack { .. } => "attack",
            GameAction::PassPriority { .. } => "pass_priority",
            GameAction::EndTurn { .. } => "end_turn",
        }
    }
}

/// A recorded action with metadata for history tracking.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    pub action: GameAction,

    /// Turn number when action was taken.
    pub turn: u32,

    /// Sequence number within the turn (for ordering).
    pub sequence: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_accessor() {
        let actions = [
            GameAction::mulligan(PlayerId::TWO, &[]),
            GameAction::play(PlayerId::TWO, CardInstanceId(1)),
            GameAction::attack(PlayerId::TWO, CardInstanceId(1), AttackTarget::Nexus),
            GameAction::pass(PlayerId::TWO),
            GameAction::end_turn(PlayerId::TWO),
        ];

        for action in &actions {
            assert_eq!(action.player(), PlayerId::TWO);
        }
    }

    #[test]
    fn test_play_in_slot() {
        match GameAction::play_in_slot(PlayerId::ONE, CardInstanceId(3), 6) {
            GameAction::PlayCard { slot, target, .. } => {
                assert_eq!(slot, Some(6));
                assert!(target.is_none());
            }
            other => panic!("Expected PlayCard, got {:?}", other),
        }
    }

    #[test]
    fn test_action_serialization() {
        let action = GameAction::attack(
            PlayerId::ONE,
            CardInstanceId(12),
            AttackTarget::Unit(CardInstanceId(30)),
        );
        let json = serde_json::to_string(&action).unwrap();
        assert!(json.contains("\"attack\""));

        let back: GameAction = serde_json::from_str(&json).unwrap();
        assert_eq!(action, back);
    }
}
