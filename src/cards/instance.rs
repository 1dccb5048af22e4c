//! Card instances - runtime card state.
//!
//! `Card` is one physical copy of a definition in a specific game. It
//! carries the definition by value so rules code never needs the registry
//! to read a card's stats, plus the runtime fields the rules mutate.

use serde::{Deserialize, Serialize};

use super::definition::{Ability, AbilityTrigger, CardDefinition, CardKind, Keyword};
use crate::core::entity::CardInstanceId;
use crate::core::player::PlayerId;

/// A card instance in a game.
///
/// ## Invariant
///
/// `current_health <= max_health()`. Buffs raise both; damage lowers only
/// the current value.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    /// Unique within the game.
    pub id: CardInstanceId,

    pub definition: CardDefinition,

    pub owner: PlayerId,

    pub current_health: i32,

    /// Added to the definition's attack.
    pub attack_modifier: i32,

    /// Added to the definition's health to form the max.
    pub health_modifier: i32,

    /// Decided by a coin flip each time the card is drawn.
    pub is_reversed: bool,

    pub has_attacked_this_turn: bool,

    pub has_summoning_sickness: bool,
}

impl Card {
    /// Create a fresh instance of `definition` owned by `owner`.
    #[must_use]
    pub fn new(id: CardInstanceId, definition: &CardDefinition, owner: PlayerId) -> Self {
        Self {
            id,
            current_health: definition.health,
            definition: definition.clone(),
            owner,
            attack_modifier: 0,
            health_modifier: 0,
            is_reversed: false,
            has_attacked_this_turn: false,
            has_summoning_sickness: false,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.definition.name
    }

    #[must_use]
    pub fn cost(&self) -> u32 {
        self.definition.cost
    }

    #[must_use]
    pub fn kind(&self) -> CardKind {
        self.definition.kind
    }

    #[must_use]
    pub fn is_unit(&self) -> bool {
        self.definition.is_unit()
    }

    /// Current attack, never negative.
    #[must_use]
    pub fn attack(&self) -> i32 {
        self.definition.attack.saturating_add(self.attack_modifier).max(0)
    }

    /// Modified max health.
    #[must_use]
    pub fn max_health(&self) -> i32 {
        self.definition.health.saturating_add(self.health_modifier)
    }

    #[must_use]
    pub fn is_dead(&self) -> bool {
        self.current_health <= 0
    }

    #[must_use]
    pub fn has_keyword(&self, keyword: Keyword) -> bool {
        self.definition.has_keyword(keyword)
    }

    /// Not sick and has not attacked yet.
    #[must_use]
    pub fn can_attack(&self) -> bool {
        !self.has_summoning_sickness && !self.has_attacked_this_turn
    }

    pub fn abilities_for(&self, trigger: AbilityTrigger) -> impl Iterator<Item = &Ability> {
        self.definition.abilities_for(trigger)
    }

    /// Prepare the instance for entering a slot.
    pub fn enter_battlefield(&mut self) {
        self.has_attacked_this_turn = false;
        self.has_summoning_sickness = !self.has_keyword(Keyword::Charge);
    }

    /// Take damage. Negative amounts are ignored.
    pub fn take_damage(&mut self, amount: i32) {
        self.current_health = self.current_health.saturating_sub(amount.max(0));
    }

    /// Restore health up to the max.
    pub fn heal(&mut self, amount: i32) {
        self.current_health = self.current_health.saturating_add(amount.max(0)).min(self.max_health());
    }

    /// Apply a stat buff. Health buffs raise both current and max health;
    /// debuffs clamp current health to the lowered max.
    pub fn buff(&mut self, attack: i32, health: i32) {
        self.attack_modifier = self.attack_modifier.saturating_add(attack);
        self.health_modifier = self.health_modifier.saturating_add(health);
        if health > 0 {
            self.current_health = self.current_health.saturating_add(health);
        }
        self.current_health = self.current_health.min(self.max_health());
    }

    /// Strip in-play state when the card leaves the battlefield.
    pub fn reset(&mut self) {
        self.current_health = self.definition.health;
        self.attack_modifier = 0;
        self.health_modifier = 0;
        self.has_attacked_this_turn = false;
        self.has_summoning_sickness = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardId;

    fn knight() -> Card {
        let def = CardDefinition::unit(CardId::new(1), "Knight", 3, 3, 4);
        Card::new(CardInstanceId(10), &def, PlayerId::ONE)
    }

    #[test]
    fn test_card_new() {
        let card = knight();

        assert_eq!(card.id, CardInstanceId(10));
        assert_eq!(card.owner, PlayerId::ONE);
        assert_eq!(card.current_health, 4);
        assert_eq!(card.attack(), 3);
        assert!(!card.is_reversed);
    }

    #[test]
    fn test_damage_and_heal_cap() {
        let mut card = knight();

        card.take_damage(3);
        assert_eq!(card.current_health, 1);

        card.heal(10);
        assert_eq!(card.current_health, 4);

        card.take_damage(-5);
        assert_eq!(card.current_health, 4);
    }

    #[test]
    fn test_buff_raises_max_and_current() {
        let mut card = knight();
        card.take_damage(2);
        card.buff(1, 2);

        assert_eq!(card.attack(), 4);
        assert_eq!(card.max_health(), 6);
        assert_eq!(card.current_health, 4);
    }

    #[test]
    fn test_debuff_clamps_health() {
        let mut card = knight();
        card.buff(-5, -2);

        assert_eq!(card.attack(), 0);
        assert_eq!(card.max_health(), 2);
        assert_eq!(card.current_health, 2);
    }

    #[test]
    fn test_enter_battlefield_sickness() {
        let mut card = knight();
        card.enter_battlefield();
        assert!(card.has_summoning_sickness);
        assert!(!card.can_attack());

        let def = CardDefinition::unit(CardId::new(2), "Rider", 2, 2, 1).with_keyword(Keyword::Charge);
        let mut rider = Card::new(CardInstanceId(11), &def, PlayerId::TWO);
        rider.enter_battlefield();
        assert!(rider.can_attack());
    }

    #[test]
    fn test_reset() {
        let mut card = knight();
        card.buff(2, 2);
        card.take_damage(5);
        card.has_attacked_this_turn = true;

        card.reset();

        assert_eq!(card.current_health, 4);
        assert_eq!(card.attack(), 3);
        assert!(!card.has_attacked_this_turn);
    }

    #[test]
    fn test_card_serialization() {
        let mut card = knight();
        card.is_reversed = true;

        let json = serde_json::to_string(&card).unwrap();
        let deserialized: Card = serde_json::from_str(&json).unwrap();

        assert_eq!(card, deserialized);
    }
}
