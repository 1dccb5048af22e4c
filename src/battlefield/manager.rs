//! Battlefield slot management.
//!
//! Each side has `BATTLEFIELD_SLOTS` fixed slots. A slot holds at most one
//! unit, and a card id appears in at most one slot across both sides. Slot
//! arrays are `im::Vector`s so a snapshot clone shares them until written.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::cards::{Card, Keyword};
use crate::core::action::AttackTarget;
use crate::core::config::BATTLEFIELD_SLOTS;
use crate::core::entity::CardInstanceId;
use crate::core::error::GameError;
use crate::core::player::{PlayerId, PlayerMap};

/// Both sides of the battlefield.
///
/// ## Usage
///
/// ```
/// use arcana_ccg::battlefield::Battlefield;
/// use arcana_ccg::cards::{Card, CardDefinition, CardId};
/// use arcana_ccg::core::{CardInstanceId, PlayerId};
///
/// let def = CardDefinition::unit(CardId::new(1), "Squire", 1, 1, 2);
/// let mut field = Battlefield::new();
///
/// field.place(PlayerId::ONE, 2, Card::new(CardInstanceId(5), &def, PlayerId::ONE)).unwrap();
///
/// assert_eq!(field.position_of(CardInstanceId(5)), Some((PlayerId::ONE, 2)));
/// assert_eq!(field.first_empty(PlayerId::ONE), Some(0));
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Battlefield {
    sides: PlayerMap<Vector<Option<Card>>>,
}

impl Default for Battlefield {
    fn default() -> Self {
        Self::new()
    }
}

impl Battlefield {
    /// Two empty sides.
    #[must_use]
    pub fn new() -> Self {
        Self {
            sides: PlayerMap::new(|_| (0..BATTLEFIELD_SLOTS).map(|_| None).collect()),
        }
    }

    // === Slot queries ===

    #[must_use]
    pub fn slot(&self, player: PlayerId, slot: usize) -> Option<&Card> {
        self.sides[player].get(slot).and_then(Option::as_ref)
    }

    /// Empty and in range.
    #[must_use]
    pub fn is_slot_empty(&self, player: PlayerId, slot: usize) -> bool {
        matches!(self.sides[player].get(slot), Some(None))
    }

    /// Lowest empty slot index.
    #[must_use]
    pub fn first_empty(&self, player: PlayerId) -> Option<usize> {
        self.sides[player].iter().position(Option::is_none)
    }

    #[must_use]
    pub fn occupied(&self, player: PlayerId) -> usize {
        self.sides[player].iter().filter(|s| s.is_some()).count()
    }

    #[must_use]
    pub fn is_full(&self, player: PlayerId) -> bool {
        self.occupied(player) == BATTLEFIELD_SLOTS
    }

    /// Check that a unit can go into `slot`, or find one when `None`.
    pub fn resolve_slot(&self, player: PlayerId, slot: Option<usize>) -> Result<usize, GameError> {
        match slot {
            Some(slot) if slot >= BATTLEFIELD_SLOTS => Err(GameError::SlotOutOfRange { slot }),
            Some(slot) if !self.is_slot_empty(player, slot) => Err(GameError::SlotOccupied { slot }),
            Some(slot) => Ok(slot),
            None => self.first_empty(player).ok_or(GameError::BattlefieldFull),
        }
    }

    // === Unit queries ===

    /// Units on one side in slot order.
    pub fn units(&self, player: PlayerId) -> impl Iterator<Item = &Card> {
        self.sides[player].iter().flatten()
    }

    pub fn units_mut(&mut self, player: PlayerId) -> impl Iterator<Item = &mut Card> {
        self.sides[player].iter_mut().flatten()
    }

    #[must_use]
    pub fn position_of(&self, id: CardInstanceId) -> Option<(PlayerId, usize)> {
        PlayerId::both().find_map(|p| {
            self.sides[p]
                .iter()
                .position(|s| s.as_ref().is_some_and(|c| c.id == id))
                .map(|slot| (p, slot))
        })
    }

    #[must_use]
    pub fn unit(&self, id: CardInstanceId) -> Option<&Card> {
        let (player, slot) = self.position_of(id)?;
        self.slot(player, slot)
    }

    pub fn unit_mut(&mut self, id: CardInstanceId) -> Option<&mut Card> {
        let (player, slot) = self.position_of(id)?;
        self.sides[player].get_mut(slot).and_then(Option::as_mut)
    }

    /// Units that may attack this turn.
    pub fn attackable_units(&self, player: PlayerId) -> impl Iterator<Item = &Card> {
        self.units(player).filter(|c| c.can_attack())
    }

    /// Living taunt units on one side.
    pub fn taunt_units(&self, player: PlayerId) -> impl Iterator<Item = &Card> {
        self.units(player)
            .filter(|c| c.has_keyword(Keyword::Taunt) && !c.is_dead())
    }

    #[must_use]
    pub fn has_taunt(&self, player: PlayerId) -> bool {
        self.taunt_units(player).next().is_some()
    }

    /// Legal attack targets against `defender`.
    ///
    /// While any taunt unit is alive only taunt units qualify; otherwise the
    /// nexus and every unit do.
    #[must_use]
    pub fn valid_attack_targets(&self, defender: PlayerId) -> Vec<AttackTarget> {
        if self.has_taunt(defender) {
            return self
                .taunt_units(defender)
                .map(|c| AttackTarget::Unit(c.id))
                .collect();
        }
        std::iter::once(AttackTarget::Nexus)
            .chain(self.units(defender).map(|c| AttackTarget::Unit(c.id)))
            .collect()
    }

    /// Check one declared attack target against `defender`'s side.
    pub fn check_attack_target(&self, defender: PlayerId, target: AttackTarget) -> Result<(), GameError> {
        if let AttackTarget::Unit(id) = target {
            let defending = self.units(defender).find(|c| c.id == id);
            let Some(unit) = defending else {
                return Err(GameError::invalid_target(format!("{id} is not an enemy unit")));
            };
            if self.has_taunt(defender) && !unit.has_keyword(Keyword::Taunt) {
                return Err(GameError::invalid_target("a taunt unit must be attacked first"));
            }
            return Ok(());
        }
        if self.has_taunt(defender) {
            return Err(GameError::invalid_target("the nexus is guarded by taunt"));
        }
        Ok(())
    }

    // === Mutation ===

    /// Put a unit into a slot.
    pub fn place(&mut self, player: PlayerId, slot: usize, card: Card) -> Result<(), GameError> {
        if self.position_of(card.id).is_some() {
            return Err(GameError::internal(format!("{} is already on the battlefield", card.id)));
        }
        let slot = self.resolve_slot(player, Some(slot))?;
        self.sides[player].set(slot, Some(card));
        Ok(())
    }

    /// Take a unit out of its slot.
    pub fn remove(&mut self, id: CardInstanceId) -> Option<Card> {
        let (player, slot) = self.position_of(id)?;
        self.sides[player].set(slot, None)
    }

    /// Remove every unit at or below zero health, player one's side first.
    pub fn remove_dead(&mut self) -> Vec<Card> {
        let mut dead = Vec::new();
        for player in PlayerId::both() {
            let side = &mut self.sides[player];
            for slot in 0..side.len() {
                if side[slot].as_ref().is_some_and(Card::is_dead) {
                    if let Some(card) = side.set(slot, None) {
                        dead.push(card);
                    }
                }
            }
        }
        dead
    }

    /// Clear attack and sickness flags for one side's units.
    pub fn refresh(&mut self, player: PlayerId) {
        for card in self.units_mut(player) {
            card.has_attacked_this_turn = false;
            card.has_summoning_sickness = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardDefinition, CardId};

    fn unit(id: u32, owner: PlayerId) -> Card {
        let def = CardDefinition::unit(CardId::new(1), "Grunt", 1, 2, 2);
        Card::new(CardInstanceId(id), &def, owner)
    }

    fn taunt(id: u32, owner: PlayerId) -> Card {
        let def = CardDefinition::unit(CardId::new(2), "Wall", 2, 0, 5).with_keyword(Keyword::Taunt);
        Card::new(CardInstanceId(id), &def, owner)
    }

    #[test]
    fn test_new_battlefield_is_empty() {
        let field = Battlefield::new();
        for player in PlayerId::both() {
            assert_eq!(field.occupied(player), 0);
            assert_eq!(field.first_empty(player), Some(0));
        }
    }

    #[test]
    fn test_place_and_remove() {
        let mut field = Battlefield::new();
        field.place(PlayerId::TWO, 4, unit(1, PlayerId::TWO)).unwrap();

        assert_eq!(field.position_of(CardInstanceId(1)), Some((PlayerId::TWO, 4)));
        assert!(!field.is_slot_empty(PlayerId::TWO, 4));

        let removed = field.remove(CardInstanceId(1)).unwrap();
        assert_eq!(removed.id, CardInstanceId(1));
        assert!(field.is_slot_empty(PlayerId::TWO, 4));
        assert!(field.remove(CardInstanceId(1)).is_none());
    }

    #[test]
    fn test_slot_errors() {
        let mut field = Battlefield::new();
        field.place(PlayerId::ONE, 0, unit(1, PlayerId::ONE)).unwrap();

        assert_eq!(
            field.place(PlayerId::ONE, 0, unit(2, PlayerId::ONE)),
            Err(GameError::SlotOccupied { slot: 0 })
        );
        assert_eq!(
            field.resolve_slot(PlayerId::ONE, Some(7)),
            Err(GameError::SlotOutOfRange { slot: 7 })
        );
        assert!(matches!(
            field.place(PlayerId::TWO, 1, unit(1, PlayerId::TWO)),
            Err(GameError::InternalError { .. })
        ));
    }

    #[test]
    fn test_full_side() {
        let mut field = Battlefield::new();
        for i in 0..BATTLEFIELD_SLOTS {
            field.place(PlayerId::ONE, i, unit(i as u32 + 1, PlayerId::ONE)).unwrap();
        }

        assert!(field.is_full(PlayerId::ONE));
        assert_eq!(field.resolve_slot(PlayerId::ONE, None), Err(GameError::BattlefieldFull));
        assert!(!field.is_full(PlayerId::TWO));
    }

    #[test]
    fn test_taunt_restricts_targets() {
        let mut field = Battlefield::new();
        field.place(PlayerId::TWO, 0, unit(1, PlayerId::TWO)).unwrap();
        field.place(PlayerId::TWO, 1, taunt(2, PlayerId::TWO)).unwrap();

        assert_eq!(
            field.valid_attack_targets(PlayerId::TWO),
            vec![AttackTarget::Unit(CardInstanceId(2))]
        );
        assert!(field.check_attack_target(PlayerId::TWO, AttackTarget::Nexus).is_err());
        assert!(field
            .check_attack_target(PlayerId::TWO, AttackTarget::Unit(CardInstanceId(1)))
            .is_err());
        assert!(field
            .check_attack_target(PlayerId::TWO, AttackTarget::Unit(CardInstanceId(2)))
            .is_ok());
    }

    #[test]
    fn test_targets_without_taunt() {
        let mut field = Battlefield::new();
        field.place(PlayerId::TWO, 3, unit(1, PlayerId::TWO)).unwrap();

        let targets = field.valid_attack_targets(PlayerId::TWO);
        assert_eq!(targets, vec![AttackTarget::Nexus, AttackTarget::Unit(CardInstanceId(1))]);
        assert!(field
            .check_attack_target(PlayerId::TWO, AttackTarget::Unit(CardInstanceId(9)))
            .is_err());
    }

    #[test]
    fn test_remove_dead() {
        let mut field = Battlefield::new();
        field.place(PlayerId::ONE, 0, unit(1, PlayerId::ONE)).unwrap();
        field.place(PlayerId::TWO, 0, unit(2, PlayerId::TWO)).unwrap();
        field.place(PlayerId::TWO, 1, unit(3, PlayerId::TWO)).unwrap();
        field.unit_mut(CardInstanceId(1)).unwrap().take_damage(2);
        field.unit_mut(CardInstanceId(3)).unwrap().take_damage(5);

        let dead: Vec<_> = field.remove_dead().into_iter().map(|c| c.id).collect();

        assert_eq!(dead, vec![CardInstanceId(1), CardInstanceId(3)]);
        assert_eq!(field.occupied(PlayerId::TWO), 1);
    }

    #[test]
    fn test_attackable_units() {
        let mut field = Battlefield::new();
        let mut fresh = unit(1, PlayerId::ONE);
        fresh.enter_battlefield();
        field.place(PlayerId::ONE, 0, fresh).unwrap();
        field.place(PlayerId::ONE, 1, unit(2, PlayerId::ONE)).unwrap();

        let ready: Vec<_> = field.attackable_units(PlayerId::ONE).map(|c| c.id).collect();
        assert_eq!(ready, vec![CardInstanceId(2)]);

        field.refresh(PlayerId::ONE);
        assert_eq!(field.attackable_units(PlayerId::ONE).count(), 2);
    }
}
