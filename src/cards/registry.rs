//! Card registry for definition lookup.
//!
//! The `CardRegistry` stores every definition a game may use. It is filled
//! from a `CardCatalog` once per engine, falling back to the built-in set
//! when the catalog cannot be loaded.

use rustc_hash::FxHashMap;

use super::catalog::{CardCatalog, CatalogError};
use super::definition::{Ability, CardDefinition, CardId, Element, Keyword, Zodiac};
use crate::effects::{EffectKind, TargetRule};

/// Registry of card definitions.
///
/// ```
/// use arcana_ccg::cards::{CardDefinition, CardId, CardRegistry};
///
/// let mut registry = CardRegistry::new();
/// registry.register(CardDefinition::unit(CardId::new(1), "Squire", 1, 1, 1)).unwrap();
///
/// assert_eq!(registry.get(CardId::new(1)).unwrap().name, "Squire");
/// assert!(registry.register(CardDefinition::unit(CardId::new(1), "Dup", 1, 1, 1)).is_err());
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardRegistry {
    cards: FxHashMap<CardId, CardDefinition>,
}

impl CardRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a card definition. Duplicate ids are rejected.
    pub fn register(&mut self, card: CardDefinition) -> Result<(), CatalogError> {
        if self.cards.contains_key(&card.id) {
            return Err(CatalogError::DuplicateId(card.id));
        }
        self.cards.insert(card.id, card);
        Ok(())
    }

    /// Load from a catalog, or fall back to the built-in set.
    pub fn load_or_default(catalog: &dyn CardCatalog) -> Self {
        match catalog.load().and_then(Self::from_definitions) {
            Ok(registry) if !registry.is_empty() => {
                tracing::info!(cards = registry.len(), "card catalog loaded");
                registry
            }
            Ok(_) => {
                tracing::warn!("card catalog empty, using built-in card set");
                Self::builtin()
            }
            Err(err) => {
                tracing::warn!(error = %err, "card catalog unavailable, using built-in card set");
                Self::builtin()
            }
        }
    }

    /// Build from a list of definitions, rejecting duplicates.
    pub fn from_definitions(definitions: Vec<CardDefinition>) -> Result<Self, CatalogError> {
        let mut registry = Self::new();
        for def in definitions {
            registry.register(def)?;
        }
        Ok(registry)
    }

    #[must_use]
    pub fn get(&self, id: CardId) -> Option<&CardDefinition> {
        self.cards.get(&id)
    }

    #[must_use]
    pub fn contains(&self, id: CardId) -> bool {
        self.cards.contains_key(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Definitions in ascending id order.
    #[must_use]
    pub fn sorted(&self) -> Vec<&CardDefinition> {
        let mut defs: Vec<_> = self.cards.values().collect();
        defs.sort_by_key(|d| d.id);
        defs
    }

    /// Find cards matching a predicate.
    pub fn find<F>(&self, predicate: F) -> impl Iterator<Item = &CardDefinition>
    where
        F: Fn(&CardDefinition) -> bool,
    {
        self.cards.values().filter(move |c| predicate(c))
    }

    /// The minimal card set used when no catalog is available.
    #[must_use]
    pub fn builtin() -> Self {
        let mut cards = FxHashMap::default();
        for def in builtin_definitions() {
            cards.insert(def.id, def);
        }
        Self { cards }
    }
}

fn builtin_definitions() -> Vec<CardDefinition> {
    vec![
        CardDefinition::unit(CardId::new(1), "Acolyte", 1, 1, 2).with_tags(Zodiac::Virgo, Element::Earth),
        CardDefinition::unit(CardId::new(2), "Ember Sprite", 1, 2, 1)
            .with_keyword(Keyword::Charge)
            .with_tags(Zodiac::Aries, Element::Fire),
        CardDefinition::unit(CardId::new(3), "Shieldbearer", 2, 1, 4)
            .with_keyword(Keyword::Taunt)
            .with_tags(Zodiac::Taurus, Element::Earth),
        CardDefinition::unit(CardId::new(4), "Oracle", 3, 2, 3)
            .with_ability(
                Ability::on_play(TargetRule::Caster, EffectKind::DrawCards { count: 1 })
                    .with_reversed(EffectKind::GainSpellMana { amount: 1 }),
            )
            .with_tags(Zodiac::Pisces, Element::Water),
        CardDefinition::unit(CardId::new(5), "Star Knight", 3, 3, 3).with_tags(Zodiac::Leo, Element::Fire),
        CardDefinition::unit(CardId::new(6), "Stone Golem", 4, 2, 6)
            .with_keyword(Keyword::Taunt)
            .with_tags(Zodiac::Capricorn, Element::Earth),
        CardDefinition::unit(CardId::new(7), "Phoenix", 5, 5, 3)
            .with_ability(Ability::on_death(TargetRule::Opponent, EffectKind::Damage { amount: 2 }))
            .with_tags(Zodiac::Sagittarius, Element::Fire),
        CardDefinition::unit(CardId::new(8), "Titan", 7, 7, 7).with_tags(Zodiac::Scorpio, Element::Water),
        CardDefinition::spell(
            CardId::new(9),
            "Spark",
            1,
            Ability::on_play(TargetRule::EnemyUnitOrNexus, EffectKind::Damage { amount: 2 })
                .with_reversed(EffectKind::Damage { amount: 1 }),
        )
        .with_tags(Zodiac::Aries, Element::Fire),
        CardDefinition::spell(
            CardId::new(10),
            "Moonlight",
            2,
            Ability::on_play(TargetRule::Caster, EffectKind::Heal { amount: 4 })
                .with_reversed(EffectKind::DrawCards { count: 1 }),
        )
        .with_tags(Zodiac::Cancer, Element::Water),
        CardDefinition::spell(
            CardId::new(11),
            "Judgement",
            4,
            Ability::on_play(TargetRule::EnemySide, EffectKind::DestroyByHealthThreshold { max_health: 2 }),
        )
        .with_tags(Zodiac::Libra, Element::Air),
        CardDefinition::spell(
            CardId::new(12),
            "Negate",
            2,
            Ability::on_play(TargetRule::StackItem, EffectKind::Counter).uncounterable(),
        )
        .with_tags(Zodiac::Gemini, Element::Air),
        CardDefinition::spell(
            CardId::new(13),
            "Blessing",
            1,
            Ability::on_play(TargetRule::FriendlyUnit, EffectKind::Buff { attack: 1, health: 1 })
                .with_reversed(EffectKind::Buff { attack: 2, health: 0 }),
        )
        .with_tags(Zodiac::Libra, Element::Air),
        CardDefinition::spell(
            CardId::new(14),
            "Wheel of Fortune",
            3,
            Ability::on_play(TargetRule::Caster, EffectKind::DrawCards { count: 2 }),
        )
        .with_tags(Zodiac::Sagittarius, Element::Fire),
        CardDefinition::spell(
            CardId::new(15),
            "Plague",
            3,
            Ability::on_play(
                TargetRule::Opponent,
                EffectKind::Lingering {
                    effect: Box::new(EffectKind::Damage { amount: 1 }),
                    turns: 3,
                },
            ),
        )
        .with_tags(Zodiac::Scorpio, Element::Water),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::catalog::JsonCatalog;

    #[test]
    fn test_register_and_get() {
        let mut registry = CardRegistry::new();
        registry
            .register(CardDefinition::unit(CardId::new(1), "Test Card", 1, 1, 1))
            .unwrap();

        assert_eq!(registry.get(CardId::new(1)).unwrap().name, "Test Card");
        assert!(registry.get(CardId::new(99)).is_none());
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let result = CardRegistry::from_definitions(vec![
            CardDefinition::unit(CardId::new(1), "A", 1, 1, 1),
            CardDefinition::unit(CardId::new(1), "B", 1, 1, 1),
        ]);
        assert!(matches!(result, Err(CatalogError::DuplicateId(id)) if id == CardId::new(1)));
    }

    #[test]
    fn test_builtin_set_is_sorted_and_complete() {
        let registry = CardRegistry::builtin();
        let ids: Vec<u32> = registry.sorted().iter().map(|d| d.id.raw()).collect();

        assert_eq!(ids.len(), 15);
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
        assert!(registry.find(|d| d.has_keyword(Keyword::Taunt)).count() >= 2);
    }

    #[test]
    fn test_fallback_on_broken_catalog() {
        let registry = CardRegistry::load_or_default(&JsonCatalog::new("{ definitely not json"));
        assert_eq!(registry.len(), CardRegistry::builtin().len());
    }

    #[test]
    fn test_fallback_on_empty_catalog() {
        let registry = CardRegistry::load_or_default(&JsonCatalog::new("[]"));
        assert!(!registry.is_empty());
    }
}
