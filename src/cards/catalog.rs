//! Card catalog collaborator.
//!
//! The engine does not own card content. A `CardCatalog` supplies
//! definitions; `JsonCatalog` compiles a JSON document of structured entries
//! into definitions once, at load time.
//!
//! ## Entry format
//!
//! ```json
//! [
//!   { "id": 1, "name": "Squire", "type": "unit", "cost": 1, "attack": 1, "health": 2,
//!     "keywords": ["taunt"] },
//!   { "id": 2, "name": "Spark", "type": "spell", "cost": 1,
//!     "abilities": [ { "trigger": "on_play", "target": "enemy_unit_or_nexus",
//!                      "upright": { "damage": { "amount": 2 } } } ] }
//! ]
//! ```

use serde::Deserialize;

use super::definition::{Ability, AbilityTrigger, CardDefinition, CardId, CardKind, Element, Keyword, Zodiac};

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("catalog unavailable: {0}")]
    Unavailable(String),

    #[error("catalog is malformed: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("invalid card {id}: {reason}")]
    InvalidEntry { id: CardId, reason: String },

    #[error("duplicate card id {0}")]
    DuplicateId(CardId),
}

/// Source of static card definitions.
pub trait CardCatalog {
    fn load(&self) -> Result<Vec<CardDefinition>, CatalogError>;
}

/// Catalog backed by an in-memory list.
#[derive(Clone, Debug, Default)]
pub struct StaticCatalog(pub Vec<CardDefinition>);

impl CardCatalog for StaticCatalog {
    fn load(&self) -> Result<Vec<CardDefinition>, CatalogError> {
        Ok(self.0.clone())
    }
}

/// Catalog compiled from a JSON document.
#[derive(Clone, Debug)]
pub struct JsonCatalog {
    source: String,
}

impl JsonCatalog {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }
}

impl CardCatalog for JsonCatalog {
    fn load(&self) -> Result<Vec<CardDefinition>, CatalogError> {
        let entries: Vec<CatalogEntry> = serde_json::from_str(&self.source)?;
        entries.into_iter().map(CatalogEntry::compile).collect()
    }
}

#[derive(Debug, Deserialize)]
struct CatalogEntry {
    id: u32,
    name: String,
    #[serde(rename = "type")]
    kind: CardKind,
    cost: u32,
    #[serde(default)]
    attack: i32,
    #[serde(default)]
    health: i32,
    #[serde(default)]
    zodiac: Zodiac,
    #[serde(default)]
    element: Element,
    #[serde(default)]
    keywords: Vec<Keyword>,
    #[serde(default)]
    abilities: Vec<Ability>,
}

impl CatalogEntry {
    fn compile(self) -> Result<CardDefinition, CatalogError> {
        let id = CardId::new(self.id);
        let invalid = |reason: &str| CatalogError::InvalidEntry {
            id,
            reason: reason.to_string(),
        };

        match self.kind {
            CardKind::Unit => {
                if self.health <= 0 {
                    return Err(invalid("units need positive health"));
                }
                if self.attack < 0 {
                    return Err(invalid("attack cannot be negative"));
                }
            }
            CardKind::Spell => {
                if !self.abilities.iter().any(|a| a.trigger == AbilityTrigger::OnPlay) {
                    return Err(invalid("spells need an on_play ability"));
                }
                if !self.keywords.is_empty() {
                    return Err(invalid("spells cannot carry keywords"));
                }
            }
        }

        let mut def = match self.kind {
            CardKind::Unit => CardDefinition::unit(id, self.name, self.cost, self.attack, self.health),
            CardKind::Spell => {
                let mut abilities = self.abilities.into_iter();
                // Guarded above: at least one ability exists.
                let first = abilities.next().ok_or_else(|| invalid("missing ability"))?;
                let mut def = CardDefinition::spell(id, self.name, self.cost, first);
                def.abilities.extend(abilities);
                return Ok(def.with_tags(self.zodiac, self.element));
            }
        };

        for keyword in self.keywords {
            def = def.with_keyword(keyword);
        }
        def.abilities.extend(self.abilities);
        Ok(def.with_tags(self.zodiac, self.element))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::{EffectKind, TargetRule};

    const CATALOG: &str = r#"[
        { "id": 1, "name": "Squire", "type": "unit", "cost": 1, "attack": 1, "health": 2,
          "keywords": ["taunt"], "zodiac": "leo", "element": "fire" },
        { "id": 2, "name": "Spark", "type": "spell", "cost": 1,
          "abilities": [ { "trigger": "on_play", "target": "enemy_unit_or_nexus",
                           "upright": { "damage": { "amount": 2 } },
                           "reversed": { "damage": { "amount": 1 } } } ] }
    ]"#;

    #[test]
    fn test_compiles_structured_entries() {
        let defs = JsonCatalog::new(CATALOG).load().unwrap();
        assert_eq!(defs.len(), 2);

        let squire = &defs[0];
        assert!(squire.has_keyword(Keyword::Taunt));
        assert_eq!(squire.zodiac, Zodiac::Leo);

        let spark = &defs[1];
        let ability = spark.play_ability().unwrap();
        assert_eq!(ability.target, TargetRule::EnemyUnitOrNexus);
        assert_eq!(ability.effect_for(true), &EffectKind::Damage { amount: 1 });
        assert!(ability.counterable);
    }

    #[test]
    fn test_rejects_unit_without_health() {
        let json = r#"[{ "id": 5, "name": "Ghost", "type": "unit", "cost": 1, "attack": 1 }]"#;
        let err = JsonCatalog::new(json).load().unwrap_err();
        assert!(matches!(err, CatalogError::InvalidEntry { id, .. } if id == CardId::new(5)));
    }

    #[test]
    fn test_rejects_spell_without_ability() {
        let json = r#"[{ "id": 6, "name": "Dud", "type": "spell", "cost": 1 }]"#;
        assert!(matches!(
            JsonCatalog::new(json).load(),
            Err(CatalogError::InvalidEntry { .. })
        ));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            JsonCatalog::new("{").load(),
            Err(CatalogError::Malformed(_))
        ));
    }

    #[test]
    fn test_static_catalog() {
        let catalog = StaticCatalog(vec![CardDefinition::unit(CardId::new(3), "X", 1, 1, 1)]);
        assert_eq!(catalog.load().unwrap().len(), 1);
    }
}
