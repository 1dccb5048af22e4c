//! Card definitions - static card data.
//!
//! `CardDefinition` holds the catalog properties of a card: cost, stats,
//! type, tags, keywords and typed abilities. Instance data (current health,
//! orientation, attack bookkeeping) lives on `Card`.
//!
//! Abilities are structured data compiled once when the catalog loads; the
//! engine never inspects rules text.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::effects::{EffectKind, TargetRule};

/// Identifier for a card definition (the catalog entry, not a copy in play).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardKind {
    /// Occupies a battlefield slot.
    Unit,
    /// Resolves through the stack, then goes to the graveyard.
    Spell,
}

/// Zodiac class. Flavor tag only; never gates legality.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Zodiac {
    #[default]
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

/// Elemental tag. Flavor tag only.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Element {
    #[default]
    Fire,
    Earth,
    Air,
    Water,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Keyword {
    /// Enemy attacks must target taunt units while any are alive.
    Taunt,
    /// May attack the turn it is played.
    Charge,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AbilityTrigger {
    /// When the card is played (spell cast or unit summoned).
    OnPlay,
    /// When the unit is removed at zero health.
    OnDeath,
}

/// A typed card ability.
///
/// `upright` applies to cards drawn upright; `reversed` (when present) to
/// cards drawn reversed. Reversed cards without a reversed variant use the
/// upright effect.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ability {
    pub trigger: AbilityTrigger,
    #[serde(default)]
    pub target: TargetRule,
    pub upright: EffectKind,
    #[serde(default)]
    pub reversed: Option<EffectKind>,
    #[serde(default = "default_counterable")]
    pub counterable: bool,
    /// Overrides the stack priority derived from the effect kind.
    #[serde(default)]
    pub priority: Option<i32>,
}

fn default_counterable() -> bool {
    true
}

impl Ability {
    #[must_use]
    pub fn new(trigger: AbilityTrigger, target: TargetRule, upright: EffectKind) -> Self {
        Self {
            trigger,
            target,
            upright,
            reversed: None,
            counterable: true,
            priority: None,
        }
    }

    #[must_use]
    pub fn on_play(target: TargetRule, effect: EffectKind) -> Self {
        Self::new(AbilityTrigger::OnPlay, target, effect)
    }

    #[must_use]
    pub fn on_death(target: TargetRule, effect: EffectKind) -> Self {
        Self::new(AbilityTrigger::OnDeath, target, effect)
    }

    #[must_use]
    pub fn with_reversed(mut self, effect: EffectKind) -> Self {
        self.reversed = Some(effect);
        self
    }

    #[must_use]
    pub fn uncounterable(mut self) -> Self {
        self.counterable = false;
        self
    }

    #[must_use]
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = Some(priority);
        self
    }

    /// The effect variant for a card of the given orientation.
    #[must_use]
    pub fn effect_for(&self, is_reversed: bool) -> &EffectKind {
        match (&self.reversed, is_reversed) {
            (Some(reversed), true) => reversed,
            _ => &self.upright,
        }
    }

    /// Stack priority: explicit override, else derived from the effect.
    #[must_use]
    pub fn stack_priority(&self, is_reversed: bool) -> i32 {
        self.priority
            .unwrap_or_else(|| self.effect_for(is_reversed).default_priority())
    }
}

/// Static card definition.
///
/// ```
/// use arcana_ccg::cards::{CardDefinition, CardId, Keyword};
///
/// let golem = CardDefinition::unit(CardId::new(4), "Stone Golem", 4, 2, 6)
///     .with_keyword(Keyword::Taunt);
///
/// assert!(golem.is_unit());
/// assert!(golem.has_keyword(Keyword::Taunt));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDefinition {
    pub id: CardId,
    pub name: String,
    pub kind: CardKind,
    pub cost: u32,
    pub attack: i32,
    pub health: i32,
    pub zodiac: Zodiac,
    pub element: Element,
    pub keywords: SmallVec<[Keyword; 2]>,
    pub abilities: SmallVec<[Ability; 2]>,
}

impl CardDefinition {
    /// A unit with no keywords or abilities.
    #[must_use]
    pub fn unit(id: CardId, name: impl Into<String>, cost: u32, attack: i32, health: i32) -> Self {
        Self {
            id,
            name: name.into(),
            kind: CardKind::Unit,
            cost,
            attack,
            health,
            zodiac: Zodiac::default(),
            element: Element::default(),
            keywords: SmallVec::new(),
            abilities: SmallVec::new(),
        }
    }

    /// A spell with a single on-play ability.
    #[must_use]
    pub fn spell(id: CardId, name: impl Into<String>, cost: u32, ability: Ability) -> Self {
        let mut abilities = SmallVec::new();
        abilities.push(ability);
        Self {
            id,
            name: name.into(),
            kind: CardKind::Spell,
            cost,
            attack: 0,
            health: 0,
            zodiac: Zodiac::default(),
            element: Element::default(),
            keywords: SmallVec::new(),
            abilities,
        }
    }

    #[must_use]
    pub fn with_keyword(mut self, keyword: Keyword) -> Self {
        if !self.keywords.contains(&keyword) {
            self.keywords.push(keyword);
        }
        self
    }

    #[must_use]
    pub fn with_ability(mut self, ability: Ability) -> Self {
        self.abilities.push(ability);
        self
    }

    #[must_use]
    pub fn with_tags(mut self, zodiac: Zodiac, element: Element) -> Self {
        self.zodiac = zodiac;
        self.element = element;
        self
    }

    #[must_use]
    pub fn is_unit(&self) -> bool {
        self.kind == CardKind::Unit
    }

    #[must_use]
    pub fn has_keyword(&self, keyword: Keyword) -> bool {
        self.keywords.contains(&keyword)
    }

    /// Abilities with the given trigger.
    pub fn abilities_for(&self, trigger: AbilityTrigger) -> impl Iterator<Item = &Ability> {
        self.abilities.iter().filter(move |a| a.trigger == trigger)
    }

    /// The on-play ability whose target rule governs the play action, if any.
    #[must_use]
    pub fn play_ability(&self) -> Option<&Ability> {
        self.abilities_for(AbilityTrigger::OnPlay).next()
    }
}
