//! Card system: definitions, instances, catalog loading, and decks.
//!
//! ## Key Types
//!
//! - `CardId`: Identifier for catalog definitions
//! - `CardDefinition`: Static card data with typed abilities
//! - `Card`: Runtime card state (health, orientation, attack bookkeeping)
//! - `CardRegistry`: Definition lookup, filled from a `CardCatalog`
//! - `DeckSelection`: Per-player deck lists

pub mod catalog;
pub mod deck;
pub mod definition;
pub mod instance;
pub mod registry;

pub use catalog::{CardCatalog, CatalogError, JsonCatalog, StaticCatalog};
pub use deck::{build_deck, build_decks, default_list, DeckSelection};
pub use definition::{
    Ability, AbilityTrigger, CardDefinition, CardId, CardKind, Element, Keyword, Zodiac,
};
pub use instance::Card;
pub use registry::CardRegistry;
