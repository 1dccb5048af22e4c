//! Game configuration.
//!
//! Rules constants that the game never varies live here as `const`s.
//! Everything a host may tune per game lives in `GameConfig`, which
//! deserializes from JSON with defaults for missing fields.

use serde::{Deserialize, Serialize};

/// Ceiling for `max_mana`.
pub const MAX_MANA: u32 = 10;

/// Ceiling for banked spell mana.
pub const SPELL_MANA_CAP: u32 = 3;

/// Slots per side of the battlefield.
pub const BATTLEFIELD_SLOTS: usize = 7;

/// Default stack priority for spell effects.
pub const SPELL_PRIORITY: i32 = 1000;

/// Default stack priority for counters; beats the spell they answer.
pub const COUNTER_PRIORITY: i32 = 2000;

/// Priority for persistent effects fired during the end-turn tick.
pub const PERSISTENT_PRIORITY: i32 = 500;

/// Which alternative win conditions are in play.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameMode {
    /// Health plus ability-declared victory.
    #[default]
    Standard,
    /// Standard plus board domination.
    Arcana,
    /// Health only.
    Tutorial,
}

/// Per-game configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Health each player starts with; also the heal ceiling.
    pub starting_health: i32,

    /// Cards drawn before the mulligan.
    pub opening_hand_size: usize,

    /// Draws beyond this are burned to the graveyard.
    pub max_hand_size: usize,

    /// Cards per deck when no selection is given.
    pub deck_size: usize,

    /// Hold cast spells on the stack until both players pass.
    /// When false, the stack drains immediately after every push.
    pub response_window: bool,

    pub mode: GameMode,

    /// Seed for shuffles and draw orientation.
    pub seed: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            starting_health: 20,
            opening_hand_size: 4,
            max_hand_size: 10,
            deck_size: 30,
            response_window: false,
            mode: GameMode::Standard,
            seed: 42,
        }
    }
}

impl GameConfig {
    /// Parse from JSON; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_mode(mut self, mode: GameMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_starting_health(mut self, health: i32) -> Self {
        self.starting_health = health;
        self
    }

    pub fn with_deck_size(mut self, size: usize) -> Self {
        self.deck_size = size;
        self
    }

    pub fn with_opening_hand_size(mut self, size: usize) -> Self {
        self.opening_hand_size = size;
        self
    }

    /// Enable or disable the spell response window.
    pub fn with_response_window(mut self, enabled: bool) -> Self {
        self.response_window = enabled;
        self
    }
}
