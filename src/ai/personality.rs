//! AI personalities and difficulty presets.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Difficulty preset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Tutorial,
    Easy,
    #[default]
    Medium,
    Hard,
}

/// How the opening hand is judged.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MulliganStrategy {
    /// Each card is sent back on a coin flip.
    Random,
    /// Send back expensive cards and duplicates.
    Heuristic,
    /// Keep one card per cost step of the early curve.
    Curve,
}

/// Tunable AI behaviour.
///
/// ```
/// use arcana_ccg::ai::{AiPersonality, Difficulty, MulliganStrategy};
///
/// let hard = AiPersonality::for_difficulty(Difficulty::Hard);
/// assert_eq!(hard.mulligan_strategy, MulliganStrategy::Curve);
/// assert!(hard.mistake_chance < 0.05);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiPersonality {
    pub difficulty: Difficulty,
    /// Probability of taking a favourable attack, 0..=1.
    pub aggression: f64,
    /// Multiplier on card value density when ranking plays.
    pub value_scale: f64,
    /// Probability that a decision is replaced by a random legal action.
    pub mistake_chance: f64,
    /// Delay a host should wait before submitting each AI action.
    pub thinking_time_ms: u64,
    pub mulligan_strategy: MulliganStrategy,
}

impl Default for AiPersonality {
    fn default() -> Self {
        Self::for_difficulty(Difficulty::default())
    }
}

impl AiPersonality {
    #[must_use]
    pub fn for_difficulty(difficulty: Difficulty) -> Self {
        let (aggression, value_scale, mistake_chance, thinking_time_ms, mulligan_strategy) = match difficulty {
            Difficulty::Tutorial => (0.3, 0.6, 0.4, 2000, MulliganStrategy::Random),
            Difficulty::Easy => (0.5, 0.8, 0.25, 1500, MulliganStrategy::Random),
            Difficulty::Medium => (0.7, 1.0, 0.1, 1000, MulliganStrategy::Heuristic),
            Difficulty::Hard => (0.9, 1.2, 0.02, 600, MulliganStrategy::Curve),
        };
        Self {
            difficulty,
            aggression,
            value_scale,
            mistake_chance,
            thinking_time_ms,
            mulligan_strategy,
        }
    }

    /// Parse from JSON; missing fields take the medium preset.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    #[must_use]
    pub fn thinking_time(&self) -> Duration {
        Duration::from_millis(self.thinking_time_ms)
    }

    /// Noise applied to play scores: wider for sloppier personalities.
    #[must_use]
    pub fn score_jitter(&self) -> f64 {
        self.mistake_chance
    }
}
