//! Deterministic random number generation.
//!
//! All randomness in a game (deck shuffles, the per-draw orientation coin
//! flip, AI noise) flows through a `GameRng` stored inside the state, so a
//! game replays identically from its seed and action history.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces identical sequence
//! - **Snapshot-safe**: Serializes as seed + word position, O(1) regardless
//!   of how many numbers have been drawn
//!
//! ```
//! use arcana_ccg::core::GameRng;
//!
//! let mut a = GameRng::new(7);
//! let mut b = GameRng::new(7);
//! assert_eq!(a.coin_flip(), b.coin_flip());
//! ```

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Deterministic RNG backed by ChaCha8.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(from = "GameRngState", into = "GameRngState")]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Fair coin. Used for card orientation at draw time.
    pub fn coin_flip(&mut self) -> bool {
        self.inner.gen_bool(0.5)
    }

    /// True with the given probability (clamped to 0..=1).
    pub fn chance(&mut self, probability: f64) -> bool {
        self.inner.gen_bool(probability.clamp(0.0, 1.0))
    }

    /// Uniform float in `0.0..1.0`.
    pub fn unit(&mut self) -> f64 {
        self.inner.gen::<f64>()
    }

    /// Random usize in the given range.
    pub fn gen_range_usize(&mut self, range: std::ops::Range<usize>) -> usize {
        self.inner.gen_range(range)
    }

    /// Shuffle a persistent vector (a deck, after building or a mulligan).
    pub fn shuffle_vector<T: Clone>(&mut self, vector: &mut im::Vector<T>) {
        let mut items: Vec<T> = vector.iter().cloned().collect();
        items.shuffle(&mut self.inner);
        *vector = items.into_iter().collect();
    }

    /// Get the current state for serialization.
    #[must_use]
    pub fn state(&self) -> GameRngState {
        GameRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
        }
    }

    /// Restore from a saved state.
    #[must_use]
    pub fn from_state(state: &GameRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
        }
    }
}

/// Serializable RNG state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRngState {
    pub seed: u64,
    /// ChaCha8 word position (128-bit counter)
    pub word_pos: u128,
}

impl From<GameRngState> for GameRng {
    fn from(state: GameRngState) -> Self {
        GameRng::from_state(&state)
    }
}

impl From<GameRng> for GameRngState {
    fn from(rng: GameRng) -> Self {
        rng.state()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_determinism() {
        let mut rng1 = GameRng::new(42);
        let mut rng2 = GameRng::new(42);

        for _ in 0..100 {
            assert_eq!(rng1.gen_range_usize(0..1000), rng2.gen_range_usize(0..1000));
        }
    }

    #[test]
    fn test_coin_flip_produces_both_sides() {
        let mut rng = GameRng::new(3);
        let flips: Vec<bool> = (0..64).map(|_| rng.coin_flip()).collect();

        assert!(flips.iter().any(|&f| f));
        assert!(flips.iter().any(|&f| !f));
    }

    #[test]
    fn test_chance_extremes() {
        let mut rng = GameRng::new(1);
        for _ in 0..20 {
            assert!(!rng.chance(0.0));
            assert!(rng.chance(1.0));
            assert!(!rng.chance(-3.0));
        }
    }

    #[test]
    fn test_shuffle_vector_keeps_elements() {
        let mut rng = GameRng::new(42);
        let mut data: im::Vector<u32> = (1..=10).collect();

        rng.shuffle_vector(&mut data);

        let mut sorted: Vec<u32> = data.iter().copied().collect();
        sorted.sort_unstable();
        assert_eq!(sorted, (1..=10).collect::<Vec<_>>());
    }

    #[test]
    fn test_serde_roundtrip_resumes_sequence() {
        let mut rng = GameRng::new(42);
        for _ in 0..37 {
            rng.coin_flip();
        }

        let json = serde_json::to_string(&rng).unwrap();
        let mut restored: GameRng = serde_json::from_str(&json).unwrap();

        let expected: Vec<_> = (0..10).map(|_| rng.gen_range_usize(0..1000)).collect();
        let actual: Vec<_> = (0..10).map(|_| restored.gen_range_usize(0..1000)).collect();
        assert_eq!(expected, actual);
    }
}
