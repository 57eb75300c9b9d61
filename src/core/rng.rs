//! Deterministic random number generation.
//!
//! Every random decision in a match (deck shuffles, random discards, the
//! easy AI's picks) flows through one [`MatchRng`] owned by the engine, so
//! two engine copies fed the same seed and the same action sequence reach
//! bit-identical state.
//!
//! ## Replay
//!
//! The RNG state is capturable in O(1) via [`MatchRng::state`] and restored
//! with [`MatchRng::from_state`], regardless of how many numbers have been
//! generated.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Seedable deterministic RNG for a single match.
///
/// Uses ChaCha8 for speed while keeping a high-quality stream.
#[derive(Clone, Debug)]
pub struct MatchRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl MatchRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Generate a random usize in the given range.
    pub fn gen_range_usize(&mut self, range: std::ops::Range<usize>) -> usize {
        self.inner.gen_range(range)
    }

    /// Shuffle a slice in place.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.inner);
    }

    /// Choose a random element from a slice.
    #[must_use]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.inner)
    }

    /// Get the current state for replay checkpointing.
    #[must_use]
    pub fn state(&self) -> MatchRngState {
        MatchRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
        }
    }

    /// Restore from a saved state.
    #[must_use]
    pub fn from_state(state: &MatchRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
        }
    }
}

/// Serializable RNG state.
///
/// Uses the ChaCha8 word position for O(1) capture.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRngState {
    /// Original seed.
    pub seed: u64,
    /// ChaCha8 word position (128-bit counter).
    pub word_pos: u128,
}
