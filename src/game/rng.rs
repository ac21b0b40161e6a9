use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use uuid::Uuid;

/// Seedable RNG wrapper for deterministic game simulation.
///
/// Every random decision in the engine (card generation, deck building,
/// critical hits, AI choices) goes through one of these, so a seed fully
/// determines a game given the same sequence of intents.
#[derive(Debug, Clone)]
pub struct GameRng {
    rng: StdRng,
}

impl GameRng {
    pub fn new(seed: u64) -> Self {
        GameRng {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Returns true with probability `p` (clamped to [0, 1]).
    pub fn chance(&mut self, p: f64) -> bool {
        if p <= 0.0 {
            return false;
        }
        if p >= 1.0 {
            return true;
        }
        self.rng.gen::<f64>() < p
    }

    /// Uniform float in [0, 100).
    pub fn percent(&mut self) -> f64 {
        self.rng.gen::<f64>() * 100.0
    }

    /// Generate a random number in range [min, max).
    pub fn gen_range(&mut self, min: usize, max: usize) -> usize {
        if min >= max {
            return min;
        }
        self.rng.gen_range(min..max)
    }

    /// Pick a uniformly random element, or `None` for an empty slice.
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        let idx = self.gen_range(0, items.len());
        items.get(idx)
    }

    /// Shuffle a vec in place.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        // Fisher-Yates shuffle
        let len = slice.len();
        for i in (1..len).rev() {
            let j = self.rng.gen_range(0..=i);
            slice.swap(i, j);
        }
    }

    /// A v4 UUID built from this generator's bytes, so ids replay with the seed.
    pub fn next_uuid(&mut self) -> Uuid {
        let bytes: [u8; 16] = self.rng.gen();
        uuid::Builder::from_random_bytes(bytes).into_uuid()
    }
}
