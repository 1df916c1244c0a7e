use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// The single random source shared by the archetype AI engines and the
/// enemy selector. Seeded once per session so recorded playthroughs
/// and regression tests replay bit-for-bit.
#[derive(Debug, Clone)]
pub struct SessionRng {
    rng: ChaCha8Rng,
}

impl SessionRng {
    pub fn from_seed(seed: u64) -> Self {
        SessionRng {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Uniform draw in `0..=max`, matching the legacy `rand(max)`
    /// helper the decision cadences are written against. Non-positive
    /// bounds collapse to zero rather than panicking.
    pub fn roll(&mut self, max: i32) -> i32 {
        if max <= 0 {
            return 0;
        }
        self.rng.gen_range(0..=max)
    }

    /// One-in-`n` chance. `n <= 1` always fires.
    pub fn chance(&mut self, n: i32) -> bool {
        if n <= 1 {
            return true;
        }
        self.rng.gen_range(0..n) == 0
    }

    /// Pick one element of a non-empty slice.
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        debug_assert!(!items.is_empty());
        let index = self.rng.gen_range(0..items.len());
        &items[index]
    }
}
