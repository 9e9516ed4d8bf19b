use std::sync::Mutex;

use rand::{rngs::StdRng, Rng, SeedableRng};

/// Source of uniform picks, injectable so selection can be made
/// deterministic in tests.
pub trait RandomSource: Send + Sync {
    /// Uniform index in `0..len`. Callers never pass `len == 0`.
    fn pick_index(&self, len: usize) -> usize;

    /// Fisher-Yates shuffle driven by `pick_index`
    fn shuffle<T>(&self, items: &mut [T])
    where
        Self: Sized,
    {
        shuffle_with(self, items);
    }
}

/// Shuffle usable with a `dyn RandomSource`
pub fn shuffle_with<T>(random: &dyn RandomSource, items: &mut [T]) {
    for i in (1..items.len()).rev() {
        let j = random.pick_index(i + 1);
        items.swap(i, j);
    }
}

/// Picks one element uniformly, `None` for an empty slice
pub fn pick<'a, T>(random: &dyn RandomSource, items: &'a [T]) -> Option<&'a T> {
    if items.is_empty() {
        return None;
    }
    items.get(random.pick_index(items.len()))
}

/// Thread-local OS-seeded generator
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn pick_index(&self, len: usize) -> usize {
        rand::rng().random_range(0..len)
    }
}

/// Seeded generator for reproducible picks
pub struct SeededRandom {
    rng: Mutex<StdRng>,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl RandomSource for SeededRandom {
    fn pick_index(&self, len: usize) -> usize {
        match self.rng.lock() {
            Ok(mut rng) => rng.random_range(0..len),
            // A poisoned lock only means another picker panicked mid-draw
            Err(poisoned) => poisoned.into_inner().random_range(0..len),
        }
    }
}

/// Always picks the same position (clamped to the slice), for tests
#[derive(Debug, Clone, Copy)]
pub struct FixedRandom(pub usize);

impl RandomSource for FixedRandom {
    fn pick_index(&self, len: usize) -> usize {
        self.0.min(len.saturating_sub(1))
    }
}
