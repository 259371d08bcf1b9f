//! Dice engine backing every generation step.
//!
//! All stochastic decisions in the generator reduce to sums of six-sided
//! dice, a percentile die for density checks, and uniform picks from
//! fixed tables. The engine owns its RNG so a seeded instance replays a
//! sector exactly.

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// A cup of six-sided dice over a seedable RNG.
///
/// Every call is an independent draw; there is no other hidden state.
/// Results never go negative; subtractive rolls clamp at zero.
pub struct Dice {
    rng: ChaCha8Rng,
}

impl Dice {
    /// Creates a dice cup with a fixed seed for reproducible sectors.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Creates a dice cup seeded from the system clock.
    pub fn from_clock() -> Self {
        use std::time::{SystemTime, UNIX_EPOCH};
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0);
        Self::seeded(nanos)
    }

    /// Rolls `count` d6, subtracts `drop`, and floors the result at zero.
    pub fn roll(&mut self, count: u32, drop: i32) -> i32 {
        let mut sum = 0;
        for _ in 0..count {
            sum += self.rng.random_range(1..=6);
        }
        (sum - drop).max(0)
    }

    /// One d3.
    pub fn d3(&mut self) -> i32 {
        self.rng.random_range(1..=3)
    }

    /// One d6.
    pub fn d6(&mut self) -> i32 {
        self.rng.random_range(1..=6)
    }

    /// Two d6, summed.
    pub fn two_d6(&mut self) -> i32 {
        self.roll(2, 0)
    }

    /// One percentile die (1-100), used by density presence checks.
    pub fn percentile(&mut self) -> i32 {
        self.rng.random_range(1..=100)
    }

    /// Uniform pick from a non-empty slice.
    pub fn pick<'a, T>(&mut self, options: &'a [T]) -> &'a T {
        &options[self.rng.random_range(0..options.len())]
    }
}
