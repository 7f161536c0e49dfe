//! Random source implementations
//!
//! Production code uses the thread-local OS-seeded generator; tests and the
//! probability estimator can use a seeded generator for reproducible runs.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::domain::services::dice_pool::RandomSource;

/// OS-seeded randomness for live rolls
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn roll_d10(&mut self) -> u8 {
        rand::thread_rng().gen_range(1..=10)
    }
}

/// Deterministic randomness from a fixed seed
#[derive(Debug, Clone)]
pub struct SeededRandom {
    rng: StdRng,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SeededRandom {
    fn roll_d10(&mut self) -> u8 {
        self.rng.gen_range(1..=10)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thread_random_stays_in_range() {
        let mut random = ThreadRandom;
        for _ in 0..1000 {
            let face = random.roll_d10();
            assert!((1..=10).contains(&face));
        }
    }

    #[test]
    fn seeded_random_is_reproducible() {
        let mut a = SeededRandom::new(123);
        let mut b = SeededRandom::new(123);
        let faces_a: Vec<u8> = (0..50).map(|_| a.roll_d10()).collect();
        let faces_b: Vec<u8> = (0..50).map(|_| b.roll_d10()).collect();
        assert_eq!(faces_a, faces_b);
    }
}
