#[cfg(test)]
#[path = "../../tests/unit/utils/random_test.rs"]
mod random_test;

use rand::prelude::*;
use std::cell::RefCell;

/// Provides the way to use randomized values in generic way.
pub trait Random {
    /// Produces integral random value, uniformly distributed on the closed interval [min, max].
    fn uniform_int(&self, min: i32, max: i32) -> i32;

    /// Produces real random value, uniformly distributed on the closed interval [min, max).
    fn uniform_real(&self, min: f64, max: f64) -> f64;

    /// Shuffles given indices in place.
    fn shuffle(&self, indices: &mut [usize]);
}

/// A default random implementation which can be repeatable with a fixed seed.
pub struct DefaultRandom {
    rng: RefCell<SmallRng>,
}

impl DefaultRandom {
    /// Creates an instance of `DefaultRandom` seeded from entropy.
    pub fn new() -> Self {
        Self { rng: RefCell::new(SmallRng::from_entropy()) }
    }

    /// Creates an instance of `DefaultRandom` with a fixed seed, so that all
    /// random decisions of a planning run can be replayed.
    pub fn new_repeatable(seed: u64) -> Self {
        Self { rng: RefCell::new(SmallRng::seed_from_u64(seed)) }
    }
}

impl Default for DefaultRandom {
    fn default() -> Self {
        Self::new()
    }
}

impl Random for DefaultRandom {
    fn uniform_int(&self, min: i32, max: i32) -> i32 {
        if min == max {
            return min;
        }

        debug_assert!(min < max);
        self.rng.borrow_mut().gen_range(min..=max)
    }

    fn uniform_real(&self, min: f64, max: f64) -> f64 {
        if (min - max).abs() < f64::EPSILON {
            return min;
        }

        debug_assert!(min < max);
        self.rng.borrow_mut().gen_range(min..max)
    }

    fn shuffle(&self, indices: &mut [usize]) {
        let mut rng = self.rng.borrow_mut();
        indices.shuffle(&mut *rng);
    }
}
