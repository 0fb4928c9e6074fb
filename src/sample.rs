//! Random sample generation.
//!
//! The counter only needs a finite, ordered slice of values; this module supplies one drawn
//! uniformly from `[0, upper_bound)` with a xoshiro256++ generator.

use std::ops::Deref;

use rand::Rng;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;

use crate::error::{CountError, Result};

/// Fixed-length, immutable run of values handed to the counter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sample {
    values: Vec<u32>,
}

impl Deref for Sample {
    type Target = [u32];

    fn deref(&self) -> &[u32] {
        &self.values
    }
}

pub trait SampleSource {
    fn generate(&mut self, size: usize, upper_bound: u32) -> Result<Sample>;
}

/// Uniform source backed by xoshiro256++.
pub struct UniformSource {
    rng: Xoshiro256PlusPlus,
}

impl UniformSource {
    pub fn new() -> Self {
        UniformSource {
            rng: Xoshiro256PlusPlus::from_entropy(),
        }
    }

    /// Same seed, same sample.
    pub fn with_seed(seed: u64) -> Self {
        UniformSource {
            rng: Xoshiro256PlusPlus::seed_from_u64(seed),
        }
    }
}

impl Default for UniformSource {
    fn default() -> Self {
        Self::new()
    }
}

impl SampleSource for UniformSource {
    fn generate(&mut self, size: usize, upper_bound: u32) -> Result<Sample> {
        if upper_bound == 0 {
            return Err(CountError::invalid("upper bound must be at least 1"));
        }

        let mut values = Vec::new();
        values
            .try_reserve_exact(size)
            .map_err(|_| CountError::AllocationFailure {
                what: "sample",
                len: size,
            })?;
        values.extend((0..size).map(|_| self.rng.gen_range(0..upper_bound)));

        Ok(Sample { values })
    }
}
