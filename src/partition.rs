//! Primality test and the static index-to-worker partition.
//!
//! Nothing in here holds state: the scheme is computed once by the orchestrator and then copied
//! into every task, which only ever reads it.

use std::ops::Range;

use crate::error::{CountError, Result};

/// Trial division up to and including the ceiling of the square root.
///
/// Values below 2 are never prime. The candidate divisor never reaches the value itself, so 2 and
/// 3 (whose rounded-up roots are 2) are still reported as prime.
pub fn is_prime(value: u32) -> bool {
    if value < 2 {
        return false;
    }
    let bound = ceil_sqrt(value).min(value - 1);
    (2..=bound).all(|j| value % j != 0)
}

fn ceil_sqrt(value: u32) -> u32 {
    // Exact for every u32: the root of a perfect square is representable in an f64.
    (value as f64).sqrt().ceil() as u32
}

/// Index of the worker owning `index` when every worker scans `chunk_size` consecutive values.
pub fn owner_of(index: usize, chunk_size: usize) -> usize {
    debug_assert!(chunk_size > 0, "chunk size must be positive");
    index / chunk_size
}

/// Number of primes in a contiguous run of sample values.
pub fn count_in(values: &[u32]) -> u64 {
    values.iter().filter(|&&value| is_prime(value)).count() as u64
}

/// What to do with the tail of a sample whose length is not a multiple of the worker count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Remainder {
    /// The last worker's chunk runs to the end of the sample.
    #[default]
    WidenLast,
    /// Reject the configuration.
    Strict,
}

impl Remainder {
    pub fn name(&self) -> &'static str {
        match self {
            Remainder::WidenLast => "widen",
            Remainder::Strict => "strict",
        }
    }
}

impl std::fmt::Display for Remainder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for Remainder {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "widen" | "widen-last" => Ok(Remainder::WidenLast),
            "strict" => Ok(Remainder::Strict),
            _ => Err(format!("Unknown remainder policy: {}", s)),
        }
    }
}

/// Contiguous chunking of `sample_len` indices over `workers` tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartitionScheme {
    sample_len: usize,
    workers: usize,
    chunk_size: usize,
    remainder: Remainder,
}

impl PartitionScheme {
    pub fn new(sample_len: usize, workers: usize, remainder: Remainder) -> Result<Self> {
        if workers == 0 {
            return Err(CountError::invalid("worker count must be at least 1"));
        }
        if sample_len < workers {
            return Err(CountError::invalid(format!(
                "a sample of {} values cannot be split over {} workers",
                sample_len, workers
            )));
        }
        if remainder == Remainder::Strict && sample_len % workers != 0 {
            return Err(CountError::invalid(format!(
                "sample size {} is not divisible by {} workers",
                sample_len, workers
            )));
        }

        Ok(PartitionScheme {
            sample_len,
            workers,
            chunk_size: sample_len / workers,
            remainder,
        })
    }

    pub fn sample_len(&self) -> usize {
        self.sample_len
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    pub fn remainder(&self) -> Remainder {
        self.remainder
    }

    /// Indices scanned by `worker`. The last range absorbs any remainder.
    pub fn range(&self, worker: usize) -> Range<usize> {
        let start = worker * self.chunk_size;
        let end = if worker + 1 == self.workers {
            self.sample_len
        } else {
            start + self.chunk_size
        };
        start..end
    }

    pub fn ranges(&self) -> impl Iterator<Item = Range<usize>> + '_ {
        (0..self.workers).map(move |worker| self.range(worker))
    }

    /// Worker that owns `index`; agrees with `range` for every index below `sample_len`.
    pub fn owner(&self, index: usize) -> usize {
        owner_of(index, self.chunk_size).min(self.workers - 1)
    }
}
