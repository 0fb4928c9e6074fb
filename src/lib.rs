//! Counts the primes in a random sample by splitting it into contiguous chunks, one per worker.
//!
//! Each worker scans its own chunk and writes only its own slot of the partial counts; the slots
//! are summed after every worker has been joined. The total does not depend on the worker count
//! or on the dispatch strategy.
//!
//! ```
//! use primecount::count_primes;
//!
//! let sample: Vec<u32> = (2..=11).collect();
//! assert_eq!(count_primes(&sample, 2).unwrap(), 5);
//! ```
pub mod counters;
pub mod error;
pub mod partition;
pub mod report;
pub mod sample;

pub use counters::{count_primes, count_primes_with, CountConfig, CountOutcome, Strategy};
pub use error::CountError;
pub use partition::{is_prime, owner_of, PartitionScheme, Remainder};
pub use sample::{Sample, SampleSource, UniformSource};
