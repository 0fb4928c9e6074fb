use log::{debug, trace};

use crate::error::{CountError, Result};
use crate::partition::{count_in, PartitionScheme, Remainder};

pub mod rayon_chunks;
pub mod rayon_elements;
pub mod scoped_threads;
pub mod sequential;

pub use rayon_chunks::RayonChunkCounter;
pub use rayon_elements::RayonElementCounter;
pub use scoped_threads::ScopedThreadCounter;
pub use sequential::SequentialCounter;

// Core trait for dispatch strategies. Each implementation receives one zeroed slot per worker and
// must return only after every slot holds the prime count of its worker's chunk.
pub trait ChunkCounter: Send + Sync {
    fn name(&self) -> &'static str;

    fn fill(&self, sample: &[u32], scheme: &PartitionScheme, slots: &mut [u64]) -> Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strategy {
    Sequential,
    #[default]
    Threads,
    Rayon,
    Elements,
}

impl Strategy {
    pub const ALL: [Strategy; 4] = [
        Strategy::Sequential,
        Strategy::Threads,
        Strategy::Rayon,
        Strategy::Elements,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Strategy::Sequential => SequentialCounter.name(),
            Strategy::Threads => ScopedThreadCounter.name(),
            Strategy::Rayon => RayonChunkCounter.name(),
            Strategy::Elements => RayonElementCounter.name(),
        }
    }
}

impl std::str::FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sequential" | "seq" => Ok(Strategy::Sequential),
            "threads" | "thread" => Ok(Strategy::Threads),
            "rayon" | "chunks" => Ok(Strategy::Rayon),
            "elements" | "element" => Ok(Strategy::Elements),
            _ => Err(format!("Unknown strategy: {}", s)),
        }
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// How a counting pass is run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountConfig {
    pub workers: usize,
    pub strategy: Strategy,
    pub remainder: Remainder,
}

impl CountConfig {
    pub fn new(workers: usize) -> Self {
        CountConfig {
            workers,
            strategy: Strategy::default(),
            remainder: Remainder::default(),
        }
    }

    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_remainder(mut self, remainder: Remainder) -> Self {
        self.remainder = remainder;
        self
    }
}

/// One counter per worker, zeroed before dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartialCounts {
    slots: Vec<u64>,
}

impl PartialCounts {
    pub fn zeroed(workers: usize) -> Result<Self> {
        let mut slots = Vec::new();
        slots
            .try_reserve_exact(workers)
            .map_err(|_| CountError::AllocationFailure {
                what: "partial counts",
                len: workers,
            })?;
        slots.resize(workers, 0);
        Ok(PartialCounts { slots })
    }

    pub fn as_slice(&self) -> &[u64] {
        &self.slots
    }

    pub fn as_mut_slice(&mut self) -> &mut [u64] {
        &mut self.slots
    }

    /// Sum of every slot, taken in worker order.
    pub fn total(&self) -> u64 {
        self.slots.iter().sum()
    }

    pub fn into_vec(self) -> Vec<u64> {
        self.slots
    }
}

/// Result of a counting pass: the total and the per-worker counts it was reduced from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountOutcome {
    pub total: u64,
    pub partials: Vec<u64>,
}

/// Adds the primes of one chunk to its owner's slot.
pub(crate) fn scan_chunk(values: &[u32], slot: &mut u64) {
    *slot += count_in(values);
}

// Tasks stay one per worker; the pool itself never exceeds the machine's parallelism.
pub(crate) fn build_pool(workers: usize) -> Result<rayon::ThreadPool> {
    let threads = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
        .min(workers);
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .thread_name(|index| format!("prime-worker-{}", index))
        .build()?;
    Ok(pool)
}

/// Counts the primes in `sample` with `workers` scoped threads, one contiguous chunk each.
pub fn count_primes(sample: &[u32], workers: usize) -> Result<u64> {
    count_primes_with(sample, &CountConfig::new(workers)).map(|outcome| outcome.total)
}

pub fn count_primes_with(sample: &[u32], config: &CountConfig) -> Result<CountOutcome> {
    let scheme = PartitionScheme::new(sample.len(), config.workers, config.remainder)?;
    let partials = PartialCounts::zeroed(scheme.workers())?;

    match config.strategy {
        Strategy::Sequential => run_with_counter(&SequentialCounter, sample, &scheme, partials),
        Strategy::Threads => run_with_counter(&ScopedThreadCounter, sample, &scheme, partials),
        Strategy::Rayon => run_with_counter(&RayonChunkCounter, sample, &scheme, partials),
        Strategy::Elements => run_with_counter(&RayonElementCounter, sample, &scheme, partials),
    }
}

fn run_with_counter<C: ChunkCounter>(
    counter: &C,
    sample: &[u32],
    scheme: &PartitionScheme,
    mut partials: PartialCounts,
) -> Result<CountOutcome> {
    debug!(
        "Dispatching {} values to {} workers ({} per chunk, strategy {})",
        scheme.sample_len(),
        scheme.workers(),
        scheme.chunk_size(),
        counter.name()
    );

    counter.fill(sample, scheme, partials.as_mut_slice())?;

    let total = partials.total();
    trace!("Partial counts {:?} reduce to {}", partials.as_slice(), total);

    Ok(CountOutcome {
        total,
        partials: partials.into_vec(),
    })
}
