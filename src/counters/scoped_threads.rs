use std::thread;

use log::trace;

use super::{scan_chunk, ChunkCounter};
use crate::error::{CountError, Result};
use crate::partition::PartitionScheme;

// One OS thread per chunk. Each thread borrows its chunk and its own slot; the scope is the join.
pub struct ScopedThreadCounter;

impl ChunkCounter for ScopedThreadCounter {
    fn name(&self) -> &'static str {
        "threads"
    }

    fn fill(&self, sample: &[u32], scheme: &PartitionScheme, slots: &mut [u64]) -> Result<()> {
        // Threads that did start are still joined when the scope ends, even after a failed spawn.
        thread::scope(|scope| {
            for (worker, slot) in slots.iter_mut().enumerate() {
                let range = scheme.range(worker);
                let chunk = &sample[range.clone()];
                thread::Builder::new()
                    .name(format!("prime-worker-{}", worker))
                    .spawn_scoped(scope, move || {
                        scan_chunk(chunk, slot);
                        trace!("Worker {} scanned {:?}: {} primes", worker, range, slot);
                    })
                    .map_err(|source| CountError::Spawn { worker, source })?;
            }
            Ok(())
        })
    }
}
