use log::trace;
use rayon::prelude::*;

use super::{build_pool, scan_chunk, ChunkCounter};
use crate::error::Result;
use crate::partition::PartitionScheme;

// A dedicated rayon pool sized to the worker count, one task per slot.
pub struct RayonChunkCounter;

impl ChunkCounter for RayonChunkCounter {
    fn name(&self) -> &'static str {
        "rayon"
    }

    fn fill(&self, sample: &[u32], scheme: &PartitionScheme, slots: &mut [u64]) -> Result<()> {
        let pool = build_pool(scheme.workers())?;

        pool.install(|| {
            slots.par_iter_mut().enumerate().for_each(|(worker, slot)| {
                scan_chunk(&sample[scheme.range(worker)], slot);
                trace!(
                    "Worker {} on pool thread {:?}: {} primes",
                    worker,
                    rayon::current_thread_index(),
                    slot
                );
            });
        });
        Ok(())
    }
}
