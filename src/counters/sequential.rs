use super::{scan_chunk, ChunkCounter};
use crate::error::Result;
use crate::partition::PartitionScheme;

// Scans every chunk on the calling thread, one after another. Baseline for timing comparisons.
pub struct SequentialCounter;

impl ChunkCounter for SequentialCounter {
    fn name(&self) -> &'static str {
        "sequential"
    }

    fn fill(&self, sample: &[u32], scheme: &PartitionScheme, slots: &mut [u64]) -> Result<()> {
        for (worker, slot) in slots.iter_mut().enumerate() {
            scan_chunk(&sample[scheme.range(worker)], slot);
        }
        Ok(())
    }
}
