use rayon::prelude::*;

use super::{build_pool, ChunkCounter};
use crate::error::Result;
use crate::partition::{is_prime, PartitionScheme};

// Per-element dispatch. Every element is its own rayon item, statically assigned to its owner's
// slot; a slot is only written by the task that owns it, after its elements have been reduced.
pub struct RayonElementCounter;

impl ChunkCounter for RayonElementCounter {
    fn name(&self) -> &'static str {
        "elements"
    }

    fn fill(&self, sample: &[u32], scheme: &PartitionScheme, slots: &mut [u64]) -> Result<()> {
        let pool = build_pool(scheme.workers())?;

        pool.install(|| {
            slots.par_iter_mut().enumerate().for_each(|(worker, slot)| {
                *slot += scheme
                    .range(worker)
                    .into_par_iter()
                    .filter(|&index| {
                        debug_assert_eq!(scheme.owner(index), worker);
                        is_prime(sample[index])
                    })
                    .count() as u64;
            });
        });
        Ok(())
    }
}
