use std::num::NonZeroUsize;

use log::info;
use rayon::{ThreadPool, ThreadPoolBuilder, prelude::*};

use super::ExecutionSpec;
use crate::{
    error::Result,
    exchange::{ExchangeOptimizer, PartialUpdate},
    history::Word,
    statistics::ClassStatistics,
};

/// Runs one exchange sweep per vocabulary partition in parallel.
///
/// Every partition reads the same statistics and never sees the moves of the others, the
/// returned updates must be merged before the next sweep.
#[derive(Debug)]
pub struct ParallelSweep {
    pool: Option<ThreadPool>,
    partitions: NonZeroUsize,
}

impl ParallelSweep {
    /// Creates a new `ParallelSweep`.
    ///
    /// # Arguments
    /// * `spec` - The execution specification.
    ///
    /// # Returns
    /// A new `ParallelSweep` or an error if the dedicated thread pool couldn't be built.
    pub fn new(spec: &ExecutionSpec) -> Result<Self> {
        let pool = spec
            .threads
            .map(|threads| {
                ThreadPoolBuilder::new()
                    .num_threads(threads.get())
                    .thread_name(|i| format!("exchange-{i}"))
                    .build()
            })
            .transpose()?;

        Ok(Self {
            pool,
            partitions: spec.partitions,
        })
    }

    /// Splits `vocabulary` into the configured amount of partitions.
    pub fn split(&self, vocabulary: &[Word]) -> Vec<Vec<Word>> {
        split_vocabulary(vocabulary, self.partitions)
    }

    /// Sweeps every partition over the shared `statistics`.
    ///
    /// # Arguments
    /// * `statistics` - The global statistics, read by every partition.
    /// * `partitions` - Disjoint vocabulary subsets, one optimizer each.
    ///
    /// # Returns
    /// The updates in partition order, or the first error encountered.
    pub fn run(
        &self,
        statistics: &ClassStatistics,
        partitions: &[Vec<Word>],
    ) -> Result<Vec<PartialUpdate>> {
        info!(partitions = partitions.len(); "starting parallel sweep");

        let sweep = || {
            partitions
                .par_iter()
                .map(|vocabulary| ExchangeOptimizer::new(statistics.snapshot(vocabulary))?.cluster())
                .collect::<Result<Vec<_>>>()
        };

        let updates = match &self.pool {
            Some(pool) => pool.install(sweep)?,
            None => sweep()?,
        };

        let moves: usize = updates.iter().map(PartialUpdate::moves).sum();
        info!(partitions = updates.len(), moves = moves; "parallel sweep finished");

        Ok(updates)
    }
}

/// Splits `vocabulary` into at most `partitions` contiguous, order preserving chunks.
///
/// # Arguments
/// * `vocabulary` - The words to split.
/// * `partitions` - The maximum amount of chunks.
///
/// # Returns
/// The chunks, fewer than `partitions` if there aren't enough words.
pub fn split_vocabulary(vocabulary: &[Word], partitions: NonZeroUsize) -> Vec<Vec<Word>> {
    let size = vocabulary.len().div_ceil(partitions.get()).max(1);

    vocabulary
        .chunks(size)
        .map(|chunk| chunk.to_vec())
        .collect()
}
