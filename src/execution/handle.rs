use std::{ops::Deref, sync::Arc};

use tokio::task;

use crate::{
    error::Result,
    exchange::{ExchangeOptimizer, PartialUpdate},
    history::Word,
    statistics::ClassStatistics,
};

/// Runs exchange sweeps from async code.
///
/// Each sweep is moved onto tokio's blocking pool, so callers can await several partitions
/// without stalling the runtime's workers.
#[derive(Debug, Clone)]
pub struct ExchangeHandle(Arc<ClassStatistics>);

impl Deref for ExchangeHandle {
    type Target = ClassStatistics;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl ExchangeHandle {
    /// Creates a new `ExchangeHandle`.
    ///
    /// # Arguments
    /// * `statistics` - The statistics every sweep of this handle reads from.
    ///
    /// # Returns
    /// A new `ExchangeHandle` instance.
    pub fn new(statistics: Arc<ClassStatistics>) -> Self {
        Self(statistics)
    }

    /// Runs a whole sweep over `vocabulary` on the blocking thread pool.
    ///
    /// # Arguments
    /// * `vocabulary` - The partition to optimize.
    ///
    /// # Returns
    /// The partition's update, or the sweep's error if it failed or panicked.
    pub async fn sweep(&self, vocabulary: Vec<Word>) -> Result<PartialUpdate> {
        let statistics = Arc::clone(&self.0);

        task::spawn_blocking(move || {
            ExchangeOptimizer::new(statistics.snapshot(&vocabulary))?.cluster()
        })
        .await?
    }
}
