pub mod error;
pub mod exchange;
pub mod execution;
pub mod history;
pub mod objective;
pub mod statistics;

pub use error::{ExchangeErr, Result};
pub use exchange::{ExchangeOptimizer, PartialUpdate};
pub use execution::{ExchangeHandle, ExecutionSpec, ParallelSweep};
pub use history::{ClassId, NgramHistory, Word};
pub use statistics::{ClassStatistics, Snapshot, StatisticsBuilder};
