mod handle;
mod parallel;
mod spec;

pub use handle::ExchangeHandle;
pub use parallel::{ParallelSweep, split_vocabulary};
pub use spec::ExecutionSpec;
