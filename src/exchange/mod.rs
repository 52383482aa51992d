mod delta;
mod optimizer;
mod update;

pub use delta::{DeltaCounts, EffectiveCounts};
pub use optimizer::ExchangeOptimizer;
pub use update::PartialUpdate;
