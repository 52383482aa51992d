mod builder;
mod store;

pub use builder::StatisticsBuilder;
pub use store::{ClassStatistics, Snapshot};
