use std::num::NonZeroUsize;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// The specification for a `ParallelSweep`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionSpec {
    /// Size of a dedicated thread pool, the global rayon pool is used when absent.
    #[serde(default)]
    pub threads: Option<NonZeroUsize>,
    /// How many partitions the vocabulary is split into.
    #[serde(default = "default_partitions")]
    pub partitions: NonZeroUsize,
}

fn default_partitions() -> NonZeroUsize {
    NonZeroUsize::MIN
}

impl ExecutionSpec {
    /// Parses an `ExecutionSpec` from its JSON representation.
    ///
    /// # Arguments
    /// * `json` - The serialized specification, missing fields take their default.
    ///
    /// # Returns
    /// The parsed spec or a `Spec` error if the JSON is invalid.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl Default for ExecutionSpec {
    fn default() -> Self {
        Self {
            threads: None,
            partitions: default_partitions(),
        }
    }
}
