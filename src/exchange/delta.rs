use std::collections::HashMap;

use crate::{
    history::{ClassId, NgramHistory},
    statistics::ClassStatistics,
};

/// Net changes a sweep has made to the global class counts.
///
/// Class marginals are dense since there are few classes, class/history counts are sparse
/// and only hold the histories touched by committed moves.
#[derive(Debug, Clone)]
pub struct DeltaCounts {
    class_count: Box<[f64]>,
    class_history_count: Box<[HashMap<NgramHistory, f64>]>,
}

impl DeltaCounts {
    /// Creates a new, all zero, `DeltaCounts`.
    ///
    /// # Arguments
    /// * `num_classes` - The amount of classes to track.
    ///
    /// # Returns
    /// A new `DeltaCounts` instance.
    pub fn new(num_classes: usize) -> Self {
        Self {
            class_count: vec![0.; num_classes].into_boxed_slice(),
            class_history_count: vec![HashMap::new(); num_classes].into_boxed_slice(),
        }
    }

    pub fn class_count(&self, class: ClassId) -> f64 {
        self.class_count[class]
    }

    pub fn class_history_count(&self, class: ClassId, history: &NgramHistory) -> f64 {
        self.class_history_count[class]
            .get(history)
            .copied()
            .unwrap_or(0.)
    }

    /// Moves `mass` units of class marginal from `from` to `to`.
    pub fn shift_class(&mut self, from: ClassId, to: ClassId, mass: f64) {
        self.class_count[from] -= mass;
        self.class_count[to] += mass;
    }

    /// Moves `count` observations of `history` from `from` to `to`.
    pub fn shift_history(&mut self, from: ClassId, to: ClassId, history: &NgramHistory, count: f64) {
        *self.class_history_count[from]
            .entry(history.clone())
            .or_insert(0.) -= count;

        *self.class_history_count[to]
            .entry(history.clone())
            .or_insert(0.) += count;
    }

    /// Splits the deltas into the class marginal and class/history tables.
    pub fn into_parts(self) -> (Box<[f64]>, Box<[HashMap<NgramHistory, f64>]>) {
        (self.class_count, self.class_history_count)
    }
}

/// A read view of `base + delta`, the counts as they'd look if the sweep's moves were merged.
///
/// Every count read by the exchange kernel goes through this view, the merged tables are
/// never materialized.
#[derive(Debug, Clone, Copy)]
pub struct EffectiveCounts<'a> {
    base: &'a ClassStatistics,
    delta: &'a DeltaCounts,
}

impl<'a> EffectiveCounts<'a> {
    pub fn new(base: &'a ClassStatistics, delta: &'a DeltaCounts) -> Self {
        Self { base, delta }
    }

    pub fn class_count(&self, class: ClassId) -> f64 {
        self.base.class_count(class) + self.delta.class_count(class)
    }

    pub fn class_history_count(&self, class: ClassId, history: &NgramHistory) -> f64 {
        self.base.class_history_count(class, history) + self.delta.class_history_count(class, history)
    }
}
