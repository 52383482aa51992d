use std::collections::HashMap;

use crate::history::{ClassId, NgramHistory, Word};

/// The result of one sweep over a vocabulary partition.
///
/// It owns everything it holds, nothing refers back to the optimizer that produced it.
/// Merging it into the global statistics is up to the caller.
#[derive(Debug, Clone)]
pub struct PartialUpdate {
    word_to_class: HashMap<Word, ClassId>,
    delta_class_count: Box<[f64]>,
    delta_class_history_count: Box<[HashMap<NgramHistory, f64>]>,
    objective: f64,
    moves: usize,
}

impl PartialUpdate {
    pub(crate) fn new(
        word_to_class: HashMap<Word, ClassId>,
        delta_class_count: Box<[f64]>,
        delta_class_history_count: Box<[HashMap<NgramHistory, f64>]>,
        objective: f64,
        moves: usize,
    ) -> Self {
        Self {
            word_to_class,
            delta_class_count,
            delta_class_history_count,
            objective,
            moves,
        }
    }

    /// The class of every word of the partition after the sweep.
    pub fn word_to_class(&self) -> &HashMap<Word, ClassId> {
        &self.word_to_class
    }

    pub fn class_of(&self, word: &str) -> Option<ClassId> {
        self.word_to_class.get(word).copied()
    }

    /// The net change to each class marginal, indexed by class.
    pub fn delta_class_count(&self) -> &[f64] {
        &self.delta_class_count
    }

    /// The net change to each class/history count, indexed by class.
    pub fn delta_class_history_count(&self) -> &[HashMap<NgramHistory, f64>] {
        &self.delta_class_history_count
    }

    /// The objective value of the partition's view once every move was committed.
    pub fn objective(&self) -> f64 {
        self.objective
    }

    /// The amount of words that changed class.
    pub fn moves(&self) -> usize {
        self.moves
    }

    /// Consumes the update and returns its assignment and delta tables.
    pub fn into_parts(
        self,
    ) -> (
        HashMap<Word, ClassId>,
        Box<[f64]>,
        Box<[HashMap<NgramHistory, f64>]>,
    ) {
        (
            self.word_to_class,
            self.delta_class_count,
            self.delta_class_history_count,
        )
    }
}
