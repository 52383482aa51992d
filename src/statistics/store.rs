use std::collections::{BTreeMap, HashMap};

use crate::{
    error::{ExchangeErr, Result},
    history::{ClassId, NgramHistory, Word},
};

/// The global clustering state an exchange sweep reads from.
///
/// It's never mutated by an optimizer, so a single instance can be shared by every
/// partition running concurrently.
#[derive(Debug, Clone)]
pub struct ClassStatistics {
    num_classes: usize,
    class_count: Box<[f64]>,
    class_history_count: Box<[HashMap<NgramHistory, f64>]>,
    history_count: HashMap<Word, BTreeMap<NgramHistory, f64>>,
    word_to_class: HashMap<Word, ClassId>,
    objective: f64,
}

impl ClassStatistics {
    /// Creates a new `ClassStatistics` from already aggregated counts.
    ///
    /// # Arguments
    /// * `class_count` - The class marginal masses, one per class.
    /// * `class_history_count` - The per class history counts, one map per class.
    /// * `history_count` - The history counts of every word.
    /// * `word_to_class` - The current class of every word.
    /// * `objective` - The objective value of this state.
    ///
    /// # Returns
    /// A new `ClassStatistics` instance or an error if there are less than two classes,
    /// the per class tables disagree in length or an assignment is out of range.
    pub fn new(
        class_count: Vec<f64>,
        class_history_count: Vec<HashMap<NgramHistory, f64>>,
        history_count: HashMap<Word, BTreeMap<NgramHistory, f64>>,
        word_to_class: HashMap<Word, ClassId>,
        objective: f64,
    ) -> Result<Self> {
        let num_classes = class_count.len();
        if num_classes < 2 {
            return Err(ExchangeErr::TooFewClasses { got: num_classes });
        }

        if class_history_count.len() != num_classes {
            return Err(ExchangeErr::SizeMismatch {
                what: "class history counts",
                got: class_history_count.len(),
                expected: num_classes,
            });
        }

        if let Some(&class) = word_to_class.values().find(|&&class| class >= num_classes) {
            return Err(ExchangeErr::ClassOutOfRange { class, num_classes });
        }

        Ok(Self {
            num_classes,
            class_count: class_count.into_boxed_slice(),
            class_history_count: class_history_count.into_boxed_slice(),
            history_count,
            word_to_class,
            objective,
        })
    }

    pub fn num_classes(&self) -> usize {
        self.num_classes
    }

    /// The objective value these counts were produced with.
    pub fn objective(&self) -> f64 {
        self.objective
    }

    /// Returns the base class marginal mass of `class`.
    pub fn class_count(&self, class: ClassId) -> f64 {
        self.class_count[class]
    }

    /// Returns the base count of `history` inside `class`, zero when never observed.
    pub fn class_history_count(&self, class: ClassId, history: &NgramHistory) -> f64 {
        self.class_history_count[class]
            .get(history)
            .copied()
            .unwrap_or(0.)
    }

    /// Iterates the histories `word` co-occurs with, in a stable order.
    ///
    /// # Arguments
    /// * `word` - The word to look up.
    ///
    /// # Returns
    /// Every `(history, count)` pair of the word, nothing for a word without histories.
    pub fn histories(&self, word: &str) -> impl Iterator<Item = (&NgramHistory, f64)> {
        self.history_count
            .get(word)
            .into_iter()
            .flat_map(|histories| histories.iter().map(|(history, &count)| (history, count)))
    }

    /// Returns the current global class of `word`.
    pub fn class_of(&self, word: &str) -> Option<ClassId> {
        self.word_to_class.get(word).copied()
    }

    /// The amount of words with a class assignment.
    pub fn vocabulary_len(&self) -> usize {
        self.word_to_class.len()
    }

    /// Iterates every assigned word, in no particular order.
    pub fn words(&self) -> impl Iterator<Item = &Word> {
        self.word_to_class.keys()
    }

    /// Borrows these statistics together with the vocabulary subset of one partition.
    ///
    /// # Arguments
    /// * `vocabulary` - The words the partition owns, in sweep order.
    ///
    /// # Returns
    /// A new `Snapshot`.
    pub fn snapshot<'a>(&'a self, vocabulary: &'a [Word]) -> Snapshot<'a> {
        Snapshot {
            statistics: self,
            vocabulary,
        }
    }
}

/// The read-only input of a single sweep: the global statistics plus the words to optimize.
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    pub statistics: &'a ClassStatistics,
    pub vocabulary: &'a [Word],
}
