use std::{collections::HashMap, mem};

use log::{debug, info, warn};

use super::{DeltaCounts, EffectiveCounts, PartialUpdate};
use crate::{
    error::{ExchangeErr, Result},
    history::{ClassId, Word},
    objective::xlogx,
    statistics::{ClassStatistics, Snapshot},
};

/// The class marginal mass a single word carries between classes.
const WORD_MASS: f64 = 1.;

/// Greedy exchange optimizer for the one-sided class model over a single vocabulary partition.
///
/// It reads the global counts through a shared `ClassStatistics` and records its own moves in a
/// local `DeltaCounts`, so later words of the same sweep observe the moves of earlier ones
/// without the global state ever being written. An instance runs exactly one sweep.
#[derive(Debug)]
pub struct ExchangeOptimizer<'a> {
    statistics: &'a ClassStatistics,
    vocabulary: Vec<Word>,
    word_to_class: HashMap<Word, ClassId>,
    delta: DeltaCounts,
    objective: f64,
    moves: usize,
}

impl<'a> ExchangeOptimizer<'a> {
    /// Creates a new `ExchangeOptimizer`.
    ///
    /// Only the assignment of the partition's words is copied, every other count is read
    /// through the snapshot for the whole sweep. Repeated words are visited once, at their
    /// first position.
    ///
    /// # Arguments
    /// * `snapshot` - The global statistics and the words this optimizer owns.
    ///
    /// # Returns
    /// A new `ExchangeOptimizer` or an `UnknownWord` error if a word of the partition has
    /// no global class.
    pub fn new(snapshot: Snapshot<'a>) -> Result<Self> {
        let Snapshot {
            statistics,
            vocabulary,
        } = snapshot;

        let mut order = Vec::with_capacity(vocabulary.len());
        let mut word_to_class = HashMap::with_capacity(vocabulary.len());

        for word in vocabulary {
            let Some(class) = statistics.class_of(word) else {
                return Err(ExchangeErr::UnknownWord { word: word.clone() });
            };

            if word_to_class.insert(word.clone(), class).is_none() {
                order.push(word.clone());
            }
        }

        Ok(Self {
            statistics,
            vocabulary: order,
            word_to_class,
            delta: DeltaCounts::new(statistics.num_classes()),
            objective: statistics.objective(),
            moves: 0,
        })
    }

    /// The running objective value, including every move committed so far.
    pub fn objective(&self) -> f64 {
        self.objective
    }

    /// Returns the local class of `word`, `None` if it isn't part of this partition.
    pub fn class_of(&self, word: &str) -> Option<ClassId> {
        self.word_to_class.get(word).copied()
    }

    /// The moves committed so far, as deltas over the global counts.
    pub fn delta(&self) -> &DeltaCounts {
        &self.delta
    }

    /// The global counts as seen by this optimizer.
    pub fn counts(&self) -> EffectiveCounts<'_> {
        EffectiveCounts::new(self.statistics, &self.delta)
    }

    /// Evaluates the objective value if `word` moved from `from` to `to`, holding every other
    /// assignment fixed. Nothing is modified.
    ///
    /// # Arguments
    /// * `word` - A word of this partition.
    /// * `from` - The class the word leaves.
    /// * `to` - The class the word joins.
    ///
    /// # Returns
    /// The resulting objective value, or an error if the move is malformed or the counts of
    /// `from` can't hold the word.
    pub fn evaluate_move(&self, word: &str, from: ClassId, to: ClassId) -> Result<f64> {
        self.check_move(word, from, to)?;
        self.score_move(word, from, to)
    }

    /// Moves `word` from `from` to `to`, recording the count deltas and the new assignment.
    ///
    /// The objective is recomputed with the same arithmetic `evaluate_move` uses, so for the
    /// same prior state both return the exact same value.
    ///
    /// # Arguments
    /// * `word` - A word of this partition.
    /// * `from` - The class the word leaves.
    /// * `to` - The class the word joins.
    ///
    /// # Returns
    /// The new running objective value or an error, in which case nothing was modified.
    pub fn commit_move(&mut self, word: &str, from: ClassId, to: ClassId) -> Result<f64> {
        self.check_move(word, from, to)?;
        let objective = self.score_move(word, from, to)?;

        let statistics = self.statistics;
        for (history, count) in statistics.histories(word) {
            self.delta.shift_history(from, to, history, count);
        }

        self.delta.shift_class(from, to, WORD_MASS);

        if let Some(class) = self.word_to_class.get_mut(word) {
            *class = to;
        }

        self.objective = objective;
        self.moves += 1;

        debug!(word = word, from = from, to = to, objective = objective; "committed move");
        Ok(objective)
    }

    /// Runs a single greedy pass over the partition and returns its update.
    ///
    /// Words are visited in partition order. Each one moves to the class with the strictly
    /// greatest objective, the lowest class id winning ties and the current class winning
    /// when nothing improves.
    ///
    /// # Returns
    /// The partition's `PartialUpdate`, or the first error found, which aborts the sweep.
    pub fn cluster(mut self) -> Result<PartialUpdate> {
        let num_classes = self.statistics.num_classes();
        let vocabulary = mem::take(&mut self.vocabulary);

        for word in &vocabulary {
            let Some(current) = self.class_of(word) else {
                return Err(ExchangeErr::UnknownWord { word: word.clone() });
            };

            let mut best_class = current;
            let mut best = self.objective;

            for candidate in (0..num_classes).filter(|&class| class != current) {
                let objective = self.evaluate_move(word, current, candidate)?;
                if objective > best {
                    best_class = candidate;
                    best = objective;
                }
            }

            if best_class == current {
                continue;
            }

            let committed = self.commit_move(word, current, best_class)?;
            if committed != best {
                warn!(
                    "inconsistent move: word={word} from={current} to={best_class} expected={best} got={committed}"
                );

                return Err(ExchangeErr::InconsistentMove {
                    word: word.clone(),
                    from: current,
                    to: best_class,
                    expected: best,
                    got: committed,
                });
            }
        }

        info!(
            words = vocabulary.len(),
            moves = self.moves,
            objective = self.objective;
            "sweep finished"
        );

        let (delta_class_count, delta_class_history_count) = self.delta.into_parts();

        Ok(PartialUpdate::new(
            self.word_to_class,
            delta_class_count,
            delta_class_history_count,
            self.objective,
            self.moves,
        ))
    }

    /// Validates the shape of a move before any count is read.
    fn check_move(&self, word: &str, from: ClassId, to: ClassId) -> Result<()> {
        let num_classes = self.statistics.num_classes();

        for class in [from, to] {
            if class >= num_classes {
                return Err(ExchangeErr::ClassOutOfRange { class, num_classes });
            }
        }

        if !self.word_to_class.contains_key(word) {
            return Err(ExchangeErr::UnknownWord {
                word: Word::from(word),
            });
        }

        if from == to {
            return Err(ExchangeErr::SelfMove {
                word: Word::from(word),
                class: from,
            });
        }

        Ok(())
    }

    /// Computes the objective after moving `word`, touching only its histories and the two
    /// class marginals involved.
    fn score_move(&self, word: &str, from: ClassId, to: ClassId) -> Result<f64> {
        let counts = self.counts();
        let mut objective = self.objective;

        for (history, count) in self.statistics.histories(word) {
            let from_count = counts.class_history_count(from, history);
            if from_count <= 0. {
                return Err(ExchangeErr::NonPositiveCount {
                    class: from,
                    history: Some(history.clone()),
                    count: from_count,
                });
            }

            let to_count = counts.class_history_count(to, history);
            if to_count < 0. {
                return Err(ExchangeErr::NegativeCount {
                    class: to,
                    history: Some(history.clone()),
                    count: to_count,
                });
            }

            objective -= xlogx(from_count);
            objective -= xlogx(to_count);

            let from_count = from_count - count;
            if from_count < 0. {
                return Err(ExchangeErr::NegativeCount {
                    class: from,
                    history: Some(history.clone()),
                    count: from_count,
                });
            }

            let to_count = to_count + count;

            objective += xlogx(from_count);
            objective += xlogx(to_count);
        }

        let from_mass = counts.class_count(from);
        if from_mass <= 0. {
            return Err(ExchangeErr::NonPositiveCount {
                class: from,
                history: None,
                count: from_mass,
            });
        }

        let to_mass = counts.class_count(to);
        if to_mass < 0. {
            return Err(ExchangeErr::NegativeCount {
                class: to,
                history: None,
                count: to_mass,
            });
        }

        // The marginal term is subtracted from the objective, so signs flip.
        objective += xlogx(from_mass);
        objective += xlogx(to_mass);

        let from_mass = from_mass - WORD_MASS;
        if from_mass < 0. {
            return Err(ExchangeErr::NegativeCount {
                class: from,
                history: None,
                count: from_mass,
            });
        }

        let to_mass = to_mass + WORD_MASS;

        objective -= xlogx(from_mass);
        objective -= xlogx(to_mass);

        Ok(objective)
    }
}
