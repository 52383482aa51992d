use std::collections::{BTreeMap, HashMap};

use super::ClassStatistics;
use crate::{
    error::{ExchangeErr, Result},
    history::{ClassId, NgramHistory, Word},
    objective,
};

/// Aggregates word level history counts and a class assignment into `ClassStatistics`.
///
/// Every assigned word contributes one unit of mass to its class, the same unit a
/// committed move transfers between classes.
#[derive(Debug, Default)]
pub struct StatisticsBuilder {
    num_classes: usize,
    word_to_class: HashMap<Word, ClassId>,
    history_count: HashMap<Word, BTreeMap<NgramHistory, f64>>,
}

impl StatisticsBuilder {
    /// Creates a new `StatisticsBuilder`.
    ///
    /// # Arguments
    /// * `num_classes` - The amount of classes words are distributed into.
    ///
    /// # Returns
    /// A new `StatisticsBuilder` instance.
    pub fn new(num_classes: usize) -> Self {
        Self {
            num_classes,
            ..Default::default()
        }
    }

    /// Assigns `word` to `class`, replacing any previous assignment.
    pub fn assign(&mut self, word: impl Into<Word>, class: ClassId) -> &mut Self {
        self.word_to_class.insert(word.into(), class);
        self
    }

    /// Adds `count` observations of `word` under `history`.
    ///
    /// # Arguments
    /// * `word` - The observed word.
    /// * `history` - The context it was observed in.
    /// * `count` - How many times, accumulated with previous observations.
    pub fn observe(&mut self, word: impl Into<Word>, history: NgramHistory, count: f64) -> &mut Self {
        *self
            .history_count
            .entry(word.into())
            .or_default()
            .entry(history)
            .or_insert(0.) += count;

        self
    }

    /// Aggregates the class level counts and evaluates the initial objective.
    ///
    /// # Returns
    /// The built `ClassStatistics`, or an error if there are less than two classes, a class
    /// is out of range, an observed word has no class or a count is negative.
    pub fn build(self) -> Result<ClassStatistics> {
        let Self {
            num_classes,
            word_to_class,
            history_count,
        } = self;

        if num_classes < 2 {
            return Err(ExchangeErr::TooFewClasses { got: num_classes });
        }

        let mut class_count = vec![0.; num_classes];
        let mut class_history_count = vec![HashMap::new(); num_classes];

        for &class in word_to_class.values() {
            if class >= num_classes {
                return Err(ExchangeErr::ClassOutOfRange { class, num_classes });
            }

            class_count[class] += 1.;
        }

        for (word, histories) in &history_count {
            let Some(&class) = word_to_class.get(word) else {
                return Err(ExchangeErr::UnknownWord { word: word.clone() });
            };

            for (history, &count) in histories {
                if count < 0. {
                    return Err(ExchangeErr::NegativeCount {
                        class,
                        history: Some(history.clone()),
                        count,
                    });
                }

                *class_history_count[class]
                    .entry(history.clone())
                    .or_insert(0.) += count;
            }
        }

        let objective = objective::one_sided_objective(&class_count, &class_history_count);

        ClassStatistics::new(
            class_count,
            class_history_count,
            history_count,
            word_to_class,
            objective,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aggregates_class_counts() {
        let x = NgramHistory::from(["x"]);
        let y = NgramHistory::from(["y"]);

        let mut builder = StatisticsBuilder::new(2);
        builder
            .assign("a", 0)
            .assign("b", 0)
            .assign("c", 1)
            .observe("a", x.clone(), 2.)
            .observe("a", x.clone(), 1.)
            .observe("b", x.clone(), 1.)
            .observe("c", y.clone(), 4.);

        let stats = builder.build().unwrap();

        assert_eq!(stats.vocabulary_len(), 3);
        assert_eq!(stats.class_count(0), 2.);
        assert_eq!(stats.class_count(1), 1.);
        assert_eq!(stats.class_history_count(0, &x), 4.);
        assert_eq!(stats.class_history_count(1, &y), 4.);
        assert_eq!(stats.class_history_count(1, &x), 0.);

        let expected = 2. * 4. * 4f64.ln() - 2. * 2f64.ln();
        assert!((stats.objective() - expected).abs() < 1e-12);
    }

    #[test]
    fn test_observed_word_needs_a_class() {
        let mut builder = StatisticsBuilder::new(2);
        builder.assign("a", 0).observe("b", NgramHistory::from(["x"]), 1.);

        let err = builder.build().unwrap_err();
        assert!(matches!(err, ExchangeErr::UnknownWord { word } if &*word == "b"));
    }

    #[test]
    fn test_rejects_negative_observations() {
        let mut builder = StatisticsBuilder::new(2);
        builder.assign("a", 1).observe("a", NgramHistory::from(["x"]), -1.);

        let err = builder.build().unwrap_err();
        assert!(matches!(err, ExchangeErr::NegativeCount { class: 1, .. }));
    }

    #[test]
    fn test_rejects_out_of_range_class() {
        let mut builder = StatisticsBuilder::new(3);
        builder.assign("a", 3);

        let err = builder.build().unwrap_err();
        assert!(matches!(
            err,
            ExchangeErr::ClassOutOfRange {
                class: 3,
                num_classes: 3
            }
        ));
    }
}
