#![allow(dead_code)]

use rand::{Rng, SeedableRng, rngs::StdRng};

use word_classes::{ClassStatistics, NgramHistory, PartialUpdate, StatisticsBuilder, Word};

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn words(words: &[&str]) -> Vec<Word> {
    words.iter().map(|&word| Word::from(word)).collect()
}

pub fn history(word: &str) -> NgramHistory {
    NgramHistory::from([word])
}

pub fn assert_close(got: f64, expected: f64) {
    let tolerance = 1e-9 * got.abs().max(expected.abs()).max(1.);
    assert!(
        (got - expected).abs() <= tolerance,
        "objective mismatch: got {got}, expected {expected}"
    );
}

/// Builds statistics over `words` words and `histories` bigram contexts with random counts
/// and a random initial assignment.
///
/// # Returns
/// The statistics and the vocabulary in creation order.
pub fn random_statistics(
    seed: u64,
    words: usize,
    histories: usize,
    classes: usize,
) -> (ClassStatistics, Vec<Word>) {
    let mut rng = StdRng::seed_from_u64(seed);

    let histories: Vec<NgramHistory> = (0..histories)
        .map(|i| {
            let context = format!("h{i}");
            NgramHistory::from([context.as_str()])
        })
        .collect();

    let vocabulary: Vec<Word> = (0..words).map(|i| Word::from(format!("w{i}"))).collect();

    let mut builder = StatisticsBuilder::new(classes);
    for word in &vocabulary {
        builder.assign(word.clone(), rng.random_range(0..classes));

        for history in &histories {
            if rng.random_bool(0.4) {
                let count = rng.random_range(1..=5) as f64;
                builder.observe(word.clone(), history.clone(), count);
            }
        }
    }

    (builder.build().unwrap(), vocabulary)
}

/// Applies the assignments of `updates` and aggregates the statistics again from the word
/// level counts, without looking at the deltas.
pub fn rebuild(statistics: &ClassStatistics, updates: &[PartialUpdate]) -> ClassStatistics {
    let mut builder = StatisticsBuilder::new(statistics.num_classes());

    for word in statistics.words() {
        let class = updates
            .iter()
            .find_map(|update| update.class_of(word))
            .or_else(|| statistics.class_of(word))
            .unwrap();

        builder.assign(word.clone(), class);

        for (history, count) in statistics.histories(word) {
            builder.observe(word.clone(), history.clone(), count);
        }
    }

    builder.build().unwrap()
}
