mod common;

use common::{assert_close, init_logger, random_statistics, rebuild};
use word_classes::ExchangeOptimizer;

const SEEDS: [u64; 5] = [7, 42, 1337, 2024, 90210];

#[test]
fn test_sweep_never_decreases_objective() {
    init_logger();

    for seed in SEEDS {
        let (stats, vocabulary) = random_statistics(seed, 40, 6, 4);

        let update = ExchangeOptimizer::new(stats.snapshot(&vocabulary))
            .unwrap()
            .cluster()
            .unwrap();

        assert!(update.objective() >= stats.objective(), "seed {seed}");
        if update.moves() > 0 {
            assert!(update.objective() > stats.objective(), "seed {seed}");
        }
    }
}

#[test]
fn test_incremental_objective_matches_recomputation() {
    for seed in SEEDS {
        let (stats, vocabulary) = random_statistics(seed, 40, 6, 4);

        let update = ExchangeOptimizer::new(stats.snapshot(&vocabulary))
            .unwrap()
            .cluster()
            .unwrap();

        let merged = rebuild(&stats, std::slice::from_ref(&update));
        assert_close(update.objective(), merged.objective());
    }
}

#[test]
fn test_deltas_match_recomputed_counts() {
    for seed in SEEDS {
        let (stats, vocabulary) = random_statistics(seed, 30, 5, 3);

        let update = ExchangeOptimizer::new(stats.snapshot(&vocabulary))
            .unwrap()
            .cluster()
            .unwrap();

        let merged = rebuild(&stats, std::slice::from_ref(&update));

        for class in 0..stats.num_classes() {
            assert_eq!(
                stats.class_count(class) + update.delta_class_count()[class],
                merged.class_count(class),
                "seed {seed} class {class}"
            );

            for (history, delta) in &update.delta_class_history_count()[class] {
                assert_eq!(
                    stats.class_history_count(class, history) + delta,
                    merged.class_history_count(class, history),
                    "seed {seed} class {class} history [{history}]"
                );
            }
        }
    }
}

#[test]
fn test_deltas_conserve_mass() {
    for seed in SEEDS {
        let (stats, vocabulary) = random_statistics(seed, 30, 5, 3);

        let update = ExchangeOptimizer::new(stats.snapshot(&vocabulary))
            .unwrap()
            .cluster()
            .unwrap();

        assert_eq!(update.delta_class_count().iter().sum::<f64>(), 0.);

        let tables = update.delta_class_history_count();
        for history in tables.iter().flat_map(|table| table.keys()) {
            let total: f64 = tables
                .iter()
                .map(|table| table.get(history).copied().unwrap_or(0.))
                .sum();

            assert_eq!(total, 0., "seed {seed} history [{history}]");
        }
    }
}

#[test]
fn test_sweeps_are_deterministic() {
    let (stats, vocabulary) = random_statistics(42, 40, 6, 4);

    let first = ExchangeOptimizer::new(stats.snapshot(&vocabulary))
        .unwrap()
        .cluster()
        .unwrap();
    let second = ExchangeOptimizer::new(stats.snapshot(&vocabulary))
        .unwrap()
        .cluster()
        .unwrap();

    assert_eq!(first.objective(), second.objective());
    assert_eq!(first.word_to_class(), second.word_to_class());
    assert_eq!(first.delta_class_count(), second.delta_class_count());
}

#[test]
fn test_evaluation_does_not_mutate() {
    let (stats, vocabulary) = random_statistics(7, 20, 4, 3);
    let optimizer = ExchangeOptimizer::new(stats.snapshot(&vocabulary)).unwrap();

    for word in &vocabulary {
        let current = optimizer.class_of(word).unwrap();
        let to = (current + 1) % stats.num_classes();

        let first = optimizer.evaluate_move(word, current, to).unwrap();
        let second = optimizer.evaluate_move(word, current, to).unwrap();
        assert_eq!(first, second);
    }

    assert_eq!(optimizer.objective(), stats.objective());
    assert!(
        (0..stats.num_classes()).all(|class| optimizer.delta().class_count(class) == 0.)
    );
}

#[test]
fn test_sweeping_merged_statistics_keeps_improving() {
    let (stats, vocabulary) = random_statistics(1337, 40, 6, 4);
    let mut objective = stats.objective();
    let mut stats = stats;

    for _ in 0..3 {
        let update = ExchangeOptimizer::new(stats.snapshot(&vocabulary))
            .unwrap()
            .cluster()
            .unwrap();

        assert!(update.objective() >= objective);
        objective = update.objective();
        stats = rebuild(&stats, &[update]);
        assert_close(stats.objective(), objective);
    }
}
