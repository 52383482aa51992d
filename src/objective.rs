use std::collections::HashMap;

use crate::history::NgramHistory;

/// Computes `x * ln(x)` with the `0 * ln(0) = 0` convention.
///
/// Callers must never pass a negative count, the exchange kernel rejects those before
/// reaching this point.
#[inline]
pub fn xlogx(x: f64) -> f64 {
    if x > 0. { x * x.ln() } else { 0. }
}

/// Evaluates the one-sided class model criterion from scratch.
///
/// `sum_{c,h} N(c,h) ln N(c,h) - sum_c N(c) ln N(c)`, omitting the terms that don't
/// depend on the class assignment.
///
/// # Arguments
/// * `class_count` - The class marginal masses, indexed by class.
/// * `class_history_count` - The per class history counts, indexed by class.
///
/// # Returns
/// The objective value.
pub fn one_sided_objective(
    class_count: &[f64],
    class_history_count: &[HashMap<NgramHistory, f64>],
) -> f64 {
    let joint: f64 = class_history_count
        .iter()
        .flat_map(|histories| histories.values())
        .map(|&count| xlogx(count))
        .sum();

    let marginal: f64 = class_count.iter().map(|&count| xlogx(count)).sum();

    joint - marginal
}
