//! Clustering agreement metrics used by the validator.

use rustc_hash::{FxHashMap, FxHashSet};

/// Agreement between a predicted labeling and a reference labeling.
#[derive(Debug, Clone)]
pub struct Evaluation {
    /// Adjusted Rand index; 1.0 means identical partitions.
    pub adjusted_rand: f64,
    /// Fraction of points matching after a majority remap of predicted
    /// clusters onto reference labels (noise maps to noise).
    pub remapped_accuracy: f64,
    /// Indices where the remapped prediction disagrees with the reference,
    /// in ascending order.
    pub mismatches: Vec<usize>,
    pub predicted_clusters: usize,
    pub truth_clusters: usize,
    pub predicted_noise: usize,
    pub truth_noise: usize,
}

impl Evaluation {
    /// Exact agreement: no mismatched points and identical cluster counts.
    pub fn passed(&self) -> bool {
        self.mismatches.is_empty() && self.predicted_clusters == self.truth_clusters
    }
}

/// Count distinct non-noise labels. The noise marker never counts as a
/// cluster, whatever its multiplicity.
pub fn count_clusters(labels: &[i32]) -> usize {
    labels
        .iter()
        .filter(|&&label| label >= 0)
        .collect::<FxHashSet<_>>()
        .len()
}

/// Count points labeled as noise.
pub fn count_noise(labels: &[i32]) -> usize {
    labels.iter().filter(|&&label| label == -1).count()
}

/// Dense first-appearance index over a label vector.
struct LabelIndex {
    to_index: FxHashMap<i32, usize>,
    values: Vec<i32>,
}

fn make_index(labels: &[i32]) -> LabelIndex {
    let mut to_index = FxHashMap::default();
    let mut values = Vec::new();
    for &label in labels {
        to_index.entry(label).or_insert_with(|| {
            values.push(label);
            values.len() - 1
        });
    }
    LabelIndex { to_index, values }
}

fn combination2(n: i64) -> f64 {
    if n <= 1 {
        return 0.0;
    }
    n as f64 * (n - 1) as f64 / 2.0
}

/// Compare `predicted` against `truth`.
///
/// Panics if the vectors have different lengths; the callers check the
/// fixture sizes first.
pub fn evaluate(predicted: &[i32], truth: &[i32]) -> Evaluation {
    assert_eq!(
        predicted.len(),
        truth.len(),
        "predicted and truth labels must have the same length"
    );
    let total_points = truth.len();

    let predicted_index = make_index(predicted);
    let truth_index = make_index(truth);
    let predicted_size = predicted_index.values.len();
    let truth_size = truth_index.values.len();

    let mut contingency = vec![0i64; predicted_size * truth_size];
    let mut predicted_counts = vec![0i64; predicted_size];
    let mut truth_counts = vec![0i64; truth_size];

    for i in 0..total_points {
        let row = predicted_index.to_index[&predicted[i]];
        let col = truth_index.to_index[&truth[i]];
        contingency[row * truth_size + col] += 1;
        predicted_counts[row] += 1;
        truth_counts[col] += 1;
    }

    let sum_combination: f64 = contingency.iter().map(|&c| combination2(c)).sum();
    let predicted_combination: f64 = predicted_counts.iter().map(|&c| combination2(c)).sum();
    let truth_combination: f64 = truth_counts.iter().map(|&c| combination2(c)).sum();

    let total_pairs = combination2(total_points as i64);
    let expected_index = if total_pairs > 0.0 {
        predicted_combination * truth_combination / total_pairs
    } else {
        0.0
    };
    let max_index = 0.5 * (predicted_combination + truth_combination);
    let denominator = max_index - expected_index;
    let adjusted_rand = if denominator == 0.0 {
        1.0
    } else {
        (sum_combination - expected_index) / denominator
    };

    // Majority remap: each predicted cluster maps to the truth label it
    // overlaps most; predicted noise stays noise.
    let mut remap: FxHashMap<i32, i32> = FxHashMap::default();
    for (row, &predicted_label) in predicted_index.values.iter().enumerate() {
        if predicted_label == -1 {
            remap.insert(predicted_label, -1);
            continue;
        }
        let row_slice = &contingency[row * truth_size..(row + 1) * truth_size];
        let best_col = row_slice
            .iter()
            .enumerate()
            .max_by_key(|&(col, &count)| (count, std::cmp::Reverse(col)))
            .map(|(col, _)| col)
            .unwrap_or(0);
        remap.insert(predicted_label, truth_index.values[best_col]);
    }

    let mut mismatches = Vec::new();
    for i in 0..total_points {
        let mapped = remap.get(&predicted[i]).copied().unwrap_or(predicted[i]);
        if mapped != truth[i] {
            mismatches.push(i);
        }
    }

    let remapped_accuracy = if total_points == 0 {
        1.0
    } else {
        (total_points - mismatches.len()) as f64 / total_points as f64
    };

    Evaluation {
        adjusted_rand,
        remapped_accuracy,
        mismatches,
        predicted_clusters: count_clusters(predicted),
        truth_clusters: count_clusters(truth),
        predicted_noise: count_noise(predicted),
        truth_noise: count_noise(truth),
    }
}
