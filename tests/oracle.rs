//! Oracle comparisons between the grid paths and the brute-force clusterer.
//!
//! The L1 grid and the Euclidean clusterers agree exactly wherever their
//! metrics coincide: at eps = 1 on integer coordinates (the unit balls are
//! identical) and on colinear data (the metrics are equal on a line). The
//! Euclidean grid path must match the brute-force clusterer on every input.

mod support;

use grid_dbscan::euclid::{self, EuclidParams};
use grid_dbscan::{cluster, naive, ExpansionMode, Params};
use support::points::{colinear_run, random_points, to_float};

const MODES: [ExpansionMode; 3] = [
    ExpansionMode::Sequential,
    ExpansionMode::FrontierParallel,
    ExpansionMode::UnionFind,
];

#[test]
fn grid_l1_matches_naive_at_unit_eps() {
    for seed in [1u64, 2, 3, 4] {
        for min_samples in [1u32, 2, 3, 5] {
            let points = random_points(600, 30, seed);
            let expected = naive::cluster(&to_float(&points), 1.0, min_samples as usize);
            for mode in MODES {
                let result = cluster(&points, &Params::new(1, min_samples), mode).unwrap();
                assert_eq!(
                    result.labels, expected,
                    "divergence at seed {seed}, min_samples {min_samples}, mode {mode:?}"
                );
            }
        }
    }
}

#[test]
fn grid_l1_matches_naive_on_colinear_data() {
    let mut points = colinear_run(0, 5, 40, 3);
    points.extend(colinear_run(500, 5, 10, 1));
    points.extend(colinear_run(1000, 5, 3, 20));

    for (eps, min_samples) in [(3u32, 2u32), (4, 3), (6, 4), (1, 2)] {
        let expected = naive::cluster(&to_float(&points), eps as f64, min_samples as usize);
        for mode in MODES {
            let result = cluster(&points, &Params::new(eps, min_samples), mode).unwrap();
            assert_eq!(
                result.labels, expected,
                "divergence at eps {eps}, min_samples {min_samples}, mode {mode:?}"
            );
        }
    }
}

#[test]
fn grid_l1_matches_naive_on_coincident_points() {
    let mut points = vec![grid_dbscan::GridPoint::new(42, 42); 25];
    points.extend(random_points(50, 5, 9));

    let expected = naive::cluster(&to_float(&points), 1.0, 10);
    for mode in MODES {
        let result = cluster(&points, &Params::new(1, 10), mode).unwrap();
        assert_eq!(result.labels, expected);
    }
}

#[test]
fn euclid_grid_matches_naive_everywhere() {
    for (seed, eps, min_samples) in [
        (10u64, 7.5f64, 4u32),
        (11, 2.0, 3),
        (12, 12.25, 8),
        (13, 0.75, 2),
    ] {
        let points = to_float(&random_points(500, 100, seed));
        let expected = naive::cluster(&points, eps, min_samples as usize);
        let params = EuclidParams::new(eps, min_samples);
        let labels = euclid::cluster(&points, &params).unwrap();
        assert_eq!(
            labels, expected,
            "divergence at seed {seed}, eps {eps}, min_samples {min_samples}"
        );
    }
}

#[test]
fn euclid_grid_matches_naive_with_threads() {
    let points = to_float(&random_points(800, 120, 21));
    let expected = naive::cluster(&points, 5.0, 5);
    for num_threads in [1, 2, 8] {
        for chunk_size in [0, 1, 100] {
            let params = EuclidParams {
                eps: 5.0,
                min_samples: 5,
                num_threads,
                chunk_size,
            };
            let labels = euclid::cluster(&points, &params).unwrap();
            assert_eq!(labels, expected);
        }
    }
}
