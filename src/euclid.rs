//! Grid-accelerated Euclidean DBSCAN with a float radius.
//!
//! Same design as the L1 core: cells of size `eps`, a `(cell, index)`-sorted
//! permutation with a CSR directory over occupied cells, a 3×3 neighborhood
//! walk, and the shared canonical labeling rules. Only the metric differs:
//! squared Euclidean distance against `eps²` in f64. Cell indices are kept
//! as `(i64, i64)` pairs because a sub-unit radius can push per-axis cell
//! numbers beyond the packed 32-bit range of the integer core.

use crate::parallel::{self, SharedSlice};
use crate::DbscanError;

/// Parameters for the Euclidean grid path.
#[derive(Debug, Clone)]
pub struct EuclidParams {
    /// Euclidean neighborhood radius; also the grid cell size. Must be > 0.
    pub eps: f64,
    /// Inclusive neighbor count required for a core point. Must be ≥ 1.
    pub min_samples: u32,
    /// Worker threads for parallel phases (0 = hardware concurrency).
    pub num_threads: usize,
    /// Chunk size for scheduled passes (0 = per-phase default).
    pub chunk_size: usize,
}

impl EuclidParams {
    pub fn new(eps: f64, min_samples: u32) -> Self {
        Self {
            eps,
            min_samples,
            num_threads: 0,
            chunk_size: 0,
        }
    }
}

/// Cluster float points; labels use the same conventions as the L1 core.
pub fn cluster(points: &[(f64, f64)], params: &EuclidParams) -> Result<Vec<i32>, DbscanError> {
    if !(params.eps > 0.0) {
        return Err(DbscanError::ZeroEps);
    }
    if params.min_samples == 0 {
        return Err(DbscanError::ZeroMinSamples);
    }

    let count = points.len();
    if count == 0 {
        return Ok(Vec::new());
    }
    let eps = params.eps;
    let eps_sq = eps * eps;

    let cells: Vec<(i64, i64)> = points
        .iter()
        .map(|&(x, y)| ((x / eps).floor() as i64, (y / eps).floor() as i64))
        .collect();

    let mut ordered: Vec<u32> = (0..count as u32).collect();
    ordered.sort_unstable_by_key(|&i| (cells[i as usize], i));

    let mut unique_cells: Vec<(i64, i64)> = Vec::new();
    let mut offsets: Vec<u32> = Vec::new();
    let mut pos = 0usize;
    while pos < count {
        let cell = cells[ordered[pos] as usize];
        unique_cells.push(cell);
        offsets.push(pos as u32);
        pos += 1;
        while pos < count && cells[ordered[pos] as usize] == cell {
            pos += 1;
        }
    }
    offsets.push(count as u32);

    let for_each_neighbor = |query: u32, visit: &mut dyn FnMut(u32) -> bool| {
        let (cx, cy) = cells[query as usize];
        let (qx, qy) = points[query as usize];
        for dx in -1i64..=1 {
            for dy in -1i64..=1 {
                let key = (cx + dx, cy + dy);
                let Ok(cell) = unique_cells.binary_search(&key) else {
                    continue;
                };
                let begin = offsets[cell] as usize;
                let end = offsets[cell + 1] as usize;
                for &n in &ordered[begin..end] {
                    let (px, py) = points[n as usize];
                    let ddx = px - qx;
                    let ddy = py - qy;
                    if ddx * ddx + ddy * ddy <= eps_sq && !visit(n) {
                        return;
                    }
                }
            }
        }
    };

    let mut is_core = vec![false; count];
    let core_chunk = if params.chunk_size == 0 {
        512
    } else {
        params.chunk_size
    };
    {
        let out = SharedSlice::new(&mut is_core);
        parallel::run(0, count, params.num_threads, core_chunk, |begin, end| {
            for i in begin..end {
                let mut found = 0u32;
                for_each_neighbor(i as u32, &mut |_| {
                    found += 1;
                    found < params.min_samples
                });
                if found >= params.min_samples {
                    // SAFETY: scheduler chunks are disjoint; only this chunk
                    // writes slot `i`.
                    unsafe { out.write(i, true) };
                }
            }
        });
    }

    // Sequential stack expansion over core points; seed order makes the
    // ids canonical (first core of a component is its minimum member).
    let mut labels = vec![-1i32; count];
    let mut stack: Vec<u32> = Vec::new();
    let mut neighbors: Vec<u32> = Vec::with_capacity(64);
    let mut next_label = 0i32;
    for seed in 0..count {
        if !is_core[seed] || labels[seed] != -1 {
            continue;
        }
        labels[seed] = next_label;
        stack.push(seed as u32);
        while let Some(current) = stack.pop() {
            neighbors.clear();
            for_each_neighbor(current, &mut |n| {
                neighbors.push(n);
                true
            });
            for &n in &neighbors {
                if is_core[n as usize] && labels[n as usize] == -1 {
                    labels[n as usize] = next_label;
                    stack.push(n);
                }
            }
        }
        next_label += 1;
    }

    for i in 0..count {
        if is_core[i] {
            continue;
        }
        let mut best = -1i32;
        for_each_neighbor(i as u32, &mut |n| {
            if is_core[n as usize] {
                let candidate = labels[n as usize];
                if best < 0 || candidate < best {
                    best = candidate;
                }
            }
            true
        });
        labels[i] = best;
    }

    Ok(labels)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_expected_small_case() {
        let points = vec![
            (0.0, 0.0),
            (0.1, 0.1),
            (0.2, 0.2),
            (5.0, 5.0),
            (5.1, 5.1),
            (5.2, 5.2),
            (10.0, 10.0),
        ];
        let labels = cluster(&points, &EuclidParams::new(0.5, 2)).unwrap();
        assert_eq!(labels, vec![0, 0, 0, 1, 1, 1, -1]);
    }

    #[test]
    fn rejects_bad_parameters() {
        assert_eq!(
            cluster(&[(0.0, 0.0)], &EuclidParams::new(0.0, 2)),
            Err(DbscanError::ZeroEps)
        );
        assert_eq!(
            cluster(&[(0.0, 0.0)], &EuclidParams::new(1.0, 0)),
            Err(DbscanError::ZeroMinSamples)
        );
    }

    #[test]
    fn sub_unit_radius_works() {
        let points = vec![(0.0, 0.0), (0.2, 0.0), (0.4, 0.0), (3.0, 3.0)];
        let labels = cluster(&points, &EuclidParams::new(0.25, 2)).unwrap();
        assert_eq!(labels, vec![0, 0, 0, -1]);
    }
}
