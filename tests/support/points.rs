#![allow(dead_code)]

use grid_dbscan::GridPoint;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Uniform random points over a square extent (duplicates allowed).
pub fn random_points(n: usize, extent: u32, seed: u64) -> Vec<GridPoint> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..n)
        .map(|_| GridPoint::new(rng.gen_range(0..extent), rng.gen_range(0..extent)))
        .collect()
}

/// Full integer lattice `(i, j)` for `i in 0..width`, `j in 0..height`.
pub fn lattice_points(width: u32, height: u32) -> Vec<GridPoint> {
    (0..width)
        .flat_map(|i| (0..height).map(move |j| GridPoint::new(i, j)))
        .collect()
}

/// `count` colinear points along x starting at `start_x`, spaced `spacing`.
pub fn colinear_run(start_x: u32, y: u32, count: usize, spacing: u32) -> Vec<GridPoint> {
    (0..count as u32)
        .map(|k| GridPoint::new(start_x + k * spacing, y))
        .collect()
}

/// Dense 4-wide blocks of `per_cluster` points around well-separated bases.
///
/// Blocks are `gap` apart along x, so no cross-block pair is ever within a
/// small eps and every block forms exactly one cluster.
pub fn separated_blocks(clusters: usize, per_cluster: usize, gap: u32) -> Vec<GridPoint> {
    let mut points = Vec::with_capacity(clusters * per_cluster);
    for c in 0..clusters as u32 {
        let base = c * gap;
        for k in 0..per_cluster as u32 {
            points.push(GridPoint::new(base + k % 4, k / 4));
        }
    }
    points
}

/// Two dense packs of 20 points joined by a single-file chain at
/// x = 5, 10, …, 45.
pub fn bridge_points() -> Vec<GridPoint> {
    let mut points = Vec::new();
    for i in 0..20u32 {
        points.push(GridPoint::new(i % 4, i / 4));
    }
    for i in 0..20u32 {
        points.push(GridPoint::new(50 + i % 4, i / 4));
    }
    for x in (5..=45).step_by(5) {
        points.push(GridPoint::new(x, 0));
    }
    points
}

/// Convert integer points to float pairs for the Euclidean clusterers.
pub fn to_float(points: &[GridPoint]) -> Vec<(f64, f64)> {
    points.iter().map(|p| (p.x as f64, p.y as f64)).collect()
}
