//! Synthetic dataset generation: uniform background plus Gaussian clusters.

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::GridPoint;

/// Parameters for the synthetic generator.
///
/// The defaults match the reference dataset: 200k background points and 100
/// Gaussian clusters of 256 points over a 1M × 1M pixel area.
#[derive(Debug, Clone)]
pub struct SyntheticConfig {
    pub uniform_count: usize,
    pub cluster_count: usize,
    pub points_per_cluster: usize,
    /// Width and height of the square pixel area.
    pub area_width: u32,
    /// Standard deviation of the Gaussian clusters, in pixels.
    pub cluster_sigma: f64,
    pub seed: u64,
}

impl Default for SyntheticConfig {
    fn default() -> Self {
        Self {
            uniform_count: 200_000,
            cluster_count: 100,
            points_per_cluster: 256,
            area_width: 1_000_000,
            cluster_sigma: 50.0 / 3.0,
            seed: 42,
        }
    }
}

/// Generate background and cluster points, rounded to the nearest pixel,
/// clamped to the area, and shuffled into a seed-deterministic order.
pub fn synthetic_points(config: &SyntheticConfig) -> Vec<GridPoint> {
    assert!(config.area_width > 0, "pixel area must be non-empty");
    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
    let width = config.area_width as f64;
    let mut points =
        Vec::with_capacity(config.uniform_count + config.cluster_count * config.points_per_cluster);

    for _ in 0..config.uniform_count {
        let x = rng.gen_range(0.0..width);
        let y = rng.gen_range(0.0..width);
        points.push(clamp_to_area(x, y, config.area_width));
    }

    for _ in 0..config.cluster_count {
        let center_x = rng.gen_range(0.0..width);
        let center_y = rng.gen_range(0.0..width);
        for _ in 0..config.points_per_cluster {
            let (gx, gy) = gaussian_pair(&mut rng);
            points.push(clamp_to_area(
                center_x + gx * config.cluster_sigma,
                center_y + gy * config.cluster_sigma,
                config.area_width,
            ));
        }
    }

    // Fisher–Yates shuffle so cluster members do not form contiguous runs;
    // consumers label the shuffled order.
    for i in (1..points.len()).rev() {
        let j = rng.gen_range(0..=i);
        points.swap(i, j);
    }

    points
}

fn clamp_to_area(x: f64, y: f64, width: u32) -> GridPoint {
    let max = (width - 1) as f64;
    GridPoint::new(
        x.round().clamp(0.0, max) as u32,
        y.round().clamp(0.0, max) as u32,
    )
}

/// One pair of independent standard normal samples (Box–Muller).
fn gaussian_pair<R: Rng>(rng: &mut R) -> (f64, f64) {
    let u1: f64 = rng.gen_range(f64::MIN_POSITIVE..1.0);
    let angle: f64 = rng.gen_range(0.0..std::f64::consts::TAU);
    let radius = (-2.0 * u1.ln()).sqrt();
    (radius * angle.cos(), radius * angle.sin())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deterministic_for_a_seed() {
        let config = SyntheticConfig {
            uniform_count: 100,
            cluster_count: 3,
            points_per_cluster: 16,
            area_width: 10_000,
            cluster_sigma: 8.0,
            seed: 7,
        };
        assert_eq!(synthetic_points(&config), synthetic_points(&config));
        let other = SyntheticConfig { seed: 8, ..config };
        assert_ne!(synthetic_points(&config), synthetic_points(&other));
    }

    #[test]
    fn points_stay_in_area() {
        let config = SyntheticConfig {
            uniform_count: 200,
            cluster_count: 5,
            points_per_cluster: 32,
            area_width: 64,
            cluster_sigma: 100.0,
            seed: 3,
        };
        let points = synthetic_points(&config);
        assert_eq!(points.len(), 200 + 5 * 32);
        assert!(points.iter().all(|p| p.x < 64 && p.y < 64));
    }
}
