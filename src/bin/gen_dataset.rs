//! Generate a synthetic dataset fixture pair (data + truth).
//!
//! Draws a uniform background plus Gaussian clusters, labels the result
//! with the Euclidean grid clusterer, and writes the two binary fixture
//! files consumed by the validator.

use std::error::Error;
use std::path::PathBuf;

use clap::Parser;

use grid_dbscan::dataset::{synthetic_points, SyntheticConfig};
use grid_dbscan::euclid::{self, EuclidParams};
use grid_dbscan::{fixture, metrics};

#[derive(Parser, Debug)]
#[command(about = "Generate synthetic DBSCAN test data with embedded Gaussian clusters")]
struct Args {
    /// Number of uniform background points.
    #[arg(long, default_value_t = 200_000)]
    uniform_count: usize,

    /// Number of Gaussian clusters sprinkled into the dataset.
    #[arg(long, default_value_t = 100)]
    cluster_count: usize,

    /// Points sampled per Gaussian cluster.
    #[arg(long, default_value_t = 256)]
    points_per_cluster: usize,

    /// Width/height of the square pixel area.
    #[arg(long, default_value_t = 1_000_000)]
    area_width: u32,

    /// Standard deviation of the Gaussian clusters, in pixels.
    #[arg(long, default_value_t = 50.0 / 3.0)]
    cluster_sigma: f64,

    /// DBSCAN radius used to produce the truth labels.
    #[arg(long, default_value_t = 60.0)]
    eps: f64,

    /// DBSCAN core threshold used to produce the truth labels.
    #[arg(long, default_value_t = 16)]
    min_samples: u32,

    /// Random seed.
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Output path for the coordinate file.
    #[arg(long, default_value = "data.bin")]
    data_file: PathBuf,

    /// Output path for the truth label file.
    #[arg(long, default_value = "truth.bin")]
    truth_file: PathBuf,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let config = SyntheticConfig {
        uniform_count: args.uniform_count,
        cluster_count: args.cluster_count,
        points_per_cluster: args.points_per_cluster,
        area_width: args.area_width,
        cluster_sigma: args.cluster_sigma,
        seed: args.seed,
    };
    let points = synthetic_points(&config);

    let float_points: Vec<(f64, f64)> = points
        .iter()
        .map(|p| (p.x as f64, p.y as f64))
        .collect();
    let labels = euclid::cluster(&float_points, &EuclidParams::new(args.eps, args.min_samples))?;

    fixture::write_points(&args.data_file, &points)?;
    fixture::write_labels(&args.truth_file, &labels)?;

    println!(
        "wrote {} points to {} and labels to {}",
        points.len(),
        args.data_file.display(),
        args.truth_file.display()
    );
    println!(
        "truth labeling: {} clusters, {} noise points (eps={}, min_samples={})",
        metrics::count_clusters(&labels),
        metrics::count_noise(&labels),
        args.eps,
        args.min_samples
    );

    Ok(())
}
