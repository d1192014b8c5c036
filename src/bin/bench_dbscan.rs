//! Benchmark grid clustering across expansion modes.
//!
//! Run with: cargo run --release --bin bench_dbscan
//!
//! Usage:
//!   bench_dbscan                 Run default size (100k)
//!   bench_dbscan 100k 1m         Run multiple sizes
//!   bench_dbscan --mode frontier Benchmark one mode
//!   bench_dbscan -n 10           Average over 10 iterations

use clap::{Parser, ValueEnum};

use grid_dbscan::dataset::{synthetic_points, SyntheticConfig};
use grid_dbscan::{cluster, Clustering, ExpansionMode, GridPoint, Params};
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ModeChoice {
    All,
    Sequential,
    Frontier,
    UnionFind,
}

impl ModeChoice {
    fn modes(self) -> Vec<(&'static str, ExpansionMode)> {
        match self {
            ModeChoice::All => vec![
                ("sequential", ExpansionMode::Sequential),
                ("frontier", ExpansionMode::FrontierParallel),
                ("union-find", ExpansionMode::UnionFind),
            ],
            ModeChoice::Sequential => vec![("sequential", ExpansionMode::Sequential)],
            ModeChoice::Frontier => vec![("frontier", ExpansionMode::FrontierParallel)],
            ModeChoice::UnionFind => vec![("union-find", ExpansionMode::UnionFind)],
        }
    }
}

#[derive(Parser, Debug)]
#[command(about = "Benchmark the grid DBSCAN expansion modes")]
struct Args {
    /// Point counts, with optional k/m suffix (e.g. 100k, 1m).
    #[arg(value_parser = parse_count)]
    sizes: Vec<usize>,

    /// Expansion mode(s) to run.
    #[arg(long, value_enum, default_value = "all")]
    mode: ModeChoice,

    /// Neighborhood radius.
    #[arg(long, default_value_t = 60)]
    eps: u32,

    /// Core-point threshold.
    #[arg(long, default_value_t = 16)]
    min_samples: u32,

    /// Worker threads (0 = hardware concurrency).
    #[arg(long, default_value_t = 0)]
    threads: usize,

    /// Chunk size (0 = per-phase default).
    #[arg(long, default_value_t = 0)]
    chunk_size: usize,

    /// Iterations per configuration.
    #[arg(short = 'n', long, default_value_t = 3)]
    iterations: usize,

    /// Print per-phase timings from the last iteration.
    #[arg(long)]
    phases: bool,
}

fn parse_count(s: &str) -> Result<usize, String> {
    let lower = s.to_lowercase();
    let (digits, multiplier) = if let Some(stripped) = lower.strip_suffix('m') {
        (stripped, 1_000_000)
    } else if let Some(stripped) = lower.strip_suffix('k') {
        (stripped, 1_000)
    } else {
        (lower.as_str(), 1)
    };
    digits
        .parse::<f64>()
        .map(|n| (n * multiplier as f64) as usize)
        .map_err(|e| format!("invalid count '{s}': {e}"))
}

fn benchmark_points(size: usize) -> Vec<GridPoint> {
    // Half background, half clustered, density matching the reference
    // dataset shape.
    let cluster_count = (size / 512).max(1);
    let points_per_cluster = 256;
    let clustered = cluster_count * points_per_cluster;
    let config = SyntheticConfig {
        uniform_count: size.saturating_sub(clustered),
        cluster_count,
        points_per_cluster,
        seed: 42,
        ..SyntheticConfig::default()
    };
    synthetic_points(&config)
}

fn report_phases(result: &Clustering) {
    let total = result
        .perf_timing
        .iter()
        .find(|e| e.label == "total")
        .map_or(0.0, |e| e.duration_ms);
    for entry in &result.perf_timing {
        let pct = if total > 0.0 {
            entry.duration_ms / total * 100.0
        } else {
            0.0
        };
        println!(
            "    {:<20} {:>9.2} ms ({:>4.1}%)",
            entry.label, entry.duration_ms, pct
        );
    }
}

fn main() {
    let args = Args::parse();
    let sizes = if args.sizes.is_empty() {
        vec![100_000]
    } else {
        args.sizes.clone()
    };

    for &size in &sizes {
        println!("\n=== {size} points ===");
        let points = benchmark_points(size);
        let params = Params {
            eps: args.eps,
            min_samples: args.min_samples,
            num_threads: args.threads,
            chunk_size: args.chunk_size,
        };

        for (name, mode) in args.mode.modes() {
            let mut last = None;
            let mut total_ms = 0.0;
            for _ in 0..args.iterations.max(1) {
                let start = Instant::now();
                let result = cluster(&points, &params, mode).expect("benchmark parameters are valid");
                total_ms += start.elapsed().as_secs_f64() * 1e3;
                last = Some(result);
            }
            let result = last.expect("at least one iteration ran");
            let mean_ms = total_ms / args.iterations.max(1) as f64;
            println!(
                "  {:<12} {:>9.2} ms mean over {} runs, {} clusters",
                name,
                mean_ms,
                args.iterations.max(1),
                result.num_clusters()
            );
            if args.phases {
                report_phases(&result);
            }
        }
    }
}
