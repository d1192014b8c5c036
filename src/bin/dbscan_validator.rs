//! End-to-end dataset validator.
//!
//! Loads a binary fixture pair, runs the selected clusterers, and compares
//! each labeling against the reference labels. Exit code 0 iff every
//! selected implementation matches the reference exactly.

use std::error::Error;
use std::fmt::Write as _;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::{Parser, ValueEnum};

use grid_dbscan::euclid::{self, EuclidParams};
use grid_dbscan::{cluster, fixture, metrics, naive, ExpansionMode, Params};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ImplChoice {
    Baseline,
    Optimized,
    Grid,
    Both,
    All,
}

#[derive(Parser, Debug)]
#[command(about = "Validate DBSCAN implementations against a reference labeling")]
struct Args {
    /// Binary file of (y, x) u32 coordinate pairs.
    #[arg(long, default_value = "data.bin")]
    data: PathBuf,

    /// Binary file of i32 reference labels.
    #[arg(long, default_value = "truth.bin")]
    truth: PathBuf,

    /// Neighborhood radius. Must be integral for the grid implementation.
    #[arg(long, default_value_t = 60.0)]
    eps: f64,

    /// Core-point threshold (a point counts itself).
    #[arg(long, default_value_t = 16)]
    min_samples: u32,

    /// Which implementations to run.
    #[arg(long = "impl", value_enum, default_value = "both")]
    implementations: ImplChoice,

    /// Directory for per-implementation mismatch dumps (one index per line).
    #[arg(long)]
    dump_mismatches: Option<PathBuf>,
}

fn main() -> ExitCode {
    let args = Args::parse();
    match run(&args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<bool, Box<dyn Error>> {
    if !(args.eps > 0.0) {
        return Err("--eps must be positive".into());
    }
    if args.min_samples == 0 {
        return Err("--min-samples must be positive".into());
    }

    let points = fixture::read_points(&args.data)?;
    let truth = fixture::read_labels(&args.truth)?;
    if points.len() != truth.len() {
        return Err("point count and truth label count differ".into());
    }

    println!("loaded {} points from {}", points.len(), args.data.display());
    println!("eps={}, min_samples={}", args.eps, args.min_samples);
    println!(
        "ground truth: {} clusters, {} noise points",
        metrics::count_clusters(&truth),
        metrics::count_noise(&truth)
    );

    let (run_baseline, run_optimized, run_grid) = match args.implementations {
        ImplChoice::Baseline => (true, false, false),
        ImplChoice::Optimized => (false, true, false),
        ImplChoice::Grid => (false, false, true),
        ImplChoice::Both => (true, true, false),
        ImplChoice::All => (true, true, true),
    };

    let float_points: Vec<(f64, f64)> = points
        .iter()
        .map(|p| (p.x as f64, p.y as f64))
        .collect();

    let mut all_passed = true;

    if run_baseline {
        let start = Instant::now();
        let labels = naive::cluster(&float_points, args.eps, args.min_samples as usize);
        let elapsed = start.elapsed();
        all_passed &= report("baseline", &labels, &truth, elapsed.as_millis(), args)?;
    }

    if run_optimized {
        let params = EuclidParams::new(args.eps, args.min_samples);
        let start = Instant::now();
        let labels = euclid::cluster(&float_points, &params)?;
        let elapsed = start.elapsed();
        all_passed &= report("optimized", &labels, &truth, elapsed.as_millis(), args)?;
    }

    if run_grid {
        let eps_int = args.eps.round();
        if (args.eps - eps_int).abs() > 1e-6 {
            return Err("the grid implementation requires an integer eps".into());
        }
        let params = Params::new(eps_int as u32, args.min_samples);
        let start = Instant::now();
        let result = cluster(&points, &params, ExpansionMode::Sequential)?;
        let elapsed = start.elapsed();
        all_passed &= report("grid", &result.labels, &truth, elapsed.as_millis(), args)?;
    }

    Ok(all_passed)
}

fn report(
    name: &str,
    labels: &[i32],
    truth: &[i32],
    elapsed_ms: u128,
    args: &Args,
) -> Result<bool, Box<dyn Error>> {
    let eval = metrics::evaluate(labels, truth);

    println!("\n[{name}] clustering finished in {elapsed_ms} ms");
    println!(
        "  clusters: {} (truth {})",
        eval.predicted_clusters, eval.truth_clusters
    );
    println!(
        "  noise points: {} (truth {})",
        eval.predicted_noise, eval.truth_noise
    );
    println!("  adjusted rand index: {:.6}", eval.adjusted_rand);
    println!("  remapped accuracy: {:.4}%", eval.remapped_accuracy * 100.0);
    println!("  mismatched points: {}", eval.mismatches.len());
    println!(
        "  status: {}",
        if eval.passed() { "PASS" } else { "FAIL" }
    );

    if let Some(dir) = &args.dump_mismatches {
        if !eval.mismatches.is_empty() {
            fs::create_dir_all(dir)?;
            let path = dir.join(format!("{name}_mismatches.txt"));
            let mut out = String::new();
            for index in &eval.mismatches {
                writeln!(out, "{index}")?;
            }
            fs::write(&path, out)?;
            println!(
                "  wrote {} mismatch indices to {}",
                eval.mismatches.len(),
                path.display()
            );
        }
    }

    Ok(eval.passed())
}
