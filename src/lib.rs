//! Deterministic DBSCAN over a uniform 2D grid with L1 (Manhattan) distance.
//!
//! Points carry unsigned integer coordinates, so cell assignment is exact
//! division and every distance test is exact integer arithmetic. Combined
//! with a `(cell, index)`-keyed sort, a min-index union tie-break, and
//! minimum-index label canonicalization, the same input yields byte-for-byte
//! identical labels across expansion strategies, thread counts, and chunk
//! sizes.
//!
//! # Example
//!
//! ```
//! use grid_dbscan::{cluster, ExpansionMode, GridPoint, Params};
//!
//! let points = vec![
//!     GridPoint::new(0, 0),
//!     GridPoint::new(1, 1),
//!     GridPoint::new(2, 2),
//!     GridPoint::new(20, 20),
//! ];
//! let result = cluster(&points, &Params::new(2, 2), ExpansionMode::Sequential).unwrap();
//! assert_eq!(result.labels, vec![0, 0, 0, -1]);
//! ```

mod error;
mod expand;
mod grid;
mod types;

pub mod dataset;
pub mod euclid;
pub mod fixture;
pub mod metrics;
pub mod naive;
pub mod parallel;
pub mod perf;
pub mod union_find;

pub use error::DbscanError;
pub use perf::PerfEntry;
pub use types::GridPoint;

use expand::ExpandCtx;
use grid::CellGrid;
use perf::PerfTrace;
use types::StridedCoords;

/// Clustering parameters.
#[derive(Debug, Clone)]
pub struct Params {
    /// L1 neighborhood radius; doubles as the grid cell size. Must be ≥ 1.
    pub eps: u32,
    /// Inclusive neighbor count required for a core point. Must be ≥ 1.
    pub min_samples: u32,
    /// Worker threads for parallel phases (0 = hardware concurrency).
    pub num_threads: usize,
    /// Chunk size for scheduled passes (0 = per-phase default).
    pub chunk_size: usize,
}

impl Params {
    pub fn new(eps: u32, min_samples: u32) -> Self {
        Self {
            eps,
            min_samples,
            num_threads: 0,
            chunk_size: 0,
        }
    }
}

/// Strategy used to grow clusters out of core points.
///
/// All strategies produce identical labels; they only differ in how the
/// core-point graph is traversed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpansionMode {
    /// Single-threaded stack walk over seeds in input order.
    Sequential,
    /// Breadth-first waves claimed by CAS across worker threads.
    FrontierParallel,
    /// Lock-free union-find over core-to-core edges.
    UnionFind,
}

/// Result of one clustering call.
#[derive(Debug, Clone)]
pub struct Clustering {
    /// Per-point cluster id in input order; −1 marks noise.
    pub labels: Vec<i32>,
    /// Wall-clock phase durations, in completion order.
    pub perf_timing: Vec<PerfEntry>,
}

impl Clustering {
    /// Number of clusters. Labels form a dense prefix `0..num_clusters()`.
    pub fn num_clusters(&self) -> usize {
        self.labels
            .iter()
            .copied()
            .max()
            .map_or(0, |max| (max + 1).max(0) as usize)
    }
}

/// Cluster points supplied as `(x, y)` pairs.
pub fn cluster(
    points: &[GridPoint],
    params: &Params,
    mode: ExpansionMode,
) -> Result<Clustering, DbscanError> {
    let flat: &[u32] = bytemuck::cast_slice(points);
    let (x, y) = if flat.is_empty() {
        (flat, flat)
    } else {
        (flat, &flat[1..])
    };
    cluster_strided(x, 2, y, 2, points.len(), params, mode)
}

/// Cluster points supplied as two strided coordinate buffers.
///
/// Strides are measured in `u32` elements; each buffer must cover `count`
/// points at its stride. Parameters are validated before anything is
/// allocated. An empty input yields an empty label vector and a tracer
/// holding only the `total` entry.
pub fn cluster_strided(
    x: &[u32],
    x_stride: usize,
    y: &[u32],
    y_stride: usize,
    count: usize,
    params: &Params,
    mode: ExpansionMode,
) -> Result<Clustering, DbscanError> {
    validate(x, x_stride, y, y_stride, count, params)?;

    let trace = PerfTrace::new();
    let labels = {
        let _total = trace.scope("total");
        if count == 0 {
            Vec::new()
        } else {
            run_clustering(
                StridedCoords::new(x, x_stride, y, y_stride),
                count,
                params,
                mode,
                &trace,
            )
        }
    };

    Ok(Clustering {
        labels,
        perf_timing: trace.into_entries(),
    })
}

fn validate(
    x: &[u32],
    x_stride: usize,
    y: &[u32],
    y_stride: usize,
    count: usize,
    params: &Params,
) -> Result<(), DbscanError> {
    if params.eps == 0 {
        return Err(DbscanError::ZeroEps);
    }
    if params.min_samples == 0 {
        return Err(DbscanError::ZeroMinSamples);
    }
    if count == 0 {
        return Ok(());
    }
    for (axis, buffer, stride) in [("x", x, x_stride), ("y", y, y_stride)] {
        if stride == 0 {
            return Err(DbscanError::ZeroStride { axis });
        }
        let required = (count - 1) * stride + 1;
        if buffer.len() < required {
            return Err(DbscanError::BufferTooShort {
                axis,
                required,
                len: buffer.len(),
            });
        }
    }
    Ok(())
}

fn run_clustering(
    coords: StridedCoords<'_>,
    count: usize,
    params: &Params,
    mode: ExpansionMode,
    trace: &PerfTrace,
) -> Vec<i32> {
    let grid = CellGrid::build(
        coords,
        count,
        params.eps,
        params.num_threads,
        params.chunk_size,
        trace,
    );

    let is_core = {
        let _timer = trace.scope("core_detection");
        grid.core_mask(params.min_samples, params.num_threads, params.chunk_size)
    };

    let ctx = ExpandCtx {
        grid: &grid,
        is_core: &is_core,
        num_threads: params.num_threads,
        chunk_size: params.chunk_size,
    };

    let mut labels = vec![-1i32; count];
    let raw_clusters = {
        let _timer = trace.scope("cluster_expansion");
        expand::expand(&ctx, mode, &mut labels)
    };
    {
        let _timer = trace.scope("finalize_labels");
        expand::finalize(&ctx, raw_clusters, &mut labels);
    }
    labels
}
