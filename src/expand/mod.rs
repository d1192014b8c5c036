//! Cluster expansion strategies and final label canonicalization.
//!
//! Expansion assigns provisional ids; only core points matter at that stage.
//! The shared finalization pass then re-ranks ids by each component's
//! minimum input index and resolves every non-core point to the smallest
//! adjacent core label (or noise). All three strategies therefore produce
//! identical label vectors.

mod frontier;
mod sequential;
mod union_find;

use crate::grid::CellGrid;
use crate::ExpansionMode;

/// Shared read-only state for one expansion run.
pub(crate) struct ExpandCtx<'a> {
    pub grid: &'a CellGrid<'a>,
    pub is_core: &'a [bool],
    pub num_threads: usize,
    pub chunk_size: usize,
}

/// Assign provisional cluster ids to `labels`; returns the number of raw
/// ids handed out.
pub(crate) fn expand(ctx: &ExpandCtx<'_>, mode: ExpansionMode, labels: &mut [i32]) -> u32 {
    match mode {
        ExpansionMode::Sequential => sequential::expand(ctx, labels),
        ExpansionMode::FrontierParallel => frontier::expand(ctx, labels),
        ExpansionMode::UnionFind => union_find::expand(ctx, labels),
    }
}

/// Rewrite provisional labels into their final canonical form.
///
/// Single-threaded by design; runs after any expansion mode.
pub(crate) fn finalize(ctx: &ExpandCtx<'_>, raw_clusters: u32, labels: &mut [i32]) {
    canonicalize(ctx, raw_clusters, labels);
    assign_borders(ctx, labels);
}

/// Map each raw id to the rank of its component's minimum input index.
///
/// Scanning core points in input order means the first appearance of a raw
/// id *is* its component's minimum member, so ranks fall out of one pass.
fn canonicalize(ctx: &ExpandCtx<'_>, raw_clusters: u32, labels: &mut [i32]) {
    let mut rank = vec![-1i32; raw_clusters as usize];
    let mut next = 0i32;
    for (i, label) in labels.iter_mut().enumerate() {
        if !ctx.is_core[i] {
            continue;
        }
        let raw = *label as usize;
        if rank[raw] < 0 {
            rank[raw] = next;
            next += 1;
        }
        *label = rank[raw];
    }
}

/// Give every non-core point the smallest canonical label among its core
/// neighbors, or −1 when it has none.
///
/// "Smallest" rather than "first reached" keeps the choice identical across
/// expansion modes when several clusters touch the same border point.
fn assign_borders(ctx: &ExpandCtx<'_>, labels: &mut [i32]) {
    for i in 0..labels.len() {
        if ctx.is_core[i] {
            continue;
        }
        let mut best = -1i32;
        {
            let shared: &[i32] = labels;
            ctx.grid.for_each_neighbor(i as u32, |n| {
                if ctx.is_core[n as usize] {
                    let candidate = shared[n as usize];
                    if best < 0 || candidate < best {
                        best = candidate;
                    }
                }
                true
            });
        }
        labels[i] = best;
    }
}
