//! Uniform cell grid over integer 2D points.
//!
//! Cell size equals `eps`, so every L1 neighbor of a point lies in the 3×3
//! block of cells around the point's own cell. Occupied cells are kept as a
//! sorted key array plus a CSR offset table over a `(key, index)`-sorted
//! permutation of the input, which turns every neighborhood scan into a few
//! contiguous slices reached through an `O(log K)` binary search.

mod build;

use crate::parallel::{self, SharedSlice};
use crate::types::StridedCoords;

/// Pack 2D cell coordinates into a single sortable key.
#[inline]
pub(crate) const fn pack_cell(cx: u32, cy: u32) -> u64 {
    ((cx as u64) << 32) | cy as u64
}

/// Spatial directory for one clustering call.
///
/// Borrows the caller's coordinate buffers; all owned arrays live exactly
/// as long as the call that built them.
pub(crate) struct CellGrid<'a> {
    coords: StridedCoords<'a>,
    eps: u32,
    count: usize,
    /// Per-point cell coordinates.
    cell_x: Vec<u32>,
    cell_y: Vec<u32>,
    /// Permutation of `0..count`, ascending by `(key, index)`.
    ordered: Vec<u32>,
    /// Sorted keys of occupied cells.
    unique_keys: Vec<u64>,
    /// `ordered[offsets[c] .. offsets[c + 1]]` holds cell `unique_keys[c]`.
    offsets: Vec<u32>,
}

impl CellGrid<'_> {
    /// Visit every point within L1 distance `eps` of `query`, including
    /// `query` itself. Cells are walked in row-major `(dx, dy)` order and
    /// points within a cell in sorted-permutation order, so the visit
    /// sequence is fully deterministic. The visitor returns `false` to stop
    /// enumeration early.
    #[inline]
    pub fn for_each_neighbor(&self, query: u32, mut visit: impl FnMut(u32) -> bool) {
        let base_cx = self.cell_x[query as usize];
        let base_cy = self.cell_y[query as usize];
        let qx = self.coords.x(query);
        let qy = self.coords.y(query);
        let eps = self.eps as u64;

        for dx in -1i64..=1 {
            let nx = base_cx as i64 + dx;
            if nx < 0 || nx > u32::MAX as i64 {
                continue;
            }
            for dy in -1i64..=1 {
                let ny = base_cy as i64 + dy;
                if ny < 0 || ny > u32::MAX as i64 {
                    continue;
                }

                let key = pack_cell(nx as u32, ny as u32);
                let Ok(cell) = self.unique_keys.binary_search(&key) else {
                    continue;
                };

                let begin = self.offsets[cell] as usize;
                let end = self.offsets[cell + 1] as usize;
                for &neighbor in &self.ordered[begin..end] {
                    let manhattan = self.coords.x(neighbor).abs_diff(qx) as u64
                        + self.coords.y(neighbor).abs_diff(qy) as u64;
                    if manhattan <= eps && !visit(neighbor) {
                        return;
                    }
                }
            }
        }
    }

    /// Mark every point whose inclusive neighborhood reaches `min_samples`.
    ///
    /// Scheduled pass; the grid stays read-only and each worker writes only
    /// the mask slots of its own chunk.
    pub fn core_mask(&self, min_samples: u32, num_threads: usize, chunk_size: usize) -> Vec<bool> {
        let mut is_core = vec![false; self.count];
        let core_chunk = if chunk_size == 0 { 512 } else { chunk_size };
        let out = SharedSlice::new(&mut is_core);

        parallel::run(0, self.count, num_threads, core_chunk, |begin, end| {
            for i in begin..end {
                let mut found = 0u32;
                self.for_each_neighbor(i as u32, |_| {
                    found += 1;
                    found < min_samples
                });
                if found >= min_samples {
                    // SAFETY: scheduler chunks are disjoint and `i` lies in
                    // this worker's chunk.
                    unsafe { out.write(i, true) };
                }
            }
        });
        is_core
    }
}
