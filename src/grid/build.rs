//! Three-phase construction of the cell directory.

use super::{pack_cell, CellGrid};
use crate::parallel::{self, SharedSlice};
use crate::perf::PerfTrace;
use crate::types::StridedCoords;

impl<'a> CellGrid<'a> {
    /// Build the directory for `count` points.
    ///
    /// Phase 1 encodes cells in parallel (disjoint writes), phase 2 sorts
    /// the index permutation by `(key, index)`, phase 3 scans the sorted
    /// permutation once to emit the CSR offsets. Each phase records its
    /// duration in `trace`.
    pub fn build(
        coords: StridedCoords<'a>,
        count: usize,
        eps: u32,
        num_threads: usize,
        chunk_size: usize,
        trace: &PerfTrace,
    ) -> Self {
        debug_assert!(eps > 0, "eps is validated at the entry point");

        let mut cell_x = vec![0u32; count];
        let mut cell_y = vec![0u32; count];
        let mut keys = vec![0u64; count];

        let index_chunk = if chunk_size == 0 { 1024 } else { chunk_size };
        {
            let _timer = trace.scope("precompute_cells");
            let cx_out = SharedSlice::new(&mut cell_x);
            let cy_out = SharedSlice::new(&mut cell_y);
            let key_out = SharedSlice::new(&mut keys);

            parallel::run(0, count, num_threads, index_chunk, |begin, end| {
                for i in begin..end {
                    let cx = coords.x(i as u32) / eps;
                    let cy = coords.y(i as u32) / eps;
                    // SAFETY: scheduler chunks are disjoint; slot `i` is
                    // written only by the chunk that covers it.
                    unsafe {
                        cx_out.write(i, cx);
                        cy_out.write(i, cy);
                        key_out.write(i, pack_cell(cx, cy));
                    }
                }
            });
        }

        let mut ordered: Vec<u32> = (0..count as u32).collect();
        {
            let _timer = trace.scope("sort_indices");
            // The index tie-break makes the order (and with it every
            // downstream scan) independent of the sort algorithm.
            ordered.sort_unstable_by_key(|&i| (keys[i as usize], i));
        }

        let mut unique_keys: Vec<u64> = Vec::new();
        let mut offsets: Vec<u32> = Vec::new();
        {
            let _timer = trace.scope("build_cell_offsets");
            let mut pos = 0usize;
            while pos < count {
                let key = keys[ordered[pos] as usize];
                unique_keys.push(key);
                offsets.push(pos as u32);
                pos += 1;
                while pos < count && keys[ordered[pos] as usize] == key {
                    pos += 1;
                }
            }
            offsets.push(count as u32);
        }

        CellGrid {
            coords,
            eps,
            count,
            cell_x,
            cell_y,
            ordered,
            unique_keys,
            offsets,
        }
    }
}
