//! Frontier BFS expansion with atomically claimed labels.

use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::Mutex;

use super::ExpandCtx;
use crate::parallel;

pub(super) fn expand(ctx: &ExpandCtx<'_>, labels: &mut [i32]) -> u32 {
    let count = labels.len();
    let shared: Vec<AtomicI32> = labels.iter().map(|&l| AtomicI32::new(l)).collect();

    let frontier_chunk = if ctx.chunk_size == 0 { 64 } else { ctx.chunk_size };
    let mut frontier: Vec<u32> = Vec::with_capacity(256);
    let mut next_label = 0i32;

    for seed in 0..count {
        if !ctx.is_core[seed] || shared[seed].load(Ordering::Acquire) != -1 {
            continue;
        }

        let label = next_label;
        next_label += 1;
        shared[seed].store(label, Ordering::Release);
        frontier.clear();
        frontier.push(seed as u32);

        while !frontier.is_empty() {
            let next_frontier: Mutex<Vec<u32>> = Mutex::new(Vec::new());
            let wave = &frontier;

            parallel::run(0, wave.len(), ctx.num_threads, frontier_chunk, |begin, end| {
                let mut local_next: Vec<u32> = Vec::with_capacity(32);
                let mut neighbors: Vec<u32> = Vec::with_capacity(64);

                for &current in &wave[begin..end] {
                    neighbors.clear();
                    ctx.grid.for_each_neighbor(current, |n| {
                        neighbors.push(n);
                        true
                    });

                    for &n in &neighbors {
                        if ctx.is_core[n as usize] {
                            if shared[n as usize]
                                .compare_exchange(-1, label, Ordering::AcqRel, Ordering::Acquire)
                                .is_ok()
                            {
                                local_next.push(n);
                            }
                        } else {
                            // Claimed but never expanded; the border pass
                            // re-resolves non-core points afterwards.
                            let _ = shared[n as usize].compare_exchange(
                                -1,
                                label,
                                Ordering::AcqRel,
                                Ordering::Acquire,
                            );
                        }
                    }
                }

                if !local_next.is_empty() {
                    local_next.sort_unstable();
                    local_next.dedup();
                    next_frontier.lock().unwrap().extend_from_slice(&local_next);
                }
            });

            let mut next = next_frontier.into_inner().unwrap();
            if next.is_empty() {
                break;
            }
            // Two workers can reach the same point through different
            // parents; the CAS decides the owner, and the canonical order
            // here keeps wave contents independent of scheduling.
            next.sort_unstable();
            next.dedup();
            frontier = next;
        }
    }

    for (slot, claimed) in labels.iter_mut().zip(&shared) {
        *slot = claimed.load(Ordering::Relaxed);
    }
    next_label as u32
}
