//! Expansion via the shared lock-free disjoint-set.

use super::ExpandCtx;
use crate::parallel;
use crate::union_find::{ConcurrentUnionFind, ABSENT};

pub(super) fn expand(ctx: &ExpandCtx<'_>, labels: &mut [i32]) -> u32 {
    let count = labels.len();
    let forest = ConcurrentUnionFind::with_members(count, |i| ctx.is_core[i]);

    let union_chunk = if ctx.chunk_size == 0 { 512 } else { ctx.chunk_size };
    parallel::run(0, count, ctx.num_threads, union_chunk, |begin, end| {
        for i in begin..end {
            if !ctx.is_core[i] {
                continue;
            }
            ctx.grid.for_each_neighbor(i as u32, |n| {
                if ctx.is_core[n as usize] {
                    forest.unite(i as u32, n);
                }
                true
            });
        }
    });

    let mut root_for_point = vec![ABSENT; count];
    for (i, root) in root_for_point.iter_mut().enumerate() {
        if ctx.is_core[i] {
            *root = forest.find(i as u32);
        }
    }

    // Minimum member index per component root.
    let mut component_min = vec![ABSENT; count];
    for i in 0..count {
        if !ctx.is_core[i] {
            continue;
        }
        let root = root_for_point[i] as usize;
        if component_min[root] > i as u32 {
            component_min[root] = i as u32;
        }
    }

    let mut components: Vec<(u32, u32)> = (0..count)
        .filter(|&root| component_min[root] != ABSENT)
        .map(|root| (component_min[root], root as u32))
        .collect();
    components.sort_unstable();

    let mut root_label = vec![-1i32; count];
    for (next, &(_, root)) in components.iter().enumerate() {
        root_label[root as usize] = next as i32;
    }

    for (i, label) in labels.iter_mut().enumerate() {
        if ctx.is_core[i] {
            *label = root_label[root_for_point[i] as usize];
        }
    }
    components.len() as u32
}
