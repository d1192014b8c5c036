//! Stack-based expansion scanning seeds in input order.

use super::ExpandCtx;

pub(super) fn expand(ctx: &ExpandCtx<'_>, labels: &mut [i32]) -> u32 {
    let count = labels.len();
    let mut stack: Vec<u32> = Vec::new();
    let mut neighbors: Vec<u32> = Vec::with_capacity(64);

    let mut next_label = 0i32;
    for seed in 0..count {
        if !ctx.is_core[seed] || labels[seed] != -1 {
            continue;
        }

        labels[seed] = next_label;
        stack.clear();
        stack.push(seed as u32);

        while let Some(current) = stack.pop() {
            // Materialize the neighborhood before touching labels so the
            // writes cannot interact with the enumeration.
            neighbors.clear();
            ctx.grid.for_each_neighbor(current, |n| {
                neighbors.push(n);
                true
            });

            for &n in &neighbors {
                if labels[n as usize] == -1 {
                    labels[n as usize] = next_label;
                    if ctx.is_core[n as usize] {
                        stack.push(n);
                    }
                }
            }
        }

        next_label += 1;
    }
    next_label as u32
}
