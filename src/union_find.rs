//! Lock-free disjoint-set over dense `u32` ids.

use std::sync::atomic::{AtomicU32, Ordering};

/// Id marking a slot that is not a member of any set.
pub const ABSENT: u32 = u32::MAX;

/// Concurrent union-find with path compression and min-index tie-breaking.
///
/// `unite` always links the larger root under the smaller, so the final
/// forest is independent of thread interleaving and the root of every set
/// is its minimum member. Slots initialized as non-members take no part in
/// any operation.
///
/// Both operations are lock-free; `find` is wait-free when no `unite` runs
/// concurrently. Out-of-range ids are a programmer bug and panic.
pub struct ConcurrentUnionFind {
    parent: Vec<AtomicU32>,
}

impl ConcurrentUnionFind {
    /// Create a structure where every id in `0..len` is its own root.
    pub fn new(len: usize) -> Self {
        Self::with_members(len, |_| true)
    }

    /// Create a structure where only ids accepted by `is_member` participate.
    pub fn with_members(len: usize, is_member: impl Fn(usize) -> bool) -> Self {
        assert!(
            len < ABSENT as usize,
            "id space must leave room for the ABSENT sentinel"
        );
        let parent = (0..len)
            .map(|i| AtomicU32::new(if is_member(i) { i as u32 } else { ABSENT }))
            .collect();
        Self { parent }
    }

    pub fn len(&self) -> usize {
        self.parent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    #[inline]
    fn load(&self, id: u32) -> u32 {
        self.parent[id as usize].load(Ordering::Acquire)
    }

    /// Root of `id`, or [`ABSENT`] if `id` is not a member.
    pub fn find(&self, id: u32) -> u32 {
        let mut node = id;
        let mut parent = self.load(node);
        if parent == ABSENT {
            return ABSENT;
        }
        while parent != node {
            node = parent;
            parent = self.load(node);
        }
        let root = node;

        // Republish the discovered root along the path. Each CAS only
        // replaces the link that was actually observed, so a newer link
        // written by a concurrent unite is never clobbered. Links always
        // point to strictly smaller ids, which bounds both walks.
        node = id;
        while node != root {
            let observed = self.load(node);
            if observed == root {
                break;
            }
            let _ = self.parent[node as usize].compare_exchange(
                observed,
                root,
                Ordering::AcqRel,
                Ordering::Acquire,
            );
            node = observed;
        }
        root
    }

    /// Merge the sets containing `a` and `b`.
    ///
    /// Idempotent; a no-op when either id is a non-member or both already
    /// share a root. On contention the whole operation retries from fresh
    /// root lookups.
    pub fn unite(&self, a: u32, b: u32) {
        loop {
            let ra = self.find(a);
            let rb = self.find(b);
            if ra == ABSENT || rb == ABSENT || ra == rb {
                return;
            }
            let (lo, hi) = if ra < rb { (ra, rb) } else { (rb, ra) };
            if self.parent[hi as usize]
                .compare_exchange(hi, lo, Ordering::AcqRel, Ordering::Acquire)
                .is_ok()
            {
                return;
            }
        }
    }
}
