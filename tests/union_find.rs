//! Concurrent stress tests for the lock-free disjoint-set.
//!
//! The min-index tie-break makes final roots fully deterministic, so these
//! tests can assert exact root values, not just set equality.

use std::thread;

use grid_dbscan::union_find::ConcurrentUnionFind;

fn odd_part(mut n: u32) -> u32 {
    while n % 2 == 0 {
        n /= 2;
    }
    n
}

#[test]
fn concurrent_doubling_chains() {
    const N: u32 = 4096;
    const THREADS: u32 = 8;
    let uf = ConcurrentUnionFind::new(N as usize);

    thread::scope(|scope| {
        for t in 0..THREADS {
            let uf = &uf;
            scope.spawn(move || {
                let mut i = 1 + t;
                while i < N / 2 {
                    uf.unite(i, 2 * i);
                    i += THREADS;
                }
            });
        }
    });

    // Components are {odd · 2^k}; the root is the minimum member, i.e. the
    // odd part.
    for i in 1..N / 2 {
        assert_eq!(uf.find(i), uf.find(2 * i));
    }
    for i in 1..N {
        assert_eq!(uf.find(i), odd_part(i), "wrong root for {i}");
    }
}

#[test]
fn concurrent_unite_all_with_zero() {
    const N: u32 = 2000;
    const THREADS: u32 = 16;
    let uf = ConcurrentUnionFind::new(N as usize);

    thread::scope(|scope| {
        for t in 0..THREADS {
            let uf = &uf;
            scope.spawn(move || {
                let mut i = 1 + t;
                while i < N {
                    uf.unite(0, i);
                    i += THREADS;
                }
            });
        }
    });

    for i in 0..N {
        assert_eq!(uf.find(i), 0);
    }
}

#[test]
fn concurrent_even_odd_partition() {
    const N: u32 = 2000;
    let threads = thread::available_parallelism().map_or(4, |n| n.get() as u32);
    let uf = ConcurrentUnionFind::new(N as usize);

    thread::scope(|scope| {
        for t in 0..threads {
            let uf = &uf;
            scope.spawn(move || {
                let mut i = t;
                while i < N {
                    if i > 1 {
                        uf.unite(i % 2, i);
                    }
                    i += threads;
                }
            });
        }
    });

    assert_eq!(uf.find(0), 0);
    assert_eq!(uf.find(1), 1);
    for i in 0..N {
        assert_eq!(uf.find(i), i % 2);
    }
}

#[test]
fn concurrent_disjoint_pairs_stay_disjoint() {
    const N: u32 = 1000;
    const THREADS: u32 = 16;
    let uf = ConcurrentUnionFind::new(N as usize);

    thread::scope(|scope| {
        for t in 0..THREADS {
            let uf = &uf;
            scope.spawn(move || {
                let mut i = t;
                while i < N / 2 {
                    uf.unite(2 * i, 2 * i + 1);
                    i += THREADS;
                }
            });
        }
    });

    for i in 0..N / 2 {
        assert_eq!(uf.find(2 * i), 2 * i, "pair root must be the even member");
        assert_eq!(uf.find(2 * i + 1), 2 * i);
        if i > 0 {
            assert_ne!(uf.find(2 * i), uf.find(2 * (i - 1)));
        }
    }
}
