//! Coverage properties for the work scheduler.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use grid_dbscan::parallel;

#[test]
fn processes_full_range_exactly_once() {
    const N: usize = 10_000;
    let visited: Vec<AtomicBool> = (0..N).map(|_| AtomicBool::new(false)).collect();

    parallel::run(0, N, 4, 128, |begin, end| {
        for i in begin..end {
            assert!(
                !visited[i].swap(true, Ordering::Relaxed),
                "index {i} processed twice"
            );
        }
    });

    assert!(visited.iter().all(|flag| flag.load(Ordering::Relaxed)));
}

#[test]
fn handles_uneven_chunks() {
    const N: usize = 1023;
    let counts: Vec<AtomicUsize> = (0..N).map(|_| AtomicUsize::new(0)).collect();

    parallel::run(0, N, 3, 100, |begin, end| {
        for i in begin..end {
            counts[i].fetch_add(1, Ordering::Relaxed);
        }
    });

    assert!(counts.iter().all(|c| c.load(Ordering::Relaxed) == 1));
}

#[test]
fn static_split_with_default_chunk_size() {
    const N: usize = 5_000;
    let out: Vec<AtomicUsize> = (0..N).map(|_| AtomicUsize::new(0)).collect();

    parallel::run(0, N, 8, 0, |begin, end| {
        for i in begin..end {
            out[i].store(i, Ordering::Relaxed);
        }
    });

    for (i, slot) in out.iter().enumerate() {
        assert_eq!(slot.load(Ordering::Relaxed), i);
    }
}

#[test]
fn empty_range_is_a_noop() {
    let called = AtomicBool::new(false);
    parallel::run(10, 10, 4, 16, |_, _| {
        called.store(true, Ordering::Relaxed);
    });
    parallel::run(10, 5, 4, 16, |_, _| {
        called.store(true, Ordering::Relaxed);
    });
    assert!(!called.load(Ordering::Relaxed));
}

#[test]
fn zero_threads_uses_hardware_concurrency() {
    const N: usize = 512;
    let sum = AtomicUsize::new(0);
    parallel::run(0, N, 0, 10, |begin, end| {
        sum.fetch_add((begin..end).sum::<usize>(), Ordering::Relaxed);
    });
    assert_eq!(sum.load(Ordering::Relaxed), N * (N - 1) / 2);
}

#[test]
fn nonzero_begin_offsets_are_respected() {
    let visited: Vec<AtomicBool> = (0..100).map(|_| AtomicBool::new(false)).collect();
    parallel::run(40, 60, 4, 3, |begin, end| {
        assert!(begin >= 40 && end <= 60);
        for i in begin..end {
            visited[i].store(true, Ordering::Relaxed);
        }
    });
    for (i, flag) in visited.iter().enumerate() {
        assert_eq!(flag.load(Ordering::Relaxed), (40..60).contains(&i));
    }
}
