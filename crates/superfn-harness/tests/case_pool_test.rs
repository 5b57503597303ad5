//! Integration test: shared benchmark workloads.
//!
//! Run: cargo test -p superfn-harness --test case_pool_test

use std::sync::atomic::{AtomicU64, Ordering};
use std::thread;

use superfn_core::{NamedFn, Reference, SuperFn};
use superfn_harness::{
    BenchStats, CasePool, HarnessConfig, PairBuffer, TestCase, generate_cases, run_benchmark,
    run_fixed_order_benchmark,
};

/// Records the operands it is driven with, folded into one checksum.
struct Recorder {
    checksum: AtomicU64,
    calls: AtomicU64,
}

impl Recorder {
    fn new() -> Self {
        Self {
            checksum: AtomicU64::new(0),
            calls: AtomicU64::new(0),
        }
    }
}

impl SuperFn for Recorder {
    fn name(&self) -> &str {
        "recorder"
    }

    fn eval(&self, x1: f64, x2: f64, n: u8) -> f64 {
        let mix = x1.to_bits() ^ x2.to_bits().rotate_left(17) ^ u64::from(n);
        self.checksum.fetch_add(mix, Ordering::Relaxed);
        self.calls.fetch_add(1, Ordering::Relaxed);
        x1
    }
}

#[test]
fn generation_is_reproducible_across_calls() {
    let seed = HarnessConfig::default().seed;
    let a: Vec<TestCase> = generate_cases(2048, seed);
    let b: Vec<TestCase> = generate_cases(2048, seed);
    assert_eq!(a, b);
    let bits = |cases: &[TestCase]| -> Vec<(u64, u64, u8)> {
        cases
            .iter()
            .map(|c| (c.x1.to_bits(), c.x2.to_bits(), c.n))
            .collect()
    };
    assert_eq!(bits(&a), bits(&b));
}

#[test]
fn every_implementation_sees_the_same_workload() {
    let pool = CasePool::from_config(&HarnessConfig {
        case_pool_size: 64,
        ..HarnessConfig::default()
    })
    .unwrap();

    let first = Recorder::new();
    let second = Recorder::new();
    run_benchmark(&first, &pool, 1000);
    run_benchmark(&second, &pool, 1000);
    assert_eq!(first.calls.load(Ordering::Relaxed), 1000);
    assert_eq!(
        first.checksum.load(Ordering::Relaxed),
        second.checksum.load(Ordering::Relaxed)
    );
}

#[test]
fn pool_is_shared_read_only_across_threads() {
    let pool = CasePool::new(32, 99).unwrap();
    let recorders: Vec<Recorder> = (0..4).map(|_| Recorder::new()).collect();

    thread::scope(|s| {
        for rec in &recorders {
            let pool = &pool;
            s.spawn(move || {
                run_benchmark(rec, pool, 320);
            });
        }
    });

    let sums: Vec<u64> = recorders
        .iter()
        .map(|r| r.checksum.load(Ordering::Relaxed))
        .collect();
    assert!(sums.windows(2).all(|w| w[0] == w[1]), "{sums:?}");
}

#[test]
fn drivers_feed_stats() {
    let pool = CasePool::new(16, 4).unwrap();
    let shallow: Vec<TestCase> = pool.iter().copied().filter(|c| c.n < 20).collect();
    assert!(pool.iter().all(|c| (2..=30).contains(&c.n)));
    assert!(shallow.len() < pool.len());

    let imp = NamedFn::new("cheap", |x1: f64, x2: f64, _n: u8| x1 * x2);
    let mut stats = BenchStats::default();
    for _ in 0..5 {
        stats.record(256, run_benchmark(&imp, &pool, 256));
    }
    let buffer = PairBuffer::new(HarnessConfig::default().seed);
    stats.record(64, run_fixed_order_benchmark(&Reference, &buffer, 10, 64));

    let summary = stats.summary().unwrap();
    assert_eq!(summary.samples, 6);
    assert_eq!(summary.total_iters, 5 * 256 + 64);
    assert!(summary.p50_ns_op <= summary.p99_ns_op);
}
