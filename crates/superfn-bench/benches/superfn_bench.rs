//! Throughput of the reference recurrence against faster implementations.
//!
//! Every implementation is driven by the same seeded case pool. The pool is
//! built before any timing starts.
//!
//! Workload knobs come from the harness environment, e.g.:
//! `SUPERFN_SEED=0x1234 SUPERFN_CASE_POOL_SIZE=4096 cargo bench -p superfn-bench`

use std::cell::RefCell;
use std::time::Duration;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use superfn_core::{NamedFn, Reference, SuperFn};
use superfn_harness::structured_log::LogEmitter;
use superfn_harness::{
    BenchStats, CasePool, HarnessConfig, PairBuffer, run_benchmark, run_fixed_order_benchmark,
    run_standard_suite,
};

fn iterative(x1: f64, x2: f64, n: u8) -> f64 {
    if n == 0 {
        return x1;
    }
    let (mut prev, mut cur) = (x1, x1 * x2);
    for _ in 1..n {
        (prev, cur) = (cur, prev * cur);
    }
    cur
}

fn table(x1: f64, x2: f64, n: u8) -> f64 {
    let mut t = [0.0f64; 256];
    t[0] = x1;
    t[1] = x1 * x2;
    for k in 2..=usize::from(n) {
        t[k] = t[k - 2] * t[k - 1];
    }
    t[usize::from(n)]
}

fn closed_form(x1: f64, x2: f64, n: u8) -> f64 {
    let (mut a, mut b) = (0.0f64, 1.0f64);
    for _ in 0..n {
        (a, b) = (b, a + b);
    }
    x1.powf(b) * x2.powf(a)
}

fn implementations() -> Vec<Box<dyn SuperFn>> {
    vec![
        Box::new(Reference),
        Box::new(NamedFn::new("iterative", iterative)),
        Box::new(NamedFn::new("table", table)),
        Box::new(NamedFn::new("closed_form", closed_form)),
    ]
}

fn report(emitter: &mut LogEmitter<std::io::Stdout>, stats: &BenchStats, imp: &str, bench: &str) {
    let Some(summary) = stats.summary() else {
        return;
    };
    if let Err(err) = emitter.emit_entry(summary.to_log_entry(imp, bench)) {
        eprintln!("SUPERFN_BENCH_META log_failed err={err}");
    }
}

fn bench_case_pool(c: &mut Criterion) {
    let config = HarnessConfig::from_env().expect("valid SUPERFN_* environment");
    let pool = CasePool::from_config(&config).expect("non-empty case pool");
    let mut emitter = LogEmitter::new(std::io::stdout(), "superfn_bench");
    println!(
        "SUPERFN_BENCH_META seed={:#x} pool_size={} bench_order={}",
        pool.seed(),
        pool.len(),
        config.bench_order
    );

    let mut group = c.benchmark_group("case_pool");
    group.throughput(Throughput::Elements(1));
    for imp in implementations() {
        if !imp.is_reference() {
            let conformance = run_standard_suite(&imp);
            if !conformance.passed() {
                println!(
                    "SUPERFN_BENCH_META skipped={} reason=nonconformant",
                    imp.name()
                );
                eprint!("{}", conformance.render());
                continue;
            }
        }
        let stats = RefCell::new(BenchStats::default());
        group.bench_function(BenchmarkId::new(imp.name(), pool.len()), |b| {
            b.iter_custom(|iters| {
                let dur = run_benchmark(&imp, &pool, iters).max(Duration::from_nanos(1));
                stats.borrow_mut().record(iters, dur);
                dur
            });
        });
        report(&mut emitter, &stats.borrow(), imp.name(), "case_pool");
    }
    group.finish();
}

fn bench_fixed_order(c: &mut Criterion) {
    let config = HarnessConfig::from_env().expect("valid SUPERFN_* environment");
    let buffer = PairBuffer::new(config.seed);
    let mut emitter = LogEmitter::new(std::io::stdout(), "superfn_bench_fixed");

    let mut group = c.benchmark_group("fixed_order");
    group.throughput(Throughput::Elements(1));
    for imp in implementations() {
        let stats = RefCell::new(BenchStats::default());
        group.bench_function(BenchmarkId::new(imp.name(), config.bench_order), |b| {
            b.iter_custom(|iters| {
                let dur = run_fixed_order_benchmark(&imp, &buffer, config.bench_order, iters)
                    .max(Duration::from_nanos(1));
                stats.borrow_mut().record(iters, dur);
                dur
            });
        });
        report(&mut emitter, &stats.borrow(), imp.name(), "fixed_order");
    }
    group.finish();
}

criterion_group!(
    name = benches;
    config = Criterion::default()
        .warm_up_time(Duration::from_millis(500))
        .measurement_time(Duration::from_secs(3))
        .sample_size(20);
    targets = bench_case_pool, bench_fixed_order
);
criterion_main!(benches);
