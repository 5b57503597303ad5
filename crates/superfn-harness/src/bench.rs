//! Benchmark driver.
//!
//! Drives an implementation with pre-generated inputs and returns the time
//! spent in the driving loop only. Results are fed to `black_box` and
//! otherwise discarded; correctness is the suite's job, not the driver's.
//!
//! The returned [`Duration`] is shaped for criterion's `iter_custom`:
//!
//! ```ignore
//! b.iter_custom(|iters| run_benchmark(&imp, &pool, iters));
//! ```

use std::hint::black_box;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use superfn_core::SuperFn;

use crate::cases::{CasePool, PairBuffer};
use crate::structured_log::{LogEntry, LogLevel, StreamKind};

/// Evaluate `imp` once per iteration on `pool.get(iteration)`.
pub fn run_benchmark<F>(imp: &F, pool: &CasePool, iterations: u64) -> Duration
where
    F: SuperFn + ?Sized,
{
    let start = Instant::now();
    for i in 0..iterations {
        let case = pool.get(i);
        black_box(imp.eval(black_box(case.x1), black_box(case.x2), black_box(case.n)));
    }
    start.elapsed()
}

/// Legacy driver: every iteration uses the same `order`, operands cycle
/// through `buffer`.
pub fn run_fixed_order_benchmark<F>(
    imp: &F,
    buffer: &PairBuffer,
    order: u8,
    iterations: u64,
) -> Duration
where
    F: SuperFn + ?Sized,
{
    let start = Instant::now();
    for i in 0..iterations {
        let (x1, x2) = buffer.pair(i);
        black_box(imp.eval(black_box(x1), black_box(x2), black_box(order)));
    }
    start.elapsed()
}

/// Per-sample timing accumulator.
#[derive(Debug, Default, Clone)]
pub struct BenchStats {
    samples_ns_per_op: Vec<f64>,
    total_iters: u64,
    total_ns: u128,
}

/// Percentile summary of recorded samples.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchSummary {
    pub samples: usize,
    pub total_iters: u64,
    pub p50_ns_op: f64,
    pub p95_ns_op: f64,
    pub p99_ns_op: f64,
    pub mean_ns_op: f64,
    pub throughput_ops_s: f64,
}

impl BenchStats {
    /// Record one sample of `iters` iterations taking `dur`.
    pub fn record(&mut self, iters: u64, dur: Duration) {
        if iters == 0 {
            return;
        }
        let ns = dur.as_nanos();
        self.total_iters = self.total_iters.saturating_add(iters);
        self.total_ns = self.total_ns.saturating_add(ns);
        self.samples_ns_per_op.push(ns as f64 / iters as f64);
    }

    /// `None` until at least one sample is recorded.
    #[must_use]
    pub fn summary(&self) -> Option<BenchSummary> {
        if self.samples_ns_per_op.is_empty() {
            return None;
        }
        let mut samples = self.samples_ns_per_op.clone();
        samples.sort_by(f64::total_cmp);

        let mean = samples.iter().sum::<f64>() / samples.len() as f64;
        let throughput_ops_s = if self.total_ns == 0 {
            0.0
        } else {
            (self.total_iters as f64) / (self.total_ns as f64 / 1e9)
        };
        Some(BenchSummary {
            samples: samples.len(),
            total_iters: self.total_iters,
            p50_ns_op: percentile_sorted(&samples, 0.50),
            p95_ns_op: percentile_sorted(&samples, 0.95),
            p99_ns_op: percentile_sorted(&samples, 0.99),
            mean_ns_op: mean,
            throughput_ops_s,
        })
    }
}

impl BenchSummary {
    /// Perf-stream log entry for `implementation` under `bench`.
    #[must_use]
    pub fn to_log_entry(&self, implementation: &str, bench: &str) -> LogEntry {
        LogEntry::new("", LogLevel::Info, "bench_summary")
            .with_stream(StreamKind::Perf)
            .with_implementation(implementation)
            .with_check(bench)
            .with_iterations(self.total_iters)
            .with_latency_ns(self.p50_ns_op.round() as u64)
            .with_details(serde_json::json!({
                "samples": self.samples,
                "p50_ns_op": self.p50_ns_op,
                "p95_ns_op": self.p95_ns_op,
                "p99_ns_op": self.p99_ns_op,
                "mean_ns_op": self.mean_ns_op,
                "throughput_ops_s": self.throughput_ops_s,
            }))
    }
}

fn percentile_sorted(sorted: &[f64], p: f64) -> f64 {
    debug_assert!((0.0..=1.0).contains(&p));
    if sorted.is_empty() {
        return 0.0;
    }
    let idx = ((sorted.len() - 1) as f64 * p).round() as usize;
    sorted[idx.min(sorted.len() - 1)]
}
