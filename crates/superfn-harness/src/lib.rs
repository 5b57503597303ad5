//! Conformance and benchmark harness for super function implementations.
//!
//! This crate provides:
//! - Standard suite: the fixed battery of checks every implementation must pass
//! - Verification: exact and tolerance-based comparison with full operand reports
//! - Case generation: seeded, reusable benchmark workloads
//! - Benchmark driver: timed loops that plug into criterion's `iter_custom`
//! - Structured logging: JSONL evidence for conformance and perf runs

#![forbid(unsafe_code)]

pub mod bench;
pub mod cases;
pub mod config;
pub mod error;
pub mod fixtures;
pub mod structured_log;
pub mod suite;
pub mod verify;

pub use bench::{BenchStats, BenchSummary, run_benchmark, run_fixed_order_benchmark};
pub use cases::{CasePool, PairBuffer, TestCase, generate_cases};
pub use config::HarnessConfig;
pub use error::HarnessError;
pub use fixtures::{Comparison, FixtureSet, LiteralCase};
pub use suite::{StandardSuite, assert_conformance, run_standard_suite};
pub use verify::{
    CheckResult, Mismatch, SuiteReport, check_against_literal, check_against_reference,
};
