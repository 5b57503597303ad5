//! The standard conformance suite.
//!
//! Every implementation of the function must pass it. From an
//! implementation's own tests:
//!
//! ```
//! use superfn_core::NamedFn;
//! use superfn_harness::assert_conformance;
//!
//! fn iterative(x1: f64, x2: f64, n: u8) -> f64 {
//!     if n == 0 {
//!         return x1;
//!     }
//!     let (mut prev, mut cur) = (x1, x1 * x2);
//!     for _ in 1..n {
//!         (prev, cur) = (cur, prev * cur);
//!     }
//!     cur
//! }
//!
//! assert_conformance(&NamedFn::new("iterative", iterative));
//! ```

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_json::json;
use superfn_core::SuperFn;

use crate::config::{ConfigError, HarnessConfig};
use crate::fixtures::{Comparison, FixtureSet};
use crate::structured_log::{LogEmitter, LogEntry, LogLevel, Outcome, StreamKind};
use crate::verify::{
    CheckResult, Mismatch, SuiteReport, check_against_literal, check_against_reference,
    check_exact,
};

pub const CHECK_ORDER_ZERO: &str = "n==0 -> x1";
pub const CHECK_ORDER_ONE: &str = "n==1 -> x1 * x2";
pub const CHECK_DIFFERENTIAL: &str = "n>1 -> f(x1,x2,n-2) * f(x1,x2,n-1)";

/// Runs the fixed battery of checks against an implementation.
///
/// Checks are independent: a failure in one never stops the others.
#[derive(Debug, Clone)]
pub struct StandardSuite {
    tolerance: f64,
    seed: u64,
    sample_count: usize,
    differential_max_order: u8,
    fixtures: FixtureSet,
}

impl Default for StandardSuite {
    fn default() -> Self {
        // Defaults always validate.
        Self::from_validated(&HarnessConfig::default())
    }
}

impl StandardSuite {
    /// Suite settings taken from `config`, which is validated first.
    ///
    /// A zero sample count or empty order range would let the randomized
    /// checks pass without evaluating anything, so those are rejected here.
    pub fn from_config(config: &HarnessConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_validated(config))
    }

    fn from_validated(config: &HarnessConfig) -> Self {
        Self {
            tolerance: config.tolerance,
            seed: config.seed,
            sample_count: config.sample_count,
            differential_max_order: config.differential_max_order,
            fixtures: FixtureSet::standard(),
        }
    }

    /// Replace the literal cases (the standard set is used otherwise).
    #[must_use]
    pub fn with_fixtures(mut self, fixtures: FixtureSet) -> Self {
        self.fixtures = fixtures;
        self
    }

    #[must_use]
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Run every check and collect the results.
    pub fn run<F>(&self, imp: &F) -> SuiteReport
    where
        F: SuperFn + ?Sized,
    {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut checks = Vec::with_capacity(self.fixtures.cases.len() + 3);

        checks.push(self.check_order_zero(imp, &mut rng));
        checks.push(self.check_order_one(imp, &mut rng));
        for case in &self.fixtures.cases {
            let result = match case.comparison {
                Comparison::Exact => check_exact(imp, case.expected, case.x1, case.x2, case.n),
                Comparison::Tolerance => check_against_literal(
                    imp,
                    case.expected,
                    case.x1,
                    case.x2,
                    case.n,
                    self.tolerance,
                ),
            };
            checks.push(CheckResult::from_mismatches(
                case.name.clone(),
                1,
                result.err().into_iter().collect(),
            ));
        }
        checks.push(if imp.is_reference() {
            CheckResult::skipped(CHECK_DIFFERENTIAL)
        } else {
            self.check_differential(imp, &mut rng)
        });

        SuiteReport {
            implementation: imp.name().to_string(),
            checks,
        }
    }

    /// Run every check, emitting one log entry per check plus start/end markers.
    ///
    /// Errors come only from the log writer; the report itself never fails.
    pub fn run_logged<F, W>(
        &self,
        imp: &F,
        emitter: &mut LogEmitter<W>,
    ) -> std::io::Result<SuiteReport>
    where
        F: SuperFn + ?Sized,
        W: std::io::Write,
    {
        emitter.emit_entry(
            LogEntry::new("", LogLevel::Info, "suite_start")
                .with_stream(StreamKind::Conformance)
                .with_implementation(imp.name())
                .with_details(json!({
                    "tolerance": self.tolerance,
                    "seed": self.seed,
                    "sample_count": self.sample_count,
                })),
        )?;

        let report = self.run(imp);
        for check in &report.checks {
            let level = if check.outcome == Outcome::Fail {
                LogLevel::Error
            } else {
                LogLevel::Info
            };
            let mut entry = LogEntry::new("", level, "check")
                .with_stream(StreamKind::Conformance)
                .with_implementation(&report.implementation)
                .with_check(&check.name)
                .with_outcome(check.outcome)
                .with_counts(check.samples, check.mismatches.len());
            if !check.mismatches.is_empty() {
                let details =
                    serde_json::to_value(&check.mismatches).map_err(std::io::Error::other)?;
                entry = entry.with_details(details);
            }
            emitter.emit_entry(entry)?;
        }

        let failed = report.failed_checks().count();
        emitter.emit_entry(
            LogEntry::new("", LogLevel::Info, "suite_end")
                .with_stream(StreamKind::Conformance)
                .with_implementation(&report.implementation)
                .with_outcome(if failed == 0 {
                    Outcome::Pass
                } else {
                    Outcome::Fail
                })
                .with_details(json!({ "checks": report.checks.len(), "failed": failed })),
        )?;
        emitter.flush()?;
        Ok(report)
    }

    fn check_order_zero<F>(&self, imp: &F, rng: &mut StdRng) -> CheckResult
    where
        F: SuperFn + ?Sized,
    {
        let mismatches: Vec<Mismatch> = (0..self.sample_count)
            .filter_map(|_| {
                let (x1, x2) = (rng.r#gen::<f64>(), rng.r#gen::<f64>());
                check_exact(imp, x1, x1, x2, 0).err()
            })
            .collect();
        CheckResult::from_mismatches(CHECK_ORDER_ZERO, self.sample_count, mismatches)
    }

    fn check_order_one<F>(&self, imp: &F, rng: &mut StdRng) -> CheckResult
    where
        F: SuperFn + ?Sized,
    {
        let mismatches: Vec<Mismatch> = (0..self.sample_count)
            .filter_map(|_| {
                let (x1, x2) = (rng.r#gen::<f64>(), rng.r#gen::<f64>());
                check_exact(imp, x1 * x2, x1, x2, 1).err()
            })
            .collect();
        CheckResult::from_mismatches(CHECK_ORDER_ONE, self.sample_count, mismatches)
    }

    fn check_differential<F>(&self, imp: &F, rng: &mut StdRng) -> CheckResult
    where
        F: SuperFn + ?Sized,
    {
        let mismatches: Vec<Mismatch> = (0..self.sample_count)
            .filter_map(|_| {
                let (x1, x2) = (rng.r#gen::<f64>(), rng.r#gen::<f64>());
                let n = rng.gen_range(0..self.differential_max_order);
                check_against_reference(imp, x1, x2, n, self.tolerance).err()
            })
            .collect();
        CheckResult::from_mismatches(CHECK_DIFFERENTIAL, self.sample_count, mismatches)
    }
}

/// Run the standard suite with default settings.
pub fn run_standard_suite<F>(imp: &F) -> SuiteReport
where
    F: SuperFn + ?Sized,
{
    StandardSuite::default().run(imp)
}

/// Run the standard suite and panic with the full report on any failure.
#[track_caller]
pub fn assert_conformance<F>(imp: &F)
where
    F: SuperFn + ?Sized,
{
    run_standard_suite(imp).assert_passed();
}
