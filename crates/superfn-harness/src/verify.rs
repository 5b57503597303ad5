//! Output comparison and verification.

use std::fmt;

use serde::{Deserialize, Serialize};
use superfn_core::{SuperFn, is_equal_with_tolerance, reference, relative_deviation};

use crate::structured_log::Outcome;

/// A failed comparison, with every operand needed to reproduce it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mismatch {
    pub x1: f64,
    pub x2: f64,
    pub n: u8,
    /// Literal or computed reference value.
    pub expected: f64,
    /// Value returned by the implementation under test.
    pub actual: f64,
    pub relative_deviation: f64,
}

impl Mismatch {
    #[must_use]
    pub fn new(x1: f64, x2: f64, n: u8, expected: f64, actual: f64) -> Self {
        Self {
            x1,
            x2,
            n,
            expected,
            actual,
            relative_deviation: relative_deviation(expected, actual),
        }
    }
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "x1: {:?}, x2: {:?}, n: {}, expected: {:e}, actual: {:e}, relative deviation: {:e}",
            self.x1, self.x2, self.n, self.expected, self.actual, self.relative_deviation
        )
    }
}

/// Result of one named check in a suite.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckResult {
    pub name: String,
    pub outcome: Outcome,
    /// Number of evaluations the check performed.
    pub samples: usize,
    pub mismatches: Vec<Mismatch>,
}

impl CheckResult {
    /// Pass when at least one sample ran and `mismatches` is empty.
    ///
    /// A check that evaluated nothing proves nothing and fails.
    #[must_use]
    pub fn from_mismatches(name: impl Into<String>, samples: usize, mismatches: Vec<Mismatch>) -> Self {
        let outcome = if samples > 0 && mismatches.is_empty() {
            Outcome::Pass
        } else {
            Outcome::Fail
        };
        Self {
            name: name.into(),
            outcome,
            samples,
            mismatches,
        }
    }

    #[must_use]
    pub fn skipped(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            outcome: Outcome::Skip,
            samples: 0,
            mismatches: Vec::new(),
        }
    }
}

/// All check results for one implementation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuiteReport {
    pub implementation: String,
    pub checks: Vec<CheckResult>,
}

impl SuiteReport {
    /// True when no check failed. Skipped checks do not count against it.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.checks.iter().all(|c| c.outcome != Outcome::Fail)
    }

    pub fn failed_checks(&self) -> impl Iterator<Item = &CheckResult> {
        self.checks.iter().filter(|c| c.outcome == Outcome::Fail)
    }

    #[must_use]
    pub fn check(&self, name: &str) -> Option<&CheckResult> {
        self.checks.iter().find(|c| c.name == name)
    }

    /// Human-readable summary, one line per check plus one per mismatch.
    #[must_use]
    pub fn render(&self) -> String {
        let failed = self.failed_checks().count();
        let mut out = format!(
            "conformance: {} ({} checks, {} failed)\n",
            self.implementation,
            self.checks.len(),
            failed
        );
        for check in &self.checks {
            let label = match check.outcome {
                Outcome::Pass => "PASS",
                Outcome::Fail => "FAIL",
                Outcome::Skip => "SKIP",
            };
            out.push_str(&format!("  [{label}] {} ({} samples)\n", check.name, check.samples));
            for m in &check.mismatches {
                out.push_str(&format!("      {m}\n"));
            }
        }
        out
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Panic with the rendered report unless every check passed.
    #[track_caller]
    pub fn assert_passed(&self) {
        assert!(self.passed(), "{}", self.render());
    }
}

/// Compare `imp` against the reference recurrence evaluated on the same inputs.
pub fn check_against_reference<F>(
    imp: &F,
    x1: f64,
    x2: f64,
    n: u8,
    tolerance: f64,
) -> Result<(), Mismatch>
where
    F: SuperFn + ?Sized,
{
    check_against_literal(imp, reference(x1, x2, n), x1, x2, n, tolerance)
}

/// Compare `imp` against a precomputed `expected` value.
pub fn check_against_literal<F>(
    imp: &F,
    expected: f64,
    x1: f64,
    x2: f64,
    n: u8,
    tolerance: f64,
) -> Result<(), Mismatch>
where
    F: SuperFn + ?Sized,
{
    let actual = imp.eval(x1, x2, n);
    if is_equal_with_tolerance(expected, actual, tolerance) {
        Ok(())
    } else {
        Err(Mismatch::new(x1, x2, n, expected, actual))
    }
}

/// Compare `imp` against `expected` with `==`.
pub fn check_exact<F>(imp: &F, expected: f64, x1: f64, x2: f64, n: u8) -> Result<(), Mismatch>
where
    F: SuperFn + ?Sized,
{
    let actual = imp.eval(x1, x2, n);
    if actual == expected {
        Ok(())
    } else {
        Err(Mismatch::new(x1, x2, n, expected, actual))
    }
}
