//! Deterministic benchmark workloads.
//!
//! A [`CasePool`] is generated once from a seed and then shared, read-only,
//! by every implementation in a comparison, so each one is driven by the
//! identical sequence of inputs.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::config::HarnessConfig;
use crate::error::HarnessError;

/// Probability that a generated order comes from [`DEEP_ORDERS`].
pub const DEEP_ORDER_PROBABILITY: f64 = 0.8;
/// Expensive orders, where most benchmark time should go.
pub const DEEP_ORDERS: std::ops::RangeInclusive<u8> = 20..=30;
/// Cheap orders, still exercised so shallow paths are measured.
pub const SHALLOW_ORDERS: std::ops::RangeInclusive<u8> = 2..=19;
/// Pair count of the legacy fixed-order buffer.
pub const LEGACY_PAIR_COUNT: usize = 512;

/// One benchmark input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TestCase {
    pub x1: f64,
    pub x2: f64,
    pub n: u8,
}

/// Generate `count` cases from `seed`.
///
/// `x1` and `x2` are uniform in `[0, 1)`; `n` comes from [`DEEP_ORDERS`] with
/// probability [`DEEP_ORDER_PROBABILITY`], otherwise from [`SHALLOW_ORDERS`].
#[must_use]
pub fn generate_cases(count: usize, seed: u64) -> Vec<TestCase> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            let x1 = rng.r#gen::<f64>();
            let x2 = rng.r#gen::<f64>();
            let n = if rng.gen_bool(DEEP_ORDER_PROBABILITY) {
                rng.gen_range(DEEP_ORDERS)
            } else {
                rng.gen_range(SHALLOW_ORDERS)
            };
            TestCase { x1, x2, n }
        })
        .collect()
}

/// Fixed, pre-generated benchmark inputs, indexed cyclically.
#[derive(Debug, Clone)]
pub struct CasePool {
    seed: u64,
    cases: Box<[TestCase]>,
}

impl CasePool {
    pub fn new(count: usize, seed: u64) -> Result<Self, HarnessError> {
        if count == 0 {
            return Err(HarnessError::EmptyCasePool);
        }
        Ok(Self {
            seed,
            cases: generate_cases(count, seed).into_boxed_slice(),
        })
    }

    /// Pool sized and seeded by `config`, which is validated first.
    pub fn from_config(config: &HarnessConfig) -> Result<Self, HarnessError> {
        config.validate()?;
        Self::new(config.case_pool_size, config.seed)
    }

    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cases.len()
    }

    /// Always false; construction rejects empty pools.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    #[must_use]
    pub fn cases(&self) -> &[TestCase] {
        &self.cases
    }

    /// Case for benchmark iteration `iteration` (wraps around).
    #[inline]
    #[must_use]
    pub fn get(&self, iteration: u64) -> TestCase {
        self.cases[(iteration % self.cases.len() as u64) as usize]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TestCase> {
        self.cases.iter()
    }
}

impl<'a> IntoIterator for &'a CasePool {
    type Item = &'a TestCase;
    type IntoIter = std::slice::Iter<'a, TestCase>;

    fn into_iter(self) -> Self::IntoIter {
        self.cases.iter()
    }
}

/// Legacy workload: 512 seeded `(x1, x2)` pairs evaluated at one fixed order.
///
/// Kept for comparison with historical numbers; [`CasePool`] is the
/// representative workload.
#[derive(Debug, Clone)]
pub struct PairBuffer {
    pairs: Box<[(f64, f64)]>,
}

impl PairBuffer {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let pairs = (0..LEGACY_PAIR_COUNT)
            .map(|_| (rng.r#gen::<f64>(), rng.r#gen::<f64>()))
            .collect();
        Self { pairs }
    }

    #[inline]
    #[must_use]
    pub fn pair(&self, iteration: u64) -> (f64, f64) {
        self.pairs[(iteration % self.pairs.len() as u64) as usize]
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}
