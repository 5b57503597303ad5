//! Harness configuration.
//!
//! Defaults are the canonical constants; each can be overridden through the
//! environment:
//! - `SUPERFN_TOLERANCE`: maximum relative deviation (default `0.001`).
//! - `SUPERFN_BENCH_ORDER`: order used by the fixed-order benchmark (default `30`).
//! - `SUPERFN_CASE_POOL_SIZE`: number of pre-generated benchmark cases (default `2048`).
//! - `SUPERFN_SEED`: root seed, decimal or `0x...` (default `0xDEAD_BEEF`).
//! - `SUPERFN_SAMPLE_COUNT`: random samples per randomized suite check (default `10`).
//!
//! A malformed value is an error rather than a silent fallback: a typo in a
//! tolerance would otherwise quietly change what "conformant" means.

use superfn_core::DEFAULT_TOLERANCE;
use thiserror::Error;

pub const DEFAULT_BENCH_ORDER: u8 = 30;
pub const DEFAULT_CASE_POOL_SIZE: usize = 2048;
pub const DEFAULT_SEED: u64 = 0xDEAD_BEEF;
pub const DEFAULT_SAMPLE_COUNT: usize = 10;
/// Differential samples draw orders from `0..DEFAULT_DIFFERENTIAL_MAX_ORDER`.
pub const DEFAULT_DIFFERENTIAL_MAX_ORDER: u8 = 30;

pub const ENV_TOLERANCE: &str = "SUPERFN_TOLERANCE";
pub const ENV_BENCH_ORDER: &str = "SUPERFN_BENCH_ORDER";
pub const ENV_CASE_POOL_SIZE: &str = "SUPERFN_CASE_POOL_SIZE";
pub const ENV_SEED: &str = "SUPERFN_SEED";
pub const ENV_SAMPLE_COUNT: &str = "SUPERFN_SAMPLE_COUNT";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{key}={value:?}: {reason}")]
    Malformed {
        key: &'static str,
        value: String,
        reason: String,
    },
    #[error("{field} is invalid: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Process-wide harness settings. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct HarnessConfig {
    pub tolerance: f64,
    pub bench_order: u8,
    pub case_pool_size: usize,
    pub seed: u64,
    pub sample_count: usize,
    pub differential_max_order: u8,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            bench_order: DEFAULT_BENCH_ORDER,
            case_pool_size: DEFAULT_CASE_POOL_SIZE,
            seed: DEFAULT_SEED,
            sample_count: DEFAULT_SAMPLE_COUNT,
            differential_max_order: DEFAULT_DIFFERENTIAL_MAX_ORDER,
        }
    }
}

impl HarnessConfig {
    /// Defaults overridden by `SUPERFN_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each key.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();
        if let Some(raw) = lookup(ENV_TOLERANCE) {
            cfg.tolerance = parse_field(ENV_TOLERANCE, &raw)?;
        }
        if let Some(raw) = lookup(ENV_BENCH_ORDER) {
            cfg.bench_order = parse_field(ENV_BENCH_ORDER, &raw)?;
        }
        if let Some(raw) = lookup(ENV_CASE_POOL_SIZE) {
            cfg.case_pool_size = parse_field(ENV_CASE_POOL_SIZE, &raw)?;
        }
        if let Some(raw) = lookup(ENV_SEED) {
            cfg.seed = parse_seed(&raw)?;
        }
        if let Some(raw) = lookup(ENV_SAMPLE_COUNT) {
            cfg.sample_count = parse_field(ENV_SAMPLE_COUNT, &raw)?;
        }
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.tolerance.is_finite() || self.tolerance < 0.0 {
            return Err(ConfigError::Invalid {
                field: "tolerance",
                reason: "must be finite and non-negative",
            });
        }
        if self.case_pool_size == 0 {
            return Err(ConfigError::Invalid {
                field: "case_pool_size",
                reason: "must be greater than zero",
            });
        }
        if self.sample_count == 0 {
            return Err(ConfigError::Invalid {
                field: "sample_count",
                reason: "must be greater than zero",
            });
        }
        if self.differential_max_order == 0 {
            return Err(ConfigError::Invalid {
                field: "differential_max_order",
                reason: "must be greater than zero",
            });
        }
        Ok(())
    }
}

fn parse_field<T>(key: &'static str, raw: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse::<T>()
        .map_err(|e| ConfigError::Malformed {
            key,
            value: raw.to_string(),
            reason: e.to_string(),
        })
}

/// Parse a seed written as decimal or `0x` hex; `_` separators are allowed.
pub fn parse_seed(raw: &str) -> Result<u64, ConfigError> {
    let cleaned: String = raw.trim().chars().filter(|&c| c != '_').collect();
    let parsed = match cleaned
        .strip_prefix("0x")
        .or_else(|| cleaned.strip_prefix("0X"))
    {
        Some(hex) => u64::from_str_radix(hex, 16),
        None => cleaned.parse::<u64>(),
    };
    parsed.map_err(|e| ConfigError::Malformed {
        key: ENV_SEED,
        value: raw.to_string(),
        reason: format!("invalid seed: {e}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_match_canonical_constants() {
        let cfg = HarnessConfig::default();
        assert_eq!(cfg.tolerance, 0.001);
        assert_eq!(cfg.bench_order, 30);
        assert_eq!(cfg.case_pool_size, 2048);
        assert_eq!(cfg.sample_count, 10);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn empty_environment_yields_defaults() {
        let cfg = HarnessConfig::from_lookup(|_| None).unwrap();
        assert_eq!(cfg, HarnessConfig::default());
    }

    #[test]
    fn overrides_are_applied() {
        let cfg = HarnessConfig::from_lookup(lookup_from(&[
            (ENV_TOLERANCE, "0.01"),
            (ENV_BENCH_ORDER, " 24 "),
            (ENV_CASE_POOL_SIZE, "64"),
            (ENV_SEED, "0xCAFE_F00D"),
            (ENV_SAMPLE_COUNT, "3"),
        ]))
        .unwrap();
        assert_eq!(cfg.tolerance, 0.01);
        assert_eq!(cfg.bench_order, 24);
        assert_eq!(cfg.case_pool_size, 64);
        assert_eq!(cfg.seed, 0xCAFE_F00D);
        assert_eq!(cfg.sample_count, 3);
    }

    #[test]
    fn malformed_values_are_rejected() {
        let err = HarnessConfig::from_lookup(lookup_from(&[(ENV_BENCH_ORDER, "300")]))
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Malformed {
                key: ENV_BENCH_ORDER,
                ..
            }
        ));

        let err = HarnessConfig::from_lookup(lookup_from(&[(ENV_SEED, "0xZZ")])).unwrap_err();
        assert!(err.to_string().starts_with("SUPERFN_SEED="));
    }

    #[test]
    fn invalid_values_fail_validation() {
        for raw in ["-0.1", "NaN", "inf"] {
            let err =
                HarnessConfig::from_lookup(lookup_from(&[(ENV_TOLERANCE, raw)])).unwrap_err();
            assert!(
                matches!(
                    err,
                    ConfigError::Invalid {
                        field: "tolerance",
                        ..
                    }
                ),
                "{raw}"
            );
        }
        let err =
            HarnessConfig::from_lookup(lookup_from(&[(ENV_CASE_POOL_SIZE, "0")])).unwrap_err();
        assert_eq!(err.to_string(), "case_pool_size is invalid: must be greater than zero");
    }

    #[test]
    fn seed_formats() {
        assert_eq!(parse_seed("42"), Ok(42));
        assert_eq!(parse_seed("0xDEAD_BEEF"), Ok(0xDEAD_BEEF));
        assert_eq!(parse_seed("0Xff"), Ok(255));
        assert_eq!(parse_seed("1_000"), Ok(1000));
        assert!(parse_seed("").is_err());
        let err = parse_seed("-1").unwrap_err();
        assert!(matches!(
            &err,
            ConfigError::Malformed { key: ENV_SEED, value, .. } if value == "-1"
        ));
        assert!(err.to_string().starts_with("SUPERFN_SEED=\"-1\": invalid seed"));
    }
}
