//! Literal expectation fixtures.

use serde::{Deserialize, Serialize};

/// How a literal case compares the actual value to `expected`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Comparison {
    /// Bit-for-bit float equality (`==`).
    Exact,
    /// Relative tolerance taken from the suite configuration.
    Tolerance,
}

/// A precomputed input/output pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiteralCase {
    /// Case identifier.
    pub name: String,
    pub x1: f64,
    pub x2: f64,
    pub n: u8,
    /// Expected result.
    pub expected: f64,
    pub comparison: Comparison,
}

/// A collection of literal cases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixtureSet {
    /// Schema version.
    pub version: String,
    /// Family name.
    pub family: String,
    /// Individual cases.
    pub cases: Vec<LiteralCase>,
}

impl FixtureSet {
    /// The literal checks every implementation must pass.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            version: "v1".to_string(),
            family: "superfn/standard".to_string(),
            cases: vec![
                LiteralCase {
                    // 1, 2, 2, 4
                    name: "x1=1,x2=2,n=3 -> 4".to_string(),
                    x1: 1.0,
                    x2: 2.0,
                    n: 3,
                    expected: 4.0,
                    comparison: Comparison::Exact,
                },
                LiteralCase {
                    // 2, 6, 12, 72, 864, 62208
                    name: "x1=2,x2=3,n=5 -> 62208".to_string(),
                    x1: 2.0,
                    x2: 3.0,
                    n: 5,
                    expected: 62208.0,
                    comparison: Comparison::Exact,
                },
                LiteralCase {
                    name: "x1=1.0001,x2=1.00002,n=30 -> 4.917359272354959e65".to_string(),
                    x1: 1.0001,
                    x2: 1.00002,
                    n: 30,
                    expected: 4.917359272354959e65,
                    comparison: Comparison::Tolerance,
                },
            ],
        }
    }

    /// Load fixture set from JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize fixture set to JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
