//! Harness error type.

use thiserror::Error;

use crate::config::ConfigError;

#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("config: {0}")]
    Config(#[from] ConfigError),
    #[error("case pool must hold at least one case")]
    EmptyCasePool,
}
