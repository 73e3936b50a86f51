//! Configuration errors.

use thiserror::Error;

/// Errors raised when validating a [`ControllerConfig`](super::ControllerConfig).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Live refresh interval must be positive, got {0}ms")]
    NonPositiveRefreshInterval(i64),

    #[error("Live refresh interval must be at least one minute, got {0}ms")]
    SubMinuteRefreshInterval(i64),

    #[error("Previous-period look-back must be positive, got {0}ms")]
    NonPositiveLookback(i64),

    #[error("Next-period margin must be positive, got {0}ms")]
    NonPositiveMargin(i64),
}
