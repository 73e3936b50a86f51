//! Controller configuration and builder.

mod builder;
pub mod error;

pub use builder::ControllerBuilder;
pub use error::ConfigError;

use serde::{Deserialize, Serialize};

use crate::core::date::{DAY, MINUTE};

/// Tunables for live tracking and navigation.
///
/// Missing fields fall back to their defaults when deserializing, so a
/// host only needs to spell out what it changes.
///
/// # Example
///
/// ```rust
/// use timeframe::config::ControllerConfig;
///
/// let config: ControllerConfig = serde_json::from_str(r#"{"round_up": true}"#).unwrap();
/// assert!(config.round_up);
/// assert_eq!(config.refresh_interval_ms, 5 * 60 * 1000);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    /// How often a live range advances.
    pub refresh_interval_ms: i64,
    /// How far back the lower bound may sit for `has_prev_period`.
    pub lookback_ms: i64,
    /// How far the upper bound must trail now for `has_next_period`.
    pub next_margin_ms: i64,
    /// Initial rounding policy for live advancement.
    pub round_up: bool,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            refresh_interval_ms: 5 * MINUTE,
            lookback_ms: 30 * DAY,
            next_margin_ms: 15 * MINUTE,
            round_up: false,
        }
    }
}

impl ControllerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.refresh_interval_ms <= 0 {
            return Err(ConfigError::NonPositiveRefreshInterval(self.refresh_interval_ms));
        }
        // Live bounds move in whole minutes.
        if self.refresh_interval_ms < MINUTE {
            return Err(ConfigError::SubMinuteRefreshInterval(self.refresh_interval_ms));
        }
        if self.lookback_ms <= 0 {
            return Err(ConfigError::NonPositiveLookback(self.lookback_ms));
        }
        if self.next_margin_ms <= 0 {
            return Err(ConfigError::NonPositiveMargin(self.next_margin_ms));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert_eq!(ControllerConfig::default().validate(), Ok(()));
    }

    #[test]
    fn zero_refresh_interval_is_rejected() {
        let config = ControllerConfig {
            refresh_interval_ms: 0,
            ..ControllerConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::NonPositiveRefreshInterval(0))
        );
    }

    #[test]
    fn sub_minute_refresh_interval_is_rejected() {
        let config = ControllerConfig {
            refresh_interval_ms: 30_000,
            ..ControllerConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::SubMinuteRefreshInterval(30_000))
        );

        let config = ControllerConfig {
            refresh_interval_ms: MINUTE,
            ..ControllerConfig::default()
        };
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn negative_lookback_is_rejected() {
        let config = ControllerConfig {
            lookback_ms: -1,
            ..ControllerConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::NonPositiveLookback(-1)));
    }

    #[test]
    fn partial_json_keeps_other_defaults() {
        let config: ControllerConfig =
            serde_json::from_str(r#"{"next_margin_ms": 60000}"#).unwrap();
        assert_eq!(config.next_margin_ms, 60_000);
        assert_eq!(config.lookback_ms, 30 * DAY);
    }
}
