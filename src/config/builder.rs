//! Builder for constructing controllers.

use std::sync::Arc;

use crate::config::{ConfigError, ControllerConfig};
use crate::controller::TimeRangeController;
use crate::core::{Clock, SystemClock};
use crate::sync::{ForceReload, ReloadSignal};

/// Builder for [`TimeRangeController`] with a fluent API.
///
/// Every part is optional: the system clock, a [`ForceReload`] signal and
/// the default [`ControllerConfig`] are used for anything left unset.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use timeframe::config::ControllerBuilder;
/// use timeframe::core::ManualClock;
///
/// let clock = ManualClock::new("2024-01-01T00:00:00Z".parse().unwrap());
/// let controller = ControllerBuilder::new()
///     .clock(Arc::new(clock))
///     .round_up(true)
///     .build()
///     .unwrap();
///
/// assert!(controller.round_up());
/// assert!(!controller.is_valid());
/// ```
#[derive(Debug, Default)]
pub struct ControllerBuilder {
    clock: Option<Arc<dyn Clock>>,
    reload: Option<Box<dyn ReloadSignal>>,
    config: Option<ControllerConfig>,
    round_up: Option<bool>,
}

impl ControllerBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the time source.
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Set the reload collaborator.
    pub fn reload_signal<R>(mut self, reload: R) -> Self
    where
        R: ReloadSignal + 'static,
    {
        self.reload = Some(Box::new(reload));
        self
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: ControllerConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Override the configured rounding policy.
    pub fn round_up(mut self, round_up: bool) -> Self {
        self.round_up = Some(round_up);
        self
    }

    /// Build the controller.
    /// Returns an error if the configuration does not validate.
    pub fn build(self) -> Result<TimeRangeController, ConfigError> {
        let mut config = self.config.unwrap_or_default();
        if let Some(round_up) = self.round_up {
            config.round_up = round_up;
        }
        config.validate()?;

        let clock = self.clock.unwrap_or_else(|| Arc::new(SystemClock));
        let reload = self
            .reload
            .unwrap_or_else(|| Box::new(ForceReload::new()));

        Ok(TimeRangeController::from_parts(clock, reload, config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_uses_defaults() {
        let controller = ControllerBuilder::new().build().unwrap();
        assert_eq!(controller.config(), &ControllerConfig::default());
        assert!(!controller.round_up());
    }

    #[test]
    fn round_up_overrides_config() {
        let config = ControllerConfig {
            round_up: true,
            ..ControllerConfig::default()
        };
        let controller = ControllerBuilder::new()
            .config(config)
            .round_up(false)
            .build()
            .unwrap();
        assert!(!controller.round_up());
    }

    #[test]
    fn builder_rejects_invalid_config() {
        let config = ControllerConfig {
            next_margin_ms: 0,
            ..ControllerConfig::default()
        };
        let result = ControllerBuilder::new().config(config).build();
        assert!(matches!(result, Err(ConfigError::NonPositiveMargin(0))));
    }
}
