//! Timeframe: state for a time range selector
//!
//! A range is a half-open interval `[gte, lt)` that is either pinned to a
//! fixed historical window or "live", advancing with wall-clock time while
//! keeping its width. The controller keeps the range consistent, bounds
//! navigation, and renders it for the URL and for two query backends.
//!
//! # Core Concepts
//!
//! - **Range**: an upper bound plus a width; the lower bound is derived
//! - **Live mode**: the upper bound snaps to the current minute and is
//!   re-advanced by a single polled timer
//! - **Encodings**: URL query params, ISO-8601 backend params and
//!   nanosecond-epoch backend params
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use timeframe::core::{ManualClock, HOUR};
//! use timeframe::sync::UrlQuery;
//! use timeframe::TimeRangeController;
//!
//! let clock = ManualClock::new("2024-01-02T00:00:00Z".parse().unwrap());
//! let mut controller = TimeRangeController::with_clock(Arc::new(clock));
//! let mut url = UrlQuery::parse("time_gte=2024-01-01T00%3A00%3A00Z&time_dur=3600");
//!
//! controller.sync_query(&mut url);
//! assert!(!controller.is_now());
//! assert_eq!(controller.duration(), HOUR);
//!
//! let loki = controller.loki_params();
//! assert_eq!(loki.start, Some(1_704_067_200_000_000_000));
//! ```

pub mod config;
pub mod controller;
pub mod core;
pub mod params;
pub mod sync;

// Re-export commonly used types
pub use config::{ConfigError, ControllerBuilder, ControllerConfig};
pub use controller::TimeRangeController;
pub use crate::core::{Clock, Field, ManualClock, SystemClock, TimeRange};
pub use params::{AxiosParams, LokiParams, ParamError, QueryParams};
pub use sync::{ForceReload, QuerySync, ReloadSignal, UrlQuery};
