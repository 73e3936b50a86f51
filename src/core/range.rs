//! The time range value.
//!
//! A range is stored as an exclusive upper bound plus a width. The lower
//! bound is always derived, never stored, so the two can't drift apart.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::date::{checked_sub_millis, DAY};

/// Widest range the controller accepts: ten thousand years in milliseconds.
/// Wider widths are clamped on write so both bounds stay representable.
pub const MAX_DURATION: i64 = 10_000 * 365 * DAY;

/// Half-open interval `[gte, lt)` with its live-tracking flags.
///
/// All fields are plain values; the controller is the only writer.
///
/// # Example
///
/// ```rust
/// use chrono::{DateTime, Utc};
/// use timeframe::core::TimeRange;
///
/// let lt: DateTime<Utc> = "2024-01-01T01:00:00Z".parse().unwrap();
/// let range = TimeRange {
///     lt: Some(lt),
///     duration: 3_600_000,
///     ..TimeRange::default()
/// };
///
/// assert!(range.is_valid());
/// assert_eq!(range.gte().unwrap().to_rfc3339(), "2024-01-01T00:00:00+00:00");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    /// Exclusive upper bound.
    pub lt: Option<DateTime<Utc>>,
    /// Width in milliseconds.
    pub duration: i64,
    /// Whether the upper bound tracks wall-clock time.
    pub is_now: bool,
    /// Live advancement snaps to the minute ceiling instead of the floor.
    pub round_up: bool,
}

impl TimeRange {
    /// An empty, invalid range.
    pub fn new() -> Self {
        Self::default()
    }

    /// A fixed range covering `[gte, lt)`. A reversed pair yields a zero
    /// width, which is invalid.
    pub fn between(gte: DateTime<Utc>, lt: DateTime<Utc>) -> Self {
        Self {
            lt: Some(lt),
            duration: lt
                .signed_duration_since(gte)
                .num_milliseconds()
                .clamp(0, MAX_DURATION),
            ..Self::default()
        }
    }

    /// True when an upper bound is set, the width is positive, and the
    /// lower bound is representable.
    pub fn is_valid(&self) -> bool {
        self.gte().is_some()
    }

    /// Inclusive lower bound, `lt - duration`. `None` while invalid.
    pub fn gte(&self) -> Option<DateTime<Utc>> {
        if self.duration <= 0 {
            return None;
        }
        checked_sub_millis(self.lt?, self.duration)
    }

    /// Upper bound, gated on validity like [`TimeRange::gte`].
    pub fn valid_lt(&self) -> Option<DateTime<Utc>> {
        if !self.is_valid() {
            return None;
        }
        self.lt
    }

    /// Both bounds at once, for encoders.
    pub fn bounds(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        Some((self.gte()?, self.valid_lt()?))
    }
}
