//! Navigation guards.
//!
//! Pure predicates deciding whether the previous/next period affordances
//! should be offered. They gate the UI only; the navigation operations
//! themselves stay unconditional.

use chrono::{DateTime, Utc};

use super::date::diff_millis;
use super::range::TimeRange;

/// The lower bound is still within `lookback_ms` of `now`.
///
/// # Example
///
/// ```rust
/// use chrono::{DateTime, Utc};
/// use timeframe::core::{guard, TimeRange, DAY, HOUR};
///
/// let now: DateTime<Utc> = "2024-02-01T00:00:00Z".parse().unwrap();
/// let lt: DateTime<Utc> = "2024-01-31T00:00:00Z".parse().unwrap();
/// let range = TimeRange { lt: Some(lt), duration: HOUR, ..TimeRange::default() };
///
/// assert!(guard::has_prev_period(&range, now, 30 * DAY));
/// ```
pub fn has_prev_period(range: &TimeRange, now: DateTime<Utc>, lookback_ms: i64) -> bool {
    match range.gte() {
        Some(gte) => diff_millis(now, gte) < lookback_ms,
        None => false,
    }
}

/// The range is fixed and its upper bound trails `now` by more than
/// `margin_ms`.
pub fn has_next_period(range: &TimeRange, now: DateTime<Utc>, margin_ms: i64) -> bool {
    if range.is_now {
        return false;
    }
    match range.valid_lt() {
        Some(lt) => diff_millis(now, lt) > margin_ms,
        None => false,
    }
}
