//! The time range controller.
//!
//! Owns the range cells, the live timer and the collaborators, and is the
//! only writer of any of them. Every mutation that is not itself a live
//! tick leaves live mode and disarms the timer first, so "live" and
//! "explicit fixed range" never overlap.

mod picker;

use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{debug, trace};

use crate::config::{ControllerBuilder, ControllerConfig};
use crate::core::date::{
    add_millis, ceil_to, checked_add_millis, checked_sub_millis, format_utc, parse_utc,
    trunc_to, MINUTE, SECOND,
};
use crate::core::{
    guard, Clock, Field, LiveTimer, Observers, SystemClock, TimeRange, MAX_DURATION,
};
use crate::params::{
    parse_leading_int, AxiosParams, LokiParams, ParamError, QueryParams, TIME_DUR, TIME_GTE,
};
use crate::sync::{ForceReload, QuerySync, ReloadSignal};

/// State and transitions of a time range selector.
///
/// Single-threaded: the host drives both user actions and the live timer
/// (via [`TimeRangeController::poll_timer`]) from the same loop.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use timeframe::controller::TimeRangeController;
/// use timeframe::core::{ManualClock, HOUR};
///
/// let clock = ManualClock::new("2024-01-02T00:00:30Z".parse().unwrap());
/// let mut controller = TimeRangeController::with_clock(Arc::new(clock));
///
/// controller.change_duration(HOUR);
/// assert!(controller.is_now());
/// assert_eq!(controller.lt().unwrap().to_rfc3339(), "2024-01-02T00:00:00+00:00");
/// assert_eq!(controller.query_params().to_query_string(), "time_dur=3600");
/// ```
#[derive(Debug)]
pub struct TimeRangeController {
    range: TimeRange,
    timer: LiveTimer,
    clock: Arc<dyn Clock>,
    reload: Box<dyn ReloadSignal>,
    observers: Observers,
    config: ControllerConfig,
    synced_revision: Option<u64>,
}

impl Default for TimeRangeController {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeRangeController {
    /// Empty controller on the system clock with default settings.
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self::from_parts(
            clock,
            Box::new(ForceReload::new()),
            ControllerConfig::default(),
        )
    }

    pub fn builder() -> ControllerBuilder {
        ControllerBuilder::new()
    }

    pub(crate) fn from_parts(
        clock: Arc<dyn Clock>,
        reload: Box<dyn ReloadSignal>,
        config: ControllerConfig,
    ) -> Self {
        let range = TimeRange {
            round_up: config.round_up,
            ..TimeRange::default()
        };
        Self {
            range,
            timer: LiveTimer::new(),
            clock,
            reload,
            observers: Observers::new(),
            config,
            synced_revision: None,
        }
    }

    //--------------------------------------------------------------------------
    // Cells

    pub fn round_up(&self) -> bool {
        self.range.round_up
    }

    pub fn set_round_up(&mut self, round_up: bool) {
        if self.range.round_up != round_up {
            self.range.round_up = round_up;
            self.observers.notify(Field::RoundUp);
        }
    }

    /// Upper bound cell. May be set while the range is still invalid.
    pub fn lt(&self) -> Option<DateTime<Utc>> {
        self.range.lt
    }

    /// Lower bound, `lt - duration`. `None` while invalid.
    pub fn gte(&self) -> Option<DateTime<Utc>> {
        self.range.gte()
    }

    /// Width in milliseconds.
    pub fn duration(&self) -> i64 {
        self.range.duration
    }

    pub fn is_now(&self) -> bool {
        self.range.is_now
    }

    pub fn is_valid(&self) -> bool {
        self.range.is_valid()
    }

    /// Copy of the current range cells.
    pub fn snapshot(&self) -> TimeRange {
        self.range.clone()
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    /// Pending live-tracking deadline, for hosts that sleep between ticks.
    pub fn next_deadline(&self) -> Option<DateTime<Utc>> {
        self.timer.deadline()
    }

    /// Register a callback run after every effective cell change.
    pub fn on_change<F>(&mut self, callback: F)
    where
        F: FnMut(Field) + 'static,
    {
        self.observers.subscribe(callback);
    }

    /// Monotonic counter of effective cell changes.
    pub fn revision(&self) -> u64 {
        self.observers.revision()
    }

    fn set_lt(&mut self, lt: Option<DateTime<Utc>>) {
        if self.range.lt != lt {
            self.range.lt = lt;
            self.observers.notify(Field::Lt);
        }
    }

    fn set_duration(&mut self, ms: i64) {
        let ms = ms.clamp(0, MAX_DURATION);
        if self.range.duration != ms {
            self.range.duration = ms;
            self.observers.notify(Field::Duration);
        }
    }

    fn set_is_now(&mut self, is_now: bool) {
        if self.range.is_now != is_now {
            self.range.is_now = is_now;
            self.observers.notify(Field::IsNow);
        }
    }

    //--------------------------------------------------------------------------
    // Live tracking

    /// Advance a live range to the current minute.
    ///
    /// Without `force` this only acts while already live. Returns whether
    /// the upper bound moved; when it did, the next tick is scheduled.
    pub fn update_now(&mut self, force: bool) -> bool {
        if !force && !self.range.is_now {
            return false;
        }

        self.set_is_now(true);
        let now = self.clock.now();
        let now_val = if self.range.round_up {
            ceil_to(now, MINUTE)
        } else {
            trunc_to(now, MINUTE)
        };

        if self.range.lt.is_some_and(|lt| now_val <= lt) {
            trace!(%now_val, "live range already current");
            return false;
        }
        self.set_lt(Some(now_val));
        self.timer.arm(add_millis(now, self.config.refresh_interval_ms));
        debug!(lt = %now_val, duration = self.range.duration, "live range advanced");

        true
    }

    /// Run the live tick if its deadline has passed.
    ///
    /// A live range whose minute has not turned yet is re-armed, so the
    /// tick is never lost.
    pub fn poll_timer(&mut self) -> bool {
        let now = self.clock.now();
        if !self.timer.is_due(now) {
            return false;
        }
        self.timer.disarm();
        let advanced = self.update_now(false);
        if !advanced && self.range.is_now {
            self.timer.arm(add_millis(now, self.config.refresh_interval_ms));
        }
        advanced
    }

    fn reset_now_timer(&mut self) {
        self.timer.disarm();
        if self.range.is_now {
            debug!("leaving live mode");
        }
        self.set_is_now(false);
    }

    /// Advance a live range, then ask consumers to refetch.
    pub fn reload(&mut self) {
        self.update_now(false);
        self.reload.trigger();
    }

    /// Enter (or stay in) live mode, then ask consumers to refetch.
    pub fn reload_now(&mut self) {
        self.update_now(true);
        self.reload.trigger();
    }

    //--------------------------------------------------------------------------
    // Mutators

    pub fn reset(&mut self) {
        self.reset_now_timer();
        self.set_lt(None);
        self.set_duration(0);
    }

    /// Fix the range to `[gte, lt)`.
    pub fn change(&mut self, gte: DateTime<Utc>, lt: DateTime<Utc>) {
        let duration = lt.signed_duration_since(gte).num_milliseconds();
        self.set_lt(Some(lt));
        self.set_duration(duration);
        self.reset_now_timer();
    }

    /// Change the width.
    ///
    /// A fixed range keeps its lower bound as long as the new upper bound
    /// is still in the past; otherwise the range goes live.
    pub fn change_duration(&mut self, ms: i64) {
        let ms = ms.min(MAX_DURATION);
        if !self.range.is_now {
            let new_lt = self.range.gte().and_then(|gte| checked_add_millis(gte, ms));
            if let Some(new_lt) = new_lt {
                if new_lt < self.clock.now() {
                    self.set_duration(ms);
                    self.set_lt(Some(new_lt));
                    return;
                }
            }
        }

        self.set_duration(ms);
        self.update_now(true);
    }

    /// Center the range on `at`, optionally changing the width first.
    ///
    /// Any nonzero `ms` replaces the width; a negative one clamps to zero
    /// and leaves the range invalid. The resulting upper bound never passes
    /// the current minute's ceiling; a future `at` silently lands on "now".
    pub fn change_around(&mut self, at: DateTime<Utc>, ms: Option<i64>) {
        if let Some(ms) = ms.filter(|ms| *ms != 0) {
            self.set_duration(ms);
        }

        let target = add_millis(at, self.range.duration / 2);
        let now = ceil_to(self.clock.now(), MINUTE);
        self.change_lt(target.min(now));
    }

    /// [`TimeRangeController::change_around`] for an instant in text form.
    pub fn change_around_str(&mut self, at: &str, ms: Option<i64>) -> Result<(), ParamError> {
        let at = parse_utc(at).ok_or_else(|| ParamError::InvalidInstant(at.to_owned()))?;
        self.change_around(at, ms);
        Ok(())
    }

    /// Fix the lower bound, keeping the width.
    ///
    /// An upper bound past chrono's range clears `lt`, leaving the range
    /// invalid.
    pub fn change_gte(&mut self, gte: DateTime<Utc>) {
        match checked_add_millis(gte, self.range.duration) {
            Some(lt) => self.change_lt(lt),
            None => {
                debug!(%gte, duration = self.range.duration, "upper bound out of range");
                self.reset_now_timer();
                self.set_lt(None);
            }
        }
    }

    /// Fix the upper bound, keeping the width.
    pub fn change_lt(&mut self, lt: DateTime<Utc>) {
        self.reset_now_timer();
        self.set_lt(Some(lt));
    }

    //--------------------------------------------------------------------------
    // Navigation

    /// Whether stepping back is still offered: the lower bound is within
    /// the look-back window.
    pub fn has_prev_period(&self) -> bool {
        guard::has_prev_period(&self.range, self.clock.now(), self.config.lookback_ms)
    }

    /// Shift the whole window back by one width. Not clamped.
    pub fn prev_period(&mut self) {
        debug_assert!(self.range.lt.is_some(), "prev_period on an empty range");
        self.reset_now_timer();
        if let Some(lt) = self.range.lt {
            self.set_lt(checked_sub_millis(lt, self.range.duration));
        }
    }

    /// Whether stepping forward is offered: fixed, and trailing now by more
    /// than the margin.
    pub fn has_next_period(&self) -> bool {
        guard::has_next_period(&self.range, self.clock.now(), self.config.next_margin_ms)
    }

    /// Shift the window forward by one width, stopping at now. Stays fixed
    /// even when it lands exactly on now.
    pub fn next_period(&mut self) {
        debug_assert!(self.range.lt.is_some(), "next_period on an empty range");
        let Some(lt) = self.range.lt else {
            return;
        };
        let now = self.clock.now();
        let candidate = checked_add_millis(lt, self.range.duration).unwrap_or(now);
        self.change_lt(candidate.min(now));
    }

    //--------------------------------------------------------------------------
    // Encodings

    /// URL form: `time_dur` in seconds, plus `time_gte` unless live.
    pub fn query_params(&self) -> QueryParams {
        let mut params = QueryParams::new();
        let Some(gte) = self.range.gte() else {
            return params;
        };

        if !self.range.is_now {
            params.insert(TIME_GTE, format_utc(gte));
        }
        params.insert(TIME_DUR, (self.range.duration / SECOND).to_string());
        params
    }

    /// Restore state from URL parameters.
    ///
    /// Without `time_dur` nothing happens. A malformed `time_dur` or
    /// `time_gte` leaves the range invalid instead of failing.
    pub fn parse_query_params(&mut self, params: &QueryParams) {
        let Some(dur) = params.get(TIME_DUR).filter(|dur| !dur.is_empty()) else {
            return;
        };

        let seconds = parse_leading_int(dur).unwrap_or(0);
        self.set_duration(seconds.saturating_mul(SECOND));

        match params.get(TIME_GTE) {
            Some(gte) => match parse_utc(gte) {
                Some(gte) => self.change_gte(gte),
                None => {
                    debug!(time_gte = gte, "ignoring malformed lower bound");
                    self.reset_now_timer();
                    self.set_lt(None);
                }
            },
            None => {
                self.update_now(true);
            }
        }
        debug!(
            duration = self.range.duration,
            is_now = self.range.is_now,
            valid = self.range.is_valid(),
            "range hydrated from query"
        );
    }

    /// Parameters for the ISO-timestamp backend.
    pub fn axios_params(&self) -> AxiosParams {
        match self.range.bounds() {
            Some((gte, lt)) => AxiosParams::new(gte, lt, self.reload.current_params()),
            None => AxiosParams::default(),
        }
    }

    /// Parameters for the nanosecond-epoch backend.
    pub fn loki_params(&self) -> LokiParams {
        match self.range.bounds() {
            Some((gte, lt)) => LokiParams::new(gte, lt, self.reload.current_params()),
            None => LokiParams::default(),
        }
    }

    //--------------------------------------------------------------------------
    // URL sync

    /// Hydrate from the URL once, then write the resulting state back.
    pub fn sync_query<Q>(&mut self, sync: &mut Q)
    where
        Q: QuerySync + ?Sized,
    {
        let params = sync.query();
        self.parse_query_params(&params);
        self.push_query(sync);
    }

    /// Write the range back to the URL if it changed since the last write.
    /// Returns whether a write happened.
    pub fn write_query<Q>(&mut self, sync: &mut Q) -> bool
    where
        Q: QuerySync + ?Sized,
    {
        if self.synced_revision == Some(self.revision()) {
            return false;
        }
        self.push_query(sync);
        true
    }

    fn push_query<Q>(&mut self, sync: &mut Q)
    where
        Q: QuerySync + ?Sized,
    {
        sync.replace(self.query_params());
        self.synced_revision = Some(self.revision());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::date::{DAY, HOUR};
    use crate::core::ManualClock;

    fn at(s: &str) -> DateTime<Utc> {
        s.parse().unwrap()
    }

    fn controller_at(now: &str) -> (TimeRangeController, ManualClock) {
        let clock = ManualClock::new(at(now));
        let controller = TimeRangeController::with_clock(Arc::new(clock.clone()));
        (controller, clock)
    }

    #[test]
    fn new_controller_is_empty() {
        let (controller, _clock) = controller_at("2024-01-01T00:00:00Z");
        assert!(!controller.is_valid());
        assert!(!controller.is_now());
        assert_eq!(controller.lt(), None);
        assert_eq!(controller.duration(), 0);
        assert_eq!(controller.next_deadline(), None);
    }

    #[test]
    fn update_now_without_force_is_noop_when_fixed() {
        let (mut controller, _clock) = controller_at("2024-01-01T12:00:00Z");
        controller.change(at("2024-01-01T00:00:00Z"), at("2024-01-01T01:00:00Z"));

        assert!(!controller.update_now(false));
        assert_eq!(controller.lt(), Some(at("2024-01-01T01:00:00Z")));
        assert!(!controller.is_now());
    }

    #[test]
    fn forced_update_floors_to_minute_and_arms_timer() {
        let (mut controller, _clock) = controller_at("2024-01-01T12:34:56Z");
        controller.change_duration(HOUR);

        assert!(controller.is_now());
        assert_eq!(controller.lt(), Some(at("2024-01-01T12:34:00Z")));
        assert_eq!(controller.next_deadline(), Some(at("2024-01-01T12:39:56Z")));
    }

    #[test]
    fn round_up_uses_minute_ceiling() {
        let (mut controller, _clock) = controller_at("2024-01-01T12:34:56Z");
        controller.set_round_up(true);
        controller.change_duration(HOUR);

        assert_eq!(controller.lt(), Some(at("2024-01-01T12:35:00Z")));
    }

    #[test]
    fn update_now_within_same_minute_does_not_move_or_rearm() {
        let (mut controller, clock) = controller_at("2024-01-01T12:34:10Z");
        controller.change_duration(HOUR);
        let deadline = controller.next_deadline();

        clock.advance_millis(20 * SECOND);
        assert!(!controller.update_now(false));
        assert_eq!(controller.lt(), Some(at("2024-01-01T12:34:00Z")));
        assert_eq!(controller.next_deadline(), deadline);
    }

    #[test]
    fn poll_timer_advances_live_range() {
        let (mut controller, clock) = controller_at("2024-01-01T12:00:00Z");
        controller.change_duration(HOUR);

        clock.advance_millis(4 * MINUTE);
        assert!(!controller.poll_timer());

        clock.advance_millis(MINUTE);
        assert!(controller.poll_timer());
        assert_eq!(controller.lt(), Some(at("2024-01-01T12:05:00Z")));
        assert_eq!(controller.gte(), Some(at("2024-01-01T11:05:00Z")));
        assert_eq!(controller.next_deadline(), Some(at("2024-01-01T12:10:00Z")));
    }

    #[test]
    fn leaving_live_mode_disarms_timer() {
        let (mut controller, clock) = controller_at("2024-01-01T12:00:00Z");
        controller.change_duration(HOUR);
        controller.change_lt(at("2024-01-01T06:00:00Z"));

        assert!(!controller.is_now());
        assert_eq!(controller.next_deadline(), None);

        clock.advance_millis(10 * MINUTE);
        assert!(!controller.poll_timer());
        assert_eq!(controller.lt(), Some(at("2024-01-01T06:00:00Z")));
    }

    #[test]
    fn reset_clears_everything() {
        let (mut controller, _clock) = controller_at("2024-01-01T12:00:00Z");
        controller.change_duration(HOUR);
        controller.reset();

        assert!(!controller.is_valid());
        assert!(!controller.is_now());
        assert_eq!(controller.lt(), None);
        assert_eq!(controller.next_deadline(), None);
    }

    #[test]
    fn change_duration_keeps_lower_bound_in_the_past() {
        let (mut controller, _clock) = controller_at("2024-01-02T00:00:00Z");
        controller.change(at("2024-01-01T00:00:00Z"), at("2024-01-01T01:00:00Z"));

        controller.change_duration(2 * HOUR);

        assert!(!controller.is_now());
        assert_eq!(controller.gte(), Some(at("2024-01-01T00:00:00Z")));
        assert_eq!(controller.lt(), Some(at("2024-01-01T02:00:00Z")));
    }

    #[test]
    fn change_duration_into_future_goes_live() {
        let (mut controller, _clock) = controller_at("2024-01-01T01:30:00Z");
        controller.change(at("2024-01-01T00:00:00Z"), at("2024-01-01T01:00:00Z"));

        controller.change_duration(2 * HOUR);

        assert!(controller.is_now());
        assert_eq!(controller.lt(), Some(at("2024-01-01T01:30:00Z")));
        assert_eq!(controller.duration(), 2 * HOUR);
    }

    #[test]
    fn change_around_centers_on_instant() {
        let (mut controller, _clock) = controller_at("2024-01-02T00:00:00Z");
        controller.change_around(at("2024-01-01T12:00:00Z"), Some(HOUR));

        assert_eq!(controller.gte(), Some(at("2024-01-01T11:30:00Z")));
        assert_eq!(controller.lt(), Some(at("2024-01-01T12:30:00Z")));
        assert!(!controller.is_now());
    }

    #[test]
    fn change_around_clamps_to_now_ceiling() {
        let (mut controller, _clock) = controller_at("2024-01-01T12:00:30Z");
        controller.change_around(at("2024-01-01T12:00:00Z"), Some(HOUR));

        assert_eq!(controller.lt(), Some(at("2024-01-01T12:01:00Z")));
    }

    #[test]
    fn change_around_str_rejects_garbage() {
        let (mut controller, _clock) = controller_at("2024-01-02T00:00:00Z");
        controller.change_duration(HOUR);

        let err = controller.change_around_str("noon-ish", None).unwrap_err();
        assert_eq!(err, ParamError::InvalidInstant("noon-ish".into()));
        assert!(controller.is_now());

        controller
            .change_around_str("2024-01-01T12:00:00Z", None)
            .unwrap();
        assert_eq!(controller.lt(), Some(at("2024-01-01T12:30:00Z")));
    }

    #[test]
    fn prev_period_shifts_back_without_clamping() {
        let (mut controller, _clock) = controller_at("2024-03-01T00:00:00Z");
        controller.change(at("2024-01-01T00:00:00Z"), at("2024-01-02T00:00:00Z"));

        controller.prev_period();

        assert_eq!(controller.lt(), Some(at("2024-01-01T00:00:00Z")));
        assert_eq!(controller.gte(), Some(at("2023-12-31T00:00:00Z")));
        assert!(!controller.has_prev_period());
    }

    #[test]
    fn next_period_stops_at_now_and_stays_fixed() {
        let (mut controller, _clock) = controller_at("2024-01-01T12:20:00Z");
        controller.change(at("2024-01-01T11:00:00Z"), at("2024-01-01T12:00:00Z"));
        assert!(controller.has_next_period());

        controller.next_period();

        assert_eq!(controller.lt(), Some(at("2024-01-01T12:20:00Z")));
        assert!(!controller.is_now());
        assert!(!controller.has_next_period());
    }

    #[test]
    fn navigation_guards_follow_config() {
        let clock = ManualClock::new(at("2024-01-10T00:00:00Z"));
        let mut controller = TimeRangeController::builder()
            .clock(Arc::new(clock))
            .config(ControllerConfig {
                lookback_ms: DAY,
                ..ControllerConfig::default()
            })
            .build()
            .unwrap();
        controller.change(at("2024-01-08T00:00:00Z"), at("2024-01-08T01:00:00Z"));

        assert!(!controller.has_prev_period());
        assert!(controller.has_next_period());
    }

    #[test]
    fn observers_see_each_effective_change() {
        use std::cell::RefCell;
        use std::rc::Rc;

        let (mut controller, _clock) = controller_at("2024-01-02T00:00:00Z");
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        controller.on_change(move |field| sink.borrow_mut().push(field));

        controller.change(at("2024-01-01T00:00:00Z"), at("2024-01-01T01:00:00Z"));
        controller.change_lt(at("2024-01-01T01:00:00Z"));

        assert_eq!(*seen.borrow(), vec![Field::Lt, Field::Duration]);
    }

    #[test]
    fn reload_triggers_signal_and_merges_token() {
        let (mut controller, _clock) = controller_at("2024-01-02T00:00:00Z");
        controller.change(at("2024-01-01T00:00:00Z"), at("2024-01-01T01:00:00Z"));
        assert!(controller.axios_params().extra.is_empty());

        controller.reload();

        assert!(!controller.is_now());
        let params = controller.axios_params();
        assert!(params.extra.contains_key(crate::sync::FORCE_PARAM));
        assert_eq!(params.time_gte.as_deref(), Some("2024-01-01T00:00:00.000Z"));
    }

    #[test]
    fn reload_now_enters_live_mode() {
        let (mut controller, _clock) = controller_at("2024-01-02T00:00:00Z");
        controller.change(at("2024-01-01T00:00:00Z"), at("2024-01-01T01:00:00Z"));

        controller.reload_now();

        assert!(controller.is_now());
        assert_eq!(controller.lt(), Some(at("2024-01-02T00:00:00Z")));
        assert_eq!(controller.duration(), HOUR);
    }

    #[test]
    fn invalid_range_encodes_to_empty_params() {
        let (controller, _clock) = controller_at("2024-01-02T00:00:00Z");
        assert!(controller.query_params().is_empty());
        assert!(controller.axios_params().is_empty());
        assert!(controller.loki_params().is_empty());
    }

    #[test]
    fn parse_without_duration_is_noop() {
        let (mut controller, _clock) = controller_at("2024-01-02T00:00:00Z");
        let params: QueryParams = [(TIME_GTE, "2024-01-01T00:00:00Z")].into_iter().collect();

        controller.parse_query_params(&params);

        assert!(!controller.is_valid());
        assert_eq!(controller.revision(), 0);
    }

    #[test]
    fn parse_without_lower_bound_goes_live() {
        let (mut controller, _clock) = controller_at("2024-01-02T00:00:45Z");
        let params: QueryParams = [(TIME_DUR, "900")].into_iter().collect();

        controller.parse_query_params(&params);

        assert!(controller.is_now());
        assert_eq!(controller.duration(), 15 * MINUTE);
        assert_eq!(controller.lt(), Some(at("2024-01-02T00:00:00Z")));
    }

    #[test]
    fn parse_non_numeric_duration_degrades_to_invalid() {
        let (mut controller, _clock) = controller_at("2024-01-02T00:00:00Z");
        let params: QueryParams = [(TIME_DUR, "soon"), (TIME_GTE, "2024-01-01T00:00:00Z")]
            .into_iter()
            .collect();

        controller.parse_query_params(&params);

        assert!(!controller.is_valid());
        assert!(controller.query_params().is_empty());
    }

    #[test]
    fn parse_malformed_lower_bound_degrades_to_invalid() {
        let (mut controller, _clock) = controller_at("2024-01-02T00:00:00Z");
        controller.change_duration(HOUR);
        let params: QueryParams = [(TIME_DUR, "3600"), (TIME_GTE, "last tuesday")]
            .into_iter()
            .collect();

        controller.parse_query_params(&params);

        assert!(!controller.is_valid());
        assert!(!controller.is_now());
        assert_eq!(controller.next_deadline(), None);
    }

    #[test]
    fn oversized_query_duration_is_capped() {
        let (mut controller, _clock) = controller_at("2024-06-01T00:00:00Z");
        let params = QueryParams::from_query_string(
            "time_dur=9000000000000&time_gte=2024-01-01T00%3A00%3A00Z",
        );
        controller.parse_query_params(&params);

        assert_eq!(controller.duration(), MAX_DURATION);
        assert!(controller.is_valid());
        let gte = at("2024-01-01T00:00:00Z");
        assert_eq!(controller.gte(), Some(gte));
        assert_eq!(controller.lt(), checked_add_millis(gte, MAX_DURATION));

        let loki = controller.loki_params();
        assert_eq!(loki.start, Some(1_704_067_200_000_000_000));
        assert!(loki.start < loki.end);
    }

    #[test]
    fn change_gte_past_representable_range_invalidates() {
        let (mut controller, _clock) = controller_at("2024-06-01T00:00:00Z");
        controller.change_duration(DAY);
        controller.change_gte(DateTime::<Utc>::MAX_UTC);

        assert!(!controller.is_valid());
        assert!(!controller.is_now());
        assert_eq!(controller.lt(), None);
        assert_eq!(controller.loki_params(), LokiParams::default());
    }

    #[test]
    fn change_around_with_negative_width_invalidates() {
        let (mut controller, _clock) = controller_at("2024-01-02T00:00:00Z");
        controller.change_duration(HOUR);
        controller.change_around(at("2024-01-01T12:00:00Z"), Some(-HOUR));

        assert_eq!(controller.duration(), 0);
        assert_eq!(controller.lt(), Some(at("2024-01-01T12:00:00Z")));
        assert!(!controller.is_valid());
        assert!(!controller.is_now());
    }

    #[test]
    fn sub_minute_tick_rearms_until_minute_turns() {
        let clock = ManualClock::new(at("2024-01-01T12:00:10Z"));
        let config = ControllerConfig {
            refresh_interval_ms: 30 * SECOND,
            ..ControllerConfig::default()
        };
        let mut controller = TimeRangeController::from_parts(
            Arc::new(clock.clone()),
            Box::new(ForceReload::new()),
            config,
        );
        controller.change_duration(HOUR);
        assert_eq!(controller.next_deadline(), Some(at("2024-01-01T12:00:40Z")));

        clock.advance_millis(30 * SECOND);
        assert!(!controller.poll_timer());
        assert!(controller.is_now());
        assert_eq!(controller.lt(), Some(at("2024-01-01T12:00:00Z")));
        assert_eq!(controller.next_deadline(), Some(at("2024-01-01T12:01:10Z")));

        clock.advance_millis(30 * SECOND);
        assert!(controller.poll_timer());
        assert_eq!(controller.lt(), Some(at("2024-01-01T12:01:00Z")));
    }
}
