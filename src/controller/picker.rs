//! Date-only and time-only editors over the lower bound.
//!
//! Readers require a valid range; setters re-derive the full instant from
//! the current lower bound and move the range with `change_gte`.

use chrono::{Local, NaiveDateTime, TimeZone, Timelike};

use super::TimeRangeController;
use crate::core::date::{parse_date, to_local, to_utc, trunc_to, MINUTE};
use crate::params::{parse_leading_int, ParamError};

impl TimeRangeController {
    /// Lower bound's local date as `YYYY-MM-DD`.
    pub fn date_picker(&self) -> String {
        self.date_picker_in(&Local)
    }

    pub fn date_picker_in<Tz: TimeZone>(&self, tz: &Tz) -> String {
        debug_assert!(self.is_valid(), "date picker read on an invalid range");
        self.gte()
            .map(|gte| to_local(gte, tz).format("%Y-%m-%d").to_string())
            .unwrap_or_default()
    }

    /// Lower bound's local time as `HH:MM`.
    pub fn time_picker(&self) -> String {
        self.time_picker_in(&Local)
    }

    pub fn time_picker_in<Tz: TimeZone>(&self, tz: &Tz) -> String {
        debug_assert!(self.is_valid(), "time picker read on an invalid range");
        self.gte()
            .map(|gte| to_local(gte, tz).format("%H:%M").to_string())
            .unwrap_or_default()
    }

    /// Move the lower bound to another local date, keeping its time of day.
    ///
    /// Only the date changes: the lower bound does not move to the start of
    /// the new day, and the width is preserved.
    pub fn set_date_picker(&mut self, date: &str) -> Result<(), ParamError> {
        self.set_date_picker_in(date, &Local)
    }

    /// [`TimeRangeController::set_date_picker`] in an explicit time zone.
    pub fn set_date_picker_in<Tz: TimeZone>(
        &mut self,
        date: &str,
        tz: &Tz,
    ) -> Result<(), ParamError> {
        let invalid = || ParamError::InvalidDate(date.to_owned());
        let day = parse_date(date).ok_or_else(invalid)?.date_naive();
        let local = NaiveDateTime::new(day, self.local_gte(tz).time());
        let gte = to_utc(local, tz).ok_or_else(invalid)?;
        self.change_gte(gte);
        Ok(())
    }

    /// Move the lower bound to another local `HH:MM` on the same date.
    pub fn set_time_picker(&mut self, time: &str) -> Result<(), ParamError> {
        self.set_time_picker_in(time, &Local)
    }

    pub fn set_time_picker_in<Tz: TimeZone>(
        &mut self,
        time: &str,
        tz: &Tz,
    ) -> Result<(), ParamError> {
        let invalid = || ParamError::InvalidTime(time.to_owned());
        let (hours, minutes) = time.split_once(':').ok_or_else(invalid)?;
        let hours = parse_leading_int(hours)
            .and_then(|h| u32::try_from(h).ok())
            .ok_or_else(invalid)?;
        let minutes = parse_leading_int(minutes)
            .and_then(|m| u32::try_from(m).ok())
            .ok_or_else(invalid)?;

        let local = self
            .local_gte(tz)
            .with_hour(hours)
            .and_then(|dt| dt.with_minute(minutes))
            .ok_or_else(invalid)?;
        let gte = to_utc(local, tz).ok_or_else(invalid)?;
        self.change_gte(gte);
        Ok(())
    }

    fn local_gte<Tz: TimeZone>(&self, tz: &Tz) -> NaiveDateTime {
        debug_assert!(self.is_valid(), "picker write on an invalid range");
        let gte = self
            .gte()
            .unwrap_or_else(|| trunc_to(self.clock.now(), MINUTE));
        to_local(gte, tz)
    }
}
