//! Date utilities shared by the range state and its encodings.
//!
//! Units are expressed in milliseconds so they compose directly with the
//! range's `duration`.

use chrono::{
    DateTime, LocalResult, NaiveDate, NaiveDateTime, SecondsFormat, TimeZone, Utc,
};

pub const SECOND: i64 = 1_000;
pub const MINUTE: i64 = 60 * SECOND;
pub const HOUR: i64 = 60 * MINUTE;
pub const DAY: i64 = 24 * HOUR;

const UTC_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Floor `dt` to a multiple of `unit_ms` since the Unix epoch.
///
/// Sub-millisecond precision is dropped.
pub fn trunc_to(dt: DateTime<Utc>, unit_ms: i64) -> DateTime<Utc> {
    let unit = unit_ms.max(1);
    let floored = dt.timestamp_millis().div_euclid(unit) * unit;
    DateTime::from_timestamp_millis(floored).unwrap_or(dt)
}

/// Ceiling of `dt` to a multiple of `unit_ms`. Instants already on a
/// boundary are returned unchanged.
pub fn ceil_to(dt: DateTime<Utc>, unit_ms: i64) -> DateTime<Utc> {
    let floored = trunc_to(dt, unit_ms);
    if floored == dt {
        return dt;
    }
    add_millis(floored, unit_ms.max(1))
}

/// `dt + ms`, or `None` when the result leaves chrono's representable range.
pub fn checked_add_millis(dt: DateTime<Utc>, ms: i64) -> Option<DateTime<Utc>> {
    dt.checked_add_signed(chrono::TimeDelta::try_milliseconds(ms)?)
}

/// `dt - ms`, or `None` when the result leaves chrono's representable range.
pub fn checked_sub_millis(dt: DateTime<Utc>, ms: i64) -> Option<DateTime<Utc>> {
    dt.checked_sub_signed(chrono::TimeDelta::try_milliseconds(ms)?)
}

/// `dt + ms` for clock and timer arithmetic. Out-of-range results leave
/// `dt` unchanged.
pub fn add_millis(dt: DateTime<Utc>, ms: i64) -> DateTime<Utc> {
    checked_add_millis(dt, ms).unwrap_or(dt)
}

/// Signed difference `later - earlier` in milliseconds.
pub fn diff_millis(later: DateTime<Utc>, earlier: DateTime<Utc>) -> i64 {
    later.signed_duration_since(earlier).num_milliseconds()
}

/// Second-precision UTC rendering used in URL query strings.
pub fn format_utc(dt: DateTime<Utc>) -> String {
    dt.format(UTC_FORMAT).to_string()
}

/// Millisecond-precision ISO-8601 rendering with a `Z` suffix.
pub fn format_iso(dt: DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parse an instant written by [`format_utc`], any RFC 3339 string, or a
/// bare `YYYY-MM-DD HH:MM:SS` (taken as UTC).
pub fn parse_utc(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%SZ", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|naive| naive.and_utc())
}

/// Parse a `YYYY-MM-DD` date as midnight UTC.
pub fn parse_date(s: &str) -> Option<DateTime<Utc>> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Wall-clock reading of `dt` in `tz`.
pub fn to_local<Tz: TimeZone>(dt: DateTime<Utc>, tz: &Tz) -> NaiveDateTime {
    dt.with_timezone(tz).naive_local()
}

/// Resolve a wall-clock reading in `tz` back to an absolute instant.
///
/// Ambiguous readings (DST fall-back) resolve to the earlier instant;
/// readings that fall into a DST gap do not resolve.
pub fn to_utc<Tz: TimeZone>(naive: NaiveDateTime, tz: &Tz) -> Option<DateTime<Utc>> {
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => Some(dt.with_timezone(&Utc)),
        LocalResult::Ambiguous(first, _second) => Some(first.with_timezone(&Utc)),
        LocalResult::None => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    fn at(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    #[test]
    fn trunc_floors_to_minute() {
        assert_eq!(
            trunc_to(at("2024-03-01T10:15:42.250Z"), MINUTE),
            at("2024-03-01T10:15:00Z")
        );
    }

    #[test]
    fn ceil_rounds_up_unless_on_boundary() {
        assert_eq!(
            ceil_to(at("2024-03-01T10:15:00.001Z"), MINUTE),
            at("2024-03-01T10:16:00Z")
        );
        assert_eq!(
            ceil_to(at("2024-03-01T10:15:00Z"), MINUTE),
            at("2024-03-01T10:15:00Z")
        );
    }

    #[test]
    fn trunc_handles_pre_epoch_instants() {
        assert_eq!(
            trunc_to(at("1969-12-31T23:59:30Z"), MINUTE),
            at("1969-12-31T23:59:00Z")
        );
    }

    #[test]
    fn utc_format_parses_back() {
        let dt = at("2024-01-01T00:00:00Z");
        assert_eq!(format_utc(dt), "2024-01-01T00:00:00Z");
        assert_eq!(parse_utc(&format_utc(dt)), Some(dt));
    }

    #[test]
    fn iso_format_has_millis() {
        assert_eq!(
            format_iso(at("2024-01-01T12:30:05.5Z")),
            "2024-01-01T12:30:05.500Z"
        );
    }

    #[test]
    fn parse_utc_accepts_offsets_and_bare_datetimes() {
        assert_eq!(
            parse_utc("2024-01-01T02:00:00+02:00"),
            Some(at("2024-01-01T00:00:00Z"))
        );
        assert_eq!(
            parse_utc("2024-01-01 00:00:00"),
            Some(at("2024-01-01T00:00:00Z"))
        );
        assert_eq!(parse_utc("yesterday"), None);
    }

    #[test]
    fn local_round_trip_through_fixed_offset() {
        let tz = FixedOffset::east_opt(3 * 3600).unwrap();
        let dt = at("2024-06-01T21:30:00Z");
        let naive = to_local(dt, &tz);
        assert_eq!(naive.to_string(), "2024-06-02 00:30:00");
        assert_eq!(to_utc(naive, &tz), Some(dt));
    }

    #[test]
    fn checked_arithmetic_reports_overflow() {
        let dt = at("2024-01-01T00:00:00Z");
        assert_eq!(checked_add_millis(dt, HOUR), Some(at("2024-01-01T01:00:00Z")));
        assert_eq!(checked_sub_millis(dt, DAY), Some(at("2023-12-31T00:00:00Z")));
        assert_eq!(checked_add_millis(dt, i64::MAX), None);
        assert_eq!(checked_sub_millis(dt, 9_000_000_000_000_000), None);
        assert_eq!(add_millis(dt, i64::MAX), dt);
    }
}
