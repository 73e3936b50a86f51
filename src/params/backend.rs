//! Request parameters for the two query backends.

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use crate::core::date::format_iso;

/// Extra request parameters contributed by a collaborator, such as a
/// cache-busting reload token.
pub type ExtraParams = Map<String, Value>;

/// Merge two parameter records. Keys in `overlay` win over `base`.
///
/// # Example
///
/// ```rust
/// use serde_json::json;
/// use timeframe::params::merge;
///
/// let base = json!({"a": 1, "b": 1}).as_object().cloned().unwrap();
/// let overlay = json!({"b": 2}).as_object().cloned().unwrap();
///
/// let merged = merge(base, overlay);
/// assert_eq!(merged["a"], 1);
/// assert_eq!(merged["b"], 2);
/// ```
pub fn merge(base: ExtraParams, overlay: ExtraParams) -> ExtraParams {
    let mut merged = base;
    for (key, value) in overlay {
        merged.insert(key, value);
    }
    merged
}

/// Backend A: ISO-8601 bounds under `time_gte` / `time_lt`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AxiosParams {
    pub time_gte: Option<String>,
    pub time_lt: Option<String>,
    pub extra: ExtraParams,
}

impl AxiosParams {
    pub(crate) fn new(gte: DateTime<Utc>, lt: DateTime<Utc>, extra: ExtraParams) -> Self {
        Self {
            time_gte: Some(format_iso(gte)),
            time_lt: Some(format_iso(lt)),
            extra,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.time_gte.is_none() && self.time_lt.is_none()
    }

    /// Flatten into a single record. Range keys override same-named extras.
    pub fn into_map(self) -> ExtraParams {
        let mut own = Map::new();
        own.insert("time_gte".into(), self.time_gte.map_or(Value::Null, Value::from));
        own.insert("time_lt".into(), self.time_lt.map_or(Value::Null, Value::from));
        merge(self.extra, own)
    }
}

/// Backend B: nanosecond-epoch bounds under `start` / `end`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LokiParams {
    pub start: Option<i64>,
    pub end: Option<i64>,
    pub extra: ExtraParams,
}

impl LokiParams {
    pub(crate) fn new(gte: DateTime<Utc>, lt: DateTime<Utc>, extra: ExtraParams) -> Self {
        Self {
            start: Some(epoch_nanos(gte)),
            end: Some(epoch_nanos(lt)),
            extra,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    /// Flatten into a single record. Range keys override same-named extras.
    pub fn into_map(self) -> ExtraParams {
        let mut own = Map::new();
        own.insert("start".into(), self.start.map_or(Value::Null, Value::from));
        own.insert("end".into(), self.end.map_or(Value::Null, Value::from));
        merge(self.extra, own)
    }
}

/// Millisecond epoch scaled to nanoseconds; sub-millisecond precision is
/// intentionally not carried.
fn epoch_nanos(dt: DateTime<Utc>) -> i64 {
    dt.timestamp_millis().saturating_mul(1_000_000)
}
