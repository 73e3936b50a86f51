//! Parameter error types.

use thiserror::Error;

/// Errors raised by the strict (user-facing) parsing entry points.
///
/// URL hydration never returns these; it degrades to an invalid range.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParamError {
    #[error("Invalid instant: {0:?}")]
    InvalidInstant(String),

    #[error("Invalid date, expected YYYY-MM-DD: {0:?}")]
    InvalidDate(String),

    #[error("Invalid time, expected HH:MM: {0:?}")]
    InvalidTime(String),
}
