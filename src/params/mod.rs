//! Encodings of a range for the URL and the query backends.
//!
//! - `QueryParams`: the page's URL query string (`time_gte`, `time_dur`)
//! - `AxiosParams`: ISO-8601 bounds for the API backend
//! - `LokiParams`: nanosecond-epoch bounds for the log backend

mod backend;
pub mod error;
mod query;

pub use backend::{merge, AxiosParams, ExtraParams, LokiParams};
pub use error::ParamError;
pub use query::{QueryParams, TIME_DUR, TIME_GTE};

pub(crate) use query::parse_leading_int;
