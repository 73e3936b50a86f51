//! Bridge between a range and the page's URL query string.

use tracing::trace;

use crate::params::QueryParams;

/// Two-way access to the host's URL query.
pub trait QuerySync {
    /// Current query parameters, used once to hydrate state.
    fn query(&self) -> QueryParams;

    /// Write the range parameters back. Implementations decide how to
    /// combine them with unrelated keys.
    fn replace(&mut self, params: QueryParams);
}

/// In-memory query string, for hosts without a router and for tests.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UrlQuery {
    params: QueryParams,
    writes: u64,
}

impl UrlQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn parse(query: &str) -> Self {
        Self {
            params: QueryParams::from_query_string(query),
            writes: 0,
        }
    }

    pub fn params(&self) -> &QueryParams {
        &self.params
    }

    pub fn as_query_string(&self) -> String {
        self.params.to_query_string()
    }

    /// Number of writes received through [`QuerySync::replace`].
    pub fn writes(&self) -> u64 {
        self.writes
    }
}

impl QuerySync for UrlQuery {
    fn query(&self) -> QueryParams {
        self.params.clone()
    }

    fn replace(&mut self, params: QueryParams) {
        self.params.apply_range(&params);
        self.writes += 1;
        trace!(query = %self.params.to_query_string(), "url query updated");
    }
}
