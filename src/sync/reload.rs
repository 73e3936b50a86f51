//! Force-reload signal.

use serde_json::{Map, Value};
use std::fmt::Debug;
use tracing::debug;
use uuid::Uuid;

use crate::params::ExtraParams;

pub const FORCE_PARAM: &str = "$force";

/// Asks data consumers to refetch.
pub trait ReloadSignal: Debug {
    /// Fire a reload.
    fn trigger(&mut self);

    /// Parameters to merge into outgoing backend requests.
    fn current_params(&self) -> ExtraParams;
}

/// Reload signal carrying a fresh random token per trigger, so repeated
/// requests for the same range are not served from a cache.
#[derive(Debug, Default, Clone)]
pub struct ForceReload {
    token: Option<Uuid>,
    triggered: u64,
}

impl ForceReload {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn token(&self) -> Option<Uuid> {
        self.token
    }

    /// Number of times [`ReloadSignal::trigger`] has fired.
    pub fn triggered(&self) -> u64 {
        self.triggered
    }
}

impl ReloadSignal for ForceReload {
    fn trigger(&mut self) {
        let token = Uuid::new_v4();
        self.token = Some(token);
        self.triggered += 1;
        debug!(%token, count = self.triggered, "force reload");
    }

    fn current_params(&self) -> ExtraParams {
        let mut params = Map::new();
        if let Some(token) = self.token {
            params.insert(FORCE_PARAM.into(), Value::String(token.to_string()));
        }
        params
    }
}
