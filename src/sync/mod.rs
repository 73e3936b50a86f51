//! Collaborators the controller talks to: the reload signal and the URL
//! query bridge.

mod query;
mod reload;

pub use query::{QuerySync, UrlQuery};
pub use reload::{ForceReload, ReloadSignal, FORCE_PARAM};
