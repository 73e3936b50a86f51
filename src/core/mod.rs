//! Core range types and logic.
//!
//! This module contains the side-effect-free pieces the controller is
//! assembled from:
//! - The `TimeRange` value and its derived bounds
//! - Date utilities and clock sources
//! - The single-deadline live timer
//! - Navigation guard predicates
//! - Change notification

pub mod clock;
pub mod date;
pub mod guard;
mod observe;
mod range;
mod timer;

pub use clock::{Clock, ManualClock, SystemClock};
pub use date::{DAY, HOUR, MINUTE, SECOND};
pub use observe::{Field, Observers};
pub use range::{TimeRange, MAX_DURATION};
pub use timer::LiveTimer;
