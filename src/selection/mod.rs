//! Selection Engine
//!
//! One selector per component class. Every selector is a pure function of the
//! load current (A) and, where the rating depends on it, the ambient
//! temperature (°C). Results come from the shared tables in `crate::tables`.
//!
//! A selector that finds nothing returns `None` (rendered `N/A`); that is an
//! ordinary outcome, not an error. Inputs are not validated here, see
//! `crate::input` for the boundary check.

pub mod mca;
pub mod cable;
pub mod contactor;
pub mod breaker;
pub mod vfd;
pub mod mms;
pub mod report;

pub use mca::{ambient_temp_constant, calculate_mca, SAFETY_FACTOR};
pub use cable::select_cable;
pub use contactor::{select_contactor, contactor_min_rating};
pub use breaker::{select_breakers, breaker_window, BreakerList};
pub use vfd::{select_vfd, vfd_target_current, Vfd};
pub use mms::{select_mms_by_rating, select_mms_by_range, mms_adjusted_current};
pub use report::{select_batch, SelectionReport};

use serde::{Deserialize, Serialize};

/// Load and ambient conditions for one motor/compressor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SelectionInput {
    pub load_current_amps: f64,
    pub ambient_temp_celsius: f64,
}

impl SelectionInput {
    pub fn new(load_current_amps: f64, ambient_temp_celsius: f64) -> Self {
        Self { load_current_amps, ambient_temp_celsius }
    }
}

/// First entry of an ascending table that is at least `target`
///
/// NaN targets never match.
pub(crate) fn first_fit<T: Copy>(table: &[T], target: f64, key: impl Fn(T) -> f64) -> Option<T> {
    table.iter().copied().find(|&entry| key(entry) >= target)
}
