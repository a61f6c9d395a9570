//! Cable gauge selection by minimum cable ampacity

use super::first_fit;
use crate::tables::{reference_tables, CableEntry};

/// Smallest cable whose rated ampacity covers `mca`
///
/// Exact equality counts as a match. `None` above 225 A.
pub fn select_cable(mca: f64) -> Option<CableEntry> {
    first_fit(&reference_tables().cables, mca, |c| f64::from(c.ampacity))
}
