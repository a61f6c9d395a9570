//! Manual motor starter selection
//!
//! Two independent strategies are kept side by side:
//! - by rating: smallest fixed rating at or above the load current
//! - by range: adjustable current range containing the (ambient-adjusted) load
//!
//! They can disagree for the same load. Workspace records use the rating form,
//! the MMS detail view uses the range form.

use super::first_fit;
use crate::tables::{reference_tables, MmsRange};

const MMS_DERATING: f64 = 1.2;
const MMS_DERATING_AMBIENT_C: f64 = 40.0;

/// Smallest MMS rating at or above the load; `None` above 63 A
pub fn select_mms_by_rating(load_current_amps: f64) -> Option<f64> {
    first_fit(&reference_tables().mms_ratings, load_current_amps, |r| r)
}

/// Load current after the ambient multiplier (1.2 from 40 °C upwards)
pub fn mms_adjusted_current(load_current_amps: f64, ambient_temp_celsius: f64) -> f64 {
    if ambient_temp_celsius >= MMS_DERATING_AMBIENT_C {
        load_current_amps * MMS_DERATING
    } else {
        load_current_amps
    }
}

/// MMS current range containing the adjusted load
///
/// Shared boundaries resolve to the lower range. Currents below the first
/// range clamp to it; currents above the last range give `None`.
pub fn select_mms_by_range(load_current_amps: f64, ambient_temp_celsius: f64) -> Option<MmsRange> {
    let adjusted = mms_adjusted_current(load_current_amps, ambient_temp_celsius);
    let ranges = &reference_tables().mms_ranges;
    let first = ranges.first()?;

    if adjusted < first.lower {
        return Some(*first);
    }

    ranges.iter().copied().find(|r| r.contains(adjusted))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds(r: Option<MmsRange>) -> Option<(f64, f64)> {
        r.map(|r| (r.lower, r.upper))
    }

    #[test]
    fn test_rating_first_fit() {
        assert_eq!(select_mms_by_rating(6.3), Some(6.3));
        assert_eq!(select_mms_by_rating(6.31), Some(10.0));
        assert_eq!(select_mms_by_rating(20.0), Some(25.0));
        assert_eq!(select_mms_by_rating(0.2), Some(6.3));
        assert_eq!(select_mms_by_rating(63.5), None);
    }

    #[test]
    fn test_range_scenario() {
        assert_eq!(bounds(select_mms_by_range(20.0, 30.0)), Some((16.0, 20.0)));
    }

    #[test]
    fn test_shared_boundary_prefers_lower_range() {
        assert_eq!(bounds(select_mms_by_range(1.0, 25.0)), Some((0.63, 1.0)));
        assert_eq!(bounds(select_mms_by_range(16.0, 25.0)), Some((10.0, 16.0)));
    }

    #[test]
    fn test_ambient_multiplier() {
        // 20 × 1.2 = 24
        assert_eq!(bounds(select_mms_by_range(20.0, 40.0)), Some((20.0, 25.0)));
        assert_eq!(mms_adjusted_current(10.0, 39.0), 10.0);
    }

    #[test]
    fn test_clamps_below_first_range() {
        assert_eq!(bounds(select_mms_by_range(0.1, 25.0)), Some((0.4, 0.63)));
        assert_eq!(bounds(select_mms_by_range(0.0, 25.0)), Some((0.4, 0.63)));
        assert_eq!(bounds(select_mms_by_range(-2.0, 25.0)), Some((0.4, 0.63)));
    }

    #[test]
    fn test_not_found_above_last_range() {
        assert_eq!(bounds(select_mms_by_range(54.0, 25.0)), Some((42.0, 54.0)));
        assert!(select_mms_by_range(54.01, 25.0).is_none());
        // 46 × 1.2 = 55.2
        assert!(select_mms_by_range(46.0, 45.0).is_none());
        assert!(select_mms_by_range(f64::NAN, 25.0).is_none());
    }

    #[test]
    fn test_strategies_can_disagree() {
        // rating picks 25 A, range picks 16-20 A
        assert_eq!(select_mms_by_rating(20.0), Some(25.0));
        assert_eq!(bounds(select_mms_by_range(20.0, 30.0)), Some((16.0, 20.0)));
    }
}
