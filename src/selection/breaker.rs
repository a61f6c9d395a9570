//! Circuit breaker selection
//!
//! Range selector: every MCB/MCCB rating strictly inside
//! (1.75 × load, 2.25 × load) is suitable. An empty list is a normal result.

use crate::tables::reference_tables;
use smallvec::SmallVec;

const LOWER_MULTIPLIER: f64 = 1.75;
const UPPER_MULTIPLIER: f64 = 2.25;

/// Suitable breaker ratings, ascending
pub type BreakerList = SmallVec<[u32; 4]>;

/// Open interval (min, max) a breaker rating must fall inside
pub fn breaker_window(load_current_amps: f64) -> (f64, f64) {
    (LOWER_MULTIPLIER * load_current_amps, UPPER_MULTIPLIER * load_current_amps)
}

/// All breaker ratings strictly between 1.75 × load and 2.25 × load
pub fn select_breakers(load_current_amps: f64) -> BreakerList {
    let (min, max) = breaker_window(load_current_amps);
    reference_tables()
        .breakers
        .iter()
        .copied()
        .filter(|&rating| {
            let rating = f64::from(rating);
            min < rating && rating < max
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_match() {
        // (35, 45)
        assert_eq!(select_breakers(20.0).as_slice(), &[40]);
    }

    #[test]
    fn test_window_scales_with_load() {
        // (5.25, 6.75)
        assert_eq!(select_breakers(3.0).as_slice(), &[6]);
        // (14, 18)
        assert_eq!(select_breakers(8.0).as_slice(), &[16]);
        // (17.5, 22.5)
        assert_eq!(select_breakers(10.0).as_slice(), &[20]);
        // (28, 36)
        assert_eq!(select_breakers(16.0).as_slice(), &[32]);
    }

    #[test]
    fn test_multiple_matches_ascending() {
        // (61.25, 78.75) spans the MCB/MCCB boundary
        assert_eq!(select_breakers(35.0).as_slice(), &[63, 70]);
        // (43.75, 56.25)
        assert_eq!(select_breakers(25.0).as_slice(), &[50]);
        // (105, 135)
        assert_eq!(select_breakers(60.0).as_slice(), &[125]);
    }

    #[test]
    fn test_exclusive_bounds() {
        // 1.75 × 40 = 70 exactly, so 70 is excluded; 2.25 × 40 = 90 excluded too
        let selected = select_breakers(40.0);
        assert!(!selected.contains(&70));
        assert!(!selected.contains(&90));
    }

    #[test]
    fn test_small_load_has_empty_window() {
        assert!(select_breakers(1.0).is_empty());
        assert!(select_breakers(0.0).is_empty());
    }

    #[test]
    fn test_mccb_range() {
        // (175, 225)
        assert_eq!(select_breakers(100.0).as_slice(), &[200]);
    }
}
