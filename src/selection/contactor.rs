//! Contactor selection

use super::first_fit;
use crate::tables::reference_tables;

const CONTACTOR_MARGIN: f64 = 1.1;

/// Minimum contactor rating for a load (110 % of load current)
pub fn contactor_min_rating(load_current_amps: f64) -> f64 {
    CONTACTOR_MARGIN * load_current_amps
}

/// Smallest contactor rated at least 1.1 × load; `None` above 96 A
pub fn select_contactor(load_current_amps: f64) -> Option<u32> {
    first_fit(
        &reference_tables().contactors,
        contactor_min_rating(load_current_amps),
        f64::from,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_margin_applied() {
        // 1.1 × 20 = 22 -> 30
        assert_eq!(select_contactor(20.0), Some(30));
        // 1.1 × 10 = 11 -> 12
        assert_eq!(select_contactor(10.0), Some(12));
    }

    #[test]
    fn test_largest_contactor_limit() {
        // 1.1 × 87 = 95.7
        assert_eq!(select_contactor(87.0), Some(96));
        // 1.1 × 88 = 96.8
        assert_eq!(select_contactor(88.0), None);
        assert_eq!(select_contactor(100.0), None);
    }
}
