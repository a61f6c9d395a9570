// Property tests for the selectors
//
// Run with: cargo test --test selection_properties

use component_selector::reference_tables;
use component_selector::selection::{
    ambient_temp_constant, breaker_window, calculate_mca, mms_adjusted_current, select_breakers,
    select_cable, select_contactor, select_mms_by_range, select_mms_by_rating, select_vfd,
    vfd_target_current,
};
use proptest::prelude::*;

proptest! {
    #[test]
    fn ambient_constant_is_a_step(ambient in -40.0f64..120.0) {
        let expected = if ambient < 50.0 { 0.82 } else { 0.76 };
        prop_assert_eq!(ambient_temp_constant(ambient), expected);
    }

    #[test]
    fn mca_increases_with_load(load in 0.0f64..500.0, delta in 0.01f64..50.0, ambient in -10.0f64..80.0) {
        prop_assert!(calculate_mca(load + delta, ambient) > calculate_mca(load, ambient));
    }

    #[test]
    fn mca_higher_when_hot(load in 0.01f64..500.0, cool in -10.0f64..49.9, hot in 50.0f64..90.0) {
        prop_assert!(calculate_mca(load, hot) > calculate_mca(load, cool));
    }

    #[test]
    fn cable_selection_is_monotonic(a in 0.0f64..250.0, b in 0.0f64..250.0) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        match (select_cable(lo), select_cable(hi)) {
            (Some(x), Some(y)) => prop_assert!(x.ampacity <= y.ampacity),
            (None, Some(_)) => prop_assert!(false, "smaller MCA found no cable"),
            _ => {}
        }
    }

    #[test]
    fn selected_cable_carries_the_mca(mca in 0.0f64..225.0) {
        let cable = select_cable(mca).expect("within table range");
        prop_assert!(f64::from(cable.ampacity) >= mca);
        // no smaller gauge would also do
        let smaller = reference_tables()
            .cables
            .iter()
            .filter(|c| c.ampacity < cable.ampacity)
            .all(|c| f64::from(c.ampacity) < mca);
        prop_assert!(smaller);
    }

    #[test]
    fn contactor_covers_margin(load in 0.0f64..100.0) {
        match select_contactor(load) {
            Some(rating) => prop_assert!(f64::from(rating) >= 1.1 * load),
            None => prop_assert!(1.1 * load > 96.0),
        }
    }

    #[test]
    fn breakers_inside_open_window(load in 0.0f64..150.0) {
        let (min, max) = breaker_window(load);
        let breakers = select_breakers(load);
        prop_assert!(breakers.windows(2).all(|w| w[0] < w[1]));
        for rating in &breakers {
            let rating = f64::from(*rating);
            prop_assert!(min < rating && rating < max);
        }
        // and every table rating inside the window is listed
        let expected = reference_tables()
            .breakers
            .iter()
            .filter(|&&r| min < f64::from(r) && f64::from(r) < max)
            .count();
        prop_assert_eq!(breakers.len(), expected);
    }

    #[test]
    fn vfd_meets_target(load in 0.0f64..100.0, ambient in -10.0f64..70.0) {
        let target = vfd_target_current(load, ambient);
        match select_vfd(load, ambient) {
            Some(vfd) => prop_assert!(vfd.amps >= target),
            None => prop_assert!(target > 88.0),
        }
    }

    #[test]
    fn mms_rating_covers_load(load in 0.0f64..80.0) {
        match select_mms_by_rating(load) {
            Some(rating) => prop_assert!(rating >= load),
            None => prop_assert!(load > 63.0),
        }
    }

    #[test]
    fn mms_range_contains_adjusted(load in 0.4f64..60.0, ambient in -10.0f64..70.0) {
        let adjusted = mms_adjusted_current(load, ambient);
        match select_mms_by_range(load, ambient) {
            Some(range) => prop_assert!(range.lower <= adjusted && adjusted <= range.upper),
            None => prop_assert!(adjusted > 54.0),
        }
    }
}
