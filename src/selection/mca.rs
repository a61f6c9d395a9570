//! Minimum Cable Ampacity (MCA)
//!
//! `MCA = 1.25 × load / k`, where `k` is a step-function ambient correction:
//! 0.82 below 50 °C and 0.76 from 50 °C upwards.

/// Continuous-load safety factor
pub const SAFETY_FACTOR: f64 = 1.25;

const AMBIENT_THRESHOLD_C: f64 = 50.0;
const CORRECTION_BELOW_THRESHOLD: f64 = 0.82;
const CORRECTION_AT_OR_ABOVE_THRESHOLD: f64 = 0.76;

/// Ambient temperature correction factor
pub fn ambient_temp_constant(ambient_temp_celsius: f64) -> f64 {
    if ambient_temp_celsius < AMBIENT_THRESHOLD_C {
        CORRECTION_BELOW_THRESHOLD
    } else {
        CORRECTION_AT_OR_ABOVE_THRESHOLD
    }
}

/// Minimum cable ampacity for a load at a given ambient temperature
///
/// No bounds checking: zero or negative loads give zero or negative results.
pub fn calculate_mca(load_current_amps: f64, ambient_temp_celsius: f64) -> f64 {
    (SAFETY_FACTOR * load_current_amps) / ambient_temp_constant(ambient_temp_celsius)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_constant_step_at_50() {
        assert_eq!(ambient_temp_constant(-20.0), 0.82);
        assert_eq!(ambient_temp_constant(49.999), 0.82);
        assert_eq!(ambient_temp_constant(50.0), 0.76);
        assert_eq!(ambient_temp_constant(75.0), 0.76);
    }

    #[test]
    fn test_mca_values() {
        assert_relative_eq!(calculate_mca(20.0, 30.0), 30.487_804_878, epsilon = 1e-6);
        assert_relative_eq!(calculate_mca(100.0, 55.0), 164.473_684_21, epsilon = 1e-6);
    }

    #[test]
    fn test_hotter_ambient_needs_more_ampacity() {
        assert!(calculate_mca(10.0, 50.0) > calculate_mca(10.0, 49.0));
    }

    #[test]
    fn test_degenerate_load() {
        assert_eq!(calculate_mca(0.0, 25.0), 0.0);
        assert!(calculate_mca(-4.0, 25.0) < 0.0);
    }
}
