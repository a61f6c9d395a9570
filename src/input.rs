//! Boundary validation for selection inputs
//!
//! Form fields arrive as optional text. Anything absent, non-numeric or
//! non-finite is rejected here so the selectors only ever see numbers. Zero and
//! negative values pass through untouched.

use thiserror::Error;

use crate::selection::SelectionInput;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum InputError {
    #[error("Missing value for {field}")]
    Missing { field: &'static str },

    #[error("Invalid number for {field}: {value:?}")]
    NotANumber { field: &'static str, value: String },

    #[error("{field} must be finite, got {value}")]
    NotFinite { field: &'static str, value: f64 },
}

/// Parse one numeric form field
pub fn parse_number(field: &'static str, raw: Option<&str>) -> Result<f64, InputError> {
    let text = raw.map(str::trim).filter(|s| !s.is_empty()).ok_or(InputError::Missing { field })?;
    let value: f64 = text.parse().map_err(|_| InputError::NotANumber {
        field,
        value: text.to_string(),
    })?;
    check_finite(field, value)
}

pub fn check_finite(field: &'static str, value: f64) -> Result<f64, InputError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(InputError::NotFinite { field, value })
    }
}

impl SelectionInput {
    /// Validated input from raw form fields
    pub fn from_fields(load: Option<&str>, ambient: Option<&str>) -> Result<Self, InputError> {
        Ok(Self::new(
            parse_number("load", load)?,
            parse_number("ambient", ambient)?,
        ))
    }

    /// Validated input from already-numeric values
    pub fn checked(load: f64, ambient: f64) -> Result<Self, InputError> {
        Ok(Self::new(check_finite("load", load)?, check_finite("ambient", ambient)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_fields() {
        let input = SelectionInput::from_fields(Some(" 20 "), Some("30.5")).unwrap();
        assert_eq!(input, SelectionInput::new(20.0, 30.5));
    }

    #[test]
    fn test_missing_fields() {
        assert_eq!(
            SelectionInput::from_fields(None, Some("30")),
            Err(InputError::Missing { field: "load" })
        );
        assert_eq!(
            SelectionInput::from_fields(Some("10"), Some("   ")),
            Err(InputError::Missing { field: "ambient" })
        );
    }

    #[test]
    fn test_non_numeric_rejected() {
        let err = SelectionInput::from_fields(Some("ten"), Some("30")).unwrap_err();
        assert!(matches!(err, InputError::NotANumber { field: "load", .. }));
    }

    #[test]
    fn test_nan_and_infinity_rejected() {
        assert!(SelectionInput::from_fields(Some("NaN"), Some("30")).is_err());
        assert!(SelectionInput::from_fields(Some("10"), Some("inf")).is_err());
        assert!(SelectionInput::checked(f64::NAN, 30.0).is_err());
    }

    #[test]
    fn test_degenerate_values_accepted() {
        assert!(SelectionInput::from_fields(Some("0"), Some("-40")).is_ok());
        assert!(SelectionInput::checked(-5.0, 0.0).is_ok());
    }
}
