//! Field value rules
//!
//! Rules are evaluated in order and the first failure wins:
//! 1. required and empty
//! 2. formula field with a value that fails [`is_valid_formula`]
//! 3. numeric field with a value that is not a finite number above zero

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::formula::is_valid_formula;
use crate::types::FieldKind;

/// Why a field value was rejected
///
/// The display text is the exact message shown next to the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldError {
    #[error("This field is required.")]
    Required,

    #[error("Please enter a valid chemical formula (e.g., H2SO4, Ca(OH)2).")]
    InvalidFormula,

    #[error("Please enter a positive number.")]
    NotPositive,
}

/// Check a field value against the rules for its kind.
pub fn check_field_value(kind: FieldKind, required: bool, value: &str) -> Result<(), FieldError> {
    let value = value.trim();

    if value.is_empty() {
        return if required {
            Err(FieldError::Required)
        } else {
            Ok(())
        };
    }

    match kind {
        FieldKind::Formula if !is_valid_formula(value) => Err(FieldError::InvalidFormula),
        FieldKind::Numeric if !is_positive_number(value) => Err(FieldError::NotPositive),
        _ => Ok(()),
    }
}

/// Strict decimal parse: the whole value must be a finite number above zero.
fn is_positive_number(value: &str) -> bool {
    value
        .parse::<f64>()
        .map(|n| n.is_finite() && n > 0.0)
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_empty_fails_first() {
        assert_eq!(
            check_field_value(FieldKind::Formula, true, ""),
            Err(FieldError::Required)
        );
        assert_eq!(
            check_field_value(FieldKind::Numeric, true, "   "),
            Err(FieldError::Required)
        );
    }

    #[test]
    fn test_optional_empty_passes() {
        assert_eq!(check_field_value(FieldKind::Numeric, false, ""), Ok(()));
        assert_eq!(check_field_value(FieldKind::Formula, false, " "), Ok(()));
    }

    #[test]
    fn test_formula_rule() {
        assert_eq!(check_field_value(FieldKind::Formula, true, "Ca(OH)2"), Ok(()));
        assert_eq!(
            check_field_value(FieldKind::Formula, true, "Ca(OH"),
            Err(FieldError::InvalidFormula)
        );
    }

    #[test]
    fn test_formula_value_is_trimmed() {
        assert_eq!(check_field_value(FieldKind::Formula, true, "  NaCl "), Ok(()));
    }

    #[test]
    fn test_numeric_rule() {
        assert_eq!(check_field_value(FieldKind::Numeric, true, "3.5"), Ok(()));
        assert_eq!(
            check_field_value(FieldKind::Numeric, true, "-5"),
            Err(FieldError::NotPositive)
        );
        assert_eq!(
            check_field_value(FieldKind::Numeric, true, "abc"),
            Err(FieldError::NotPositive)
        );
        assert_eq!(
            check_field_value(FieldKind::Numeric, true, "0"),
            Err(FieldError::NotPositive)
        );
    }

    #[test]
    fn test_numeric_rule_rejects_non_finite_and_trailing_garbage() {
        assert_eq!(
            check_field_value(FieldKind::Numeric, true, "inf"),
            Err(FieldError::NotPositive)
        );
        assert_eq!(
            check_field_value(FieldKind::Numeric, true, "NaN"),
            Err(FieldError::NotPositive)
        );
        assert_eq!(
            check_field_value(FieldKind::Numeric, true, "3g"),
            Err(FieldError::NotPositive)
        );
    }

    #[test]
    fn test_plain_field_accepts_anything_non_empty() {
        assert_eq!(check_field_value(FieldKind::Plain, true, "!!"), Ok(()));
    }

    #[test]
    fn test_messages() {
        assert_eq!(FieldError::Required.to_string(), "This field is required.");
        assert_eq!(
            FieldError::InvalidFormula.to_string(),
            "Please enter a valid chemical formula (e.g., H2SO4, Ca(OH)2)."
        );
        assert_eq!(
            FieldError::NotPositive.to_string(),
            "Please enter a positive number."
        );
    }
}
