//! Seat identity rules.
//!
//! A seat is identified by `(auditorium, row, number)`. Rows are
//! case-normalized so "a" and "A" name the same physical row.

use crate::error::CoreError;

/// Maximum length of a row label after normalization.
pub const MAX_ROW_LENGTH: usize = 10;

/// Trim and upper-case a row label.
pub fn normalize_row(row: &str) -> String {
    row.trim().to_uppercase()
}

/// Validate a row label, returning its normalized form.
pub fn validate_row(row: &str) -> Result<String, CoreError> {
    let normalized = normalize_row(row);
    if normalized.is_empty() {
        return Err(CoreError::Validation("Row cannot be empty".into()));
    }
    if normalized.len() > MAX_ROW_LENGTH {
        return Err(CoreError::Validation(format!(
            "Row exceeds maximum length of {MAX_ROW_LENGTH} characters"
        )));
    }
    Ok(normalized)
}

/// Validate a seat number within its row.
pub fn validate_number(number: i32) -> Result<(), CoreError> {
    if number <= 0 {
        return Err(CoreError::Validation(
            "Seat number must be greater than zero".into(),
        ));
    }
    Ok(())
}

/// Human-readable seat label, e.g. `A12`. Used in conflict messages.
pub fn display_string(row: &str, number: i32) -> String {
    format!("{row}{number}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_are_trimmed_and_upper_cased() {
        assert_eq!(normalize_row("  a "), "A");
        assert_eq!(validate_row(" b").unwrap(), "B");
        assert_eq!(validate_row("AA").unwrap(), "AA");
    }

    #[test]
    fn blank_row_rejected() {
        assert!(validate_row("").is_err());
        assert!(validate_row("   ").is_err());
    }

    #[test]
    fn overlong_row_rejected() {
        assert!(validate_row("ABCDEFGHIJK").is_err());
        assert!(validate_row("ABCDEFGHIJ").is_ok());
    }

    #[test]
    fn seat_number_must_be_positive() {
        assert!(validate_number(1).is_ok());
        assert!(validate_number(0).is_err());
        assert!(validate_number(-3).is_err());
    }

    #[test]
    fn display_string_concatenates_row_and_number() {
        assert_eq!(display_string("A", 12), "A12");
        assert_eq!(display_string("AA", 1), "AA1");
    }
}
