//! Movie field rules.
//!
//! A movie has no lifecycle beyond its active flag, but its fields are
//! guarded on both create and update: an update that *supplies* a blank or
//! non-positive value is rejected outright rather than silently ignored.

use rust_decimal::Decimal;

use crate::error::CoreError;

/// Validate a required text field, returning its trimmed form.
pub fn validate_text(field: &'static str, value: &str) -> Result<String, CoreError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(format!("{field} cannot be empty")));
    }
    Ok(trimmed.to_string())
}

/// Validate a movie runtime in minutes.
pub fn validate_duration(duration_minutes: i32) -> Result<(), CoreError> {
    if duration_minutes <= 0 {
        return Err(CoreError::Validation(
            "Duration must be greater than zero".into(),
        ));
    }
    Ok(())
}

/// Validate a default ticket price.
pub fn validate_ticket_price(ticket_price: Decimal) -> Result<(), CoreError> {
    if ticket_price <= Decimal::ZERO {
        return Err(CoreError::Validation(
            "Ticket price must be greater than zero".into(),
        ));
    }
    Ok(())
}
