//! Auditorium field rules.

use crate::error::CoreError;

/// Validate an auditorium name, returning its trimmed form.
pub fn validate_name(name: &str) -> Result<String, CoreError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation("Name cannot be empty".into()));
    }
    Ok(trimmed.to_string())
}

/// Validate an auditorium capacity.
pub fn validate_capacity(capacity: i32) -> Result<(), CoreError> {
    if capacity <= 0 {
        return Err(CoreError::Validation(
            "Capacity must be greater than zero".into(),
        ));
    }
    Ok(())
}
