//! Input validation for entity payloads.

/// Minimum number of characters (after trimming) in an entity name.
pub const MIN_NAME_LENGTH: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    #[error("{field} cannot be empty or contain only whitespace")]
    Empty { field: &'static str },

    #[error("{field} must be at least {min} characters (got {found})")]
    TooShort {
        field: &'static str,
        min: usize,
        found: usize,
    },
}

/// Validate a name-like field.
///
/// Length is counted in characters, not bytes, after surrounding whitespace
/// has been trimmed.
pub fn validate_name(field: &'static str, value: &str) -> Result<(), FieldError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(FieldError::Empty { field });
    }
    let found = trimmed.chars().count();
    if found < MIN_NAME_LENGTH {
        return Err(FieldError::TooShort {
            field,
            min: MIN_NAME_LENGTH,
            found,
        });
    }
    Ok(())
}
