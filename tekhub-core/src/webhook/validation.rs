//! Field validation for webhook and secret names

use crate::error::ValidationError;

/// Maximum length of a Kubernetes object name
pub const MAX_NAME_LEN: usize = 253;

/// Validate a webhook name
///
/// Names end up as Kubernetes object names: at most 253 characters of
/// lowercase alphanumerics, `.` and `-`.
pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.is_empty() {
        return Err(ValidationError::Required("name"));
    }

    if name.len() > MAX_NAME_LEN {
        return Err(ValidationError::NameTooLong);
    }

    if !name
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '.' || c == '-')
    {
        return Err(ValidationError::NamePattern);
    }

    Ok(())
}
