//! Error types for boundary validation and form validation

use thiserror::Error;

/// A wire record that does not describe a valid domain value
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecordError {
    #[error("unknown resource kind '{0}'")]
    UnknownKind(String),

    #[error("unknown catalog tier '{0}'")]
    UnknownTier(String),

    #[error("{field} must not be empty")]
    Empty { field: &'static str },

    #[error("rating {0} is outside 0.0..=5.0")]
    RatingOutOfRange(f64),
}

/// A form field that blocks submission
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    Required(&'static str),

    #[error("name must be at most 253 characters")]
    NameTooLong,

    #[error("name may only contain lowercase letters, digits, '.' and '-'")]
    NamePattern,

    #[error("rating must be between 1 and 5")]
    RatingOutOfRange,

    #[error("a submission is already in progress")]
    InProgress,

    #[error("the webhook was already created")]
    AlreadySubmitted,
}
