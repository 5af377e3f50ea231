use thiserror::Error;

/// Validation errors raised by the domain layer before any I/O happens
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid id {0}: must be a positive value")]
    InvalidId(i64),

    #[error("{field} must not be empty")]
    EmptyField { field: String },
}

impl CoreError {
    /// Create a new InvalidId error
    pub fn invalid_id(id: i64) -> Self {
        Self::InvalidId(id)
    }

    /// Create a new EmptyField error
    pub fn empty_field(field: impl Into<String>) -> Self {
        Self::EmptyField {
            field: field.into(),
        }
    }
}

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, CoreError>;

/// Fail with [`CoreError::EmptyField`] when a required string is empty or
/// whitespace-only.
pub fn require_non_empty(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(CoreError::empty_field(field));
    }
    Ok(())
}
