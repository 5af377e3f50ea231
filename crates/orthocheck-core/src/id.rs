use crate::error::{CoreError, Result};

/// Store identifiers are positive integers assigned on first save.
///
/// Zero and negative values can never refer to a persisted row, so they are
/// rejected before any cache or store access.
pub fn validate_id(id: i64) -> Result<()> {
    if id <= 0 {
        return Err(CoreError::invalid_id(id));
    }
    Ok(())
}
