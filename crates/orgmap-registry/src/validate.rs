//! Input checks shared by the components.

use orgmap_core::error::{OrgMapError, OrgMapResult};

/// Trim a display name and reject it if nothing is left.
pub(crate) fn require_name(entity: &str, name: &str) -> OrgMapResult<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(OrgMapError::InvalidInput {
            message: format!("{entity} name must not be empty"),
        });
    }
    Ok(trimmed.to_string())
}
