//! SurrealDB repository implementations.

mod organization;
mod site;

pub use organization::SurrealOrganizationRepository;
pub use site::SurrealSiteRepository;

use uuid::Uuid;

use crate::error::DbError;

/// Parse a UUID stored as a string column.
pub(crate) fn parse_uuid(field: &str, raw: &str) -> Result<Uuid, DbError> {
    Uuid::parse_str(raw).map_err(|e| DbError::Decode(format!("invalid {field} UUID: {e}")))
}
