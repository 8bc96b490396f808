//! Error types for the organization/site registry.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum OrgMapError {
    /// Malformed caller input: coordinates, radius, empty names.
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },

    /// Uniqueness or acyclicity violation. State is left unchanged.
    #[error("Conflict on {entity}: {reason}")]
    Conflict { entity: String, reason: String },

    /// Failure reported by the storage collaborator.
    #[error("Storage fault: {0}")]
    StorageFault(String),
}

impl OrgMapError {
    /// `true` for the kinds caused by the caller's request.
    ///
    /// Only [`OrgMapError::StorageFault`] is worth retrying, and the
    /// decision to do so belongs to the caller.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, OrgMapError::StorageFault(_))
    }
}

pub type OrgMapResult<T> = Result<T, OrgMapError>;
