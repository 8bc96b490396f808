//! Database-specific error types and conversions.

use orgmap_core::error::OrgMapError;

/// Database-layer error type.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("SurrealDB error: {0}")]
    Surreal(#[from] surrealdb::Error),

    #[error("Migration failed: {0}")]
    Migration(String),

    #[error("Malformed record: {0}")]
    Decode(String),

    #[error("Record not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },

    #[error("Unique constraint violated on {entity}: {detail}")]
    UniqueViolation { entity: String, detail: String },
}

impl DbError {
    /// Classify a failed statement reported by `Response::check`.
    ///
    /// Unique-index violations become [`DbError::UniqueViolation`] so the
    /// caller sees a conflict rather than an opaque storage fault.
    pub(crate) fn from_statement(entity: &str, err: surrealdb::Error) -> Self {
        let message = err.to_string();
        if is_unique_violation(&message) {
            DbError::UniqueViolation {
                entity: entity.into(),
                detail: message,
            }
        } else {
            DbError::Surreal(err)
        }
    }
}

fn is_unique_violation(message: &str) -> bool {
    message.contains("already contains")
}

impl From<DbError> for OrgMapError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => OrgMapError::NotFound { entity, id },
            DbError::UniqueViolation { entity, detail } => OrgMapError::Conflict {
                entity,
                reason: detail,
            },
            other => OrgMapError::StorageFault(other.to_string()),
        }
    }
}
