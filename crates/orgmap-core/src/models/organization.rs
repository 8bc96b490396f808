//! Organization domain model.
//!
//! Organizations form a forest through their optional `parent_id`.
//! Children are never stored on the record; they are derived by
//! scanning for organizations whose parent is a given id.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A node in the ownership hierarchy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Organization {
    pub id: Uuid,
    /// Display name, unique across all organizations.
    pub name: String,
    /// `None` for a root organization.
    pub parent_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields required to create a new organization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOrganization {
    pub name: String,
    pub parent_id: Option<Uuid>,
}

/// Fields that can be updated on an existing organization.
///
/// `parent_id` is doubly optional: `None` leaves the parent untouched,
/// `Some(None)` detaches the organization into a root.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UpdateOrganization {
    pub name: Option<String>,
    pub parent_id: Option<Option<Uuid>>,
}
