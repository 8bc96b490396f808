//! Site domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::organization::Organization;

/// A geo-located record owned by exactly one organization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Site {
    pub id: Uuid,
    /// The owning organization.
    pub organization_id: Uuid,
    /// Display name, unique within the owning organization.
    pub name: String,
    /// Degrees, `-90.0..=90.0`.
    pub latitude: f64,
    /// Degrees, `-180.0..=180.0`.
    pub longitude: f64,
    pub address: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields required to create a new site.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSite {
    pub organization_id: Uuid,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub address: Option<String>,
}

/// Fields that can be updated on an existing site.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UpdateSite {
    pub organization_id: Option<Uuid>,
    pub name: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub address: Option<String>,
}

/// A site paired with its owning organization for display.
///
/// `organization` is `None` only when the reference dangles.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolvedSite {
    pub site: Site,
    pub organization: Option<Organization>,
}

/// A proximity search hit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NearbySite {
    pub site: Site,
    /// Great-circle distance from the query point in kilometres.
    pub distance_km: f64,
}
