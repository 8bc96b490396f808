//! Repository trait definitions for data access abstraction.
//!
//! These traits are the storage collaborator contract: key lookup,
//! predicate scans, insert, update-by-key and delete-by-key. All
//! operations are async and report collaborator failures as
//! [`OrgMapError::StorageFault`](crate::error::OrgMapError::StorageFault).
//!
//! Implementations are expected to enforce name uniqueness with a
//! storage-level constraint and report a violation as
//! [`OrgMapError::Conflict`](crate::error::OrgMapError::Conflict), so that
//! two concurrent writers racing past the same pre-check cannot both win.

use uuid::Uuid;

use crate::error::OrgMapResult;
use crate::models::{
    organization::{CreateOrganization, Organization, UpdateOrganization},
    site::{CreateSite, Site, UpdateSite},
};

// ---------------------------------------------------------------------------
// Organizations
// ---------------------------------------------------------------------------

pub trait OrganizationRepository: Send + Sync {
    fn create(
        &self,
        input: CreateOrganization,
    ) -> impl Future<Output = OrgMapResult<Organization>> + Send;
    fn get_by_id(&self, id: Uuid) -> impl Future<Output = OrgMapResult<Organization>> + Send;
    fn find_by_name(
        &self,
        name: &str,
    ) -> impl Future<Output = OrgMapResult<Option<Organization>>> + Send;
    /// Apply the present fields; returns the number of records touched.
    fn update(
        &self,
        id: Uuid,
        input: UpdateOrganization,
    ) -> impl Future<Output = OrgMapResult<u64>> + Send;
    /// Returns the number of records removed.
    fn delete(&self, id: Uuid) -> impl Future<Output = OrgMapResult<u64>> + Send;
    fn list(&self) -> impl Future<Output = OrgMapResult<Vec<Organization>>> + Send;

    /// Get direct children of an organization.
    fn list_children(
        &self,
        parent_id: Uuid,
    ) -> impl Future<Output = OrgMapResult<Vec<Organization>>> + Send;
}

// ---------------------------------------------------------------------------
// Sites
// ---------------------------------------------------------------------------

pub trait SiteRepository: Send + Sync {
    fn create(&self, input: CreateSite) -> impl Future<Output = OrgMapResult<Site>> + Send;
    fn get_by_id(&self, id: Uuid) -> impl Future<Output = OrgMapResult<Site>> + Send;
    fn find_by_organization_and_name(
        &self,
        organization_id: Uuid,
        name: &str,
    ) -> impl Future<Output = OrgMapResult<Option<Site>>> + Send;
    fn update(&self, id: Uuid, input: UpdateSite)
    -> impl Future<Output = OrgMapResult<u64>> + Send;
    fn delete(&self, id: Uuid) -> impl Future<Output = OrgMapResult<u64>> + Send;
    fn list(&self) -> impl Future<Output = OrgMapResult<Vec<Site>>> + Send;

    /// Get all sites owned directly by an organization.
    fn list_by_organization(
        &self,
        organization_id: Uuid,
    ) -> impl Future<Output = OrgMapResult<Vec<Site>>> + Send;
}
