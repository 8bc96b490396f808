//! Hierarchy store: organization CRUD with tree invariants.
//!
//! Invariants held on every write:
//! - organization names are globally unique;
//! - a parent reference resolves to an existing organization when set;
//! - the parent graph stays acyclic.
//!
//! Organizations that still own child organizations or sites cannot be
//! deleted; the attempt is a [`OrgMapError::Conflict`] and leaves state
//! unchanged.

use std::collections::HashSet;

use orgmap_core::error::{OrgMapError, OrgMapResult};
use orgmap_core::models::hierarchy::{OrganizationDetail, OrganizationWithSites};
use orgmap_core::models::organization::{CreateOrganization, Organization, UpdateOrganization};
use orgmap_core::repository::{OrganizationRepository, SiteRepository};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::validate::require_name;

const ENTITY: &str = "organization";

/// Organization CRUD service.
///
/// Holds a site repository only to enforce the deletion policy and to
/// build [`OrganizationDetail`] views.
pub struct HierarchyStore<O: OrganizationRepository, S: SiteRepository> {
    organizations: O,
    sites: S,
}

impl<O: OrganizationRepository, S: SiteRepository> HierarchyStore<O, S> {
    pub fn new(organizations: O, sites: S) -> Self {
        Self {
            organizations,
            sites,
        }
    }

    /// All organizations, no relations resolved.
    pub async fn list(&self) -> OrgMapResult<Vec<Organization>> {
        let organizations = self.organizations.list().await?;
        debug!(count = organizations.len(), "listed organizations");
        Ok(organizations)
    }

    pub async fn get(&self, id: Uuid) -> OrgMapResult<Organization> {
        self.organizations.get_by_id(id).await
    }

    /// The organization with its own sites and its direct children,
    /// each child carrying its own sites.
    pub async fn get_detail(&self, id: Uuid) -> OrgMapResult<OrganizationDetail> {
        let organization = self.organizations.get_by_id(id).await?;
        let sites = self.sites.list_by_organization(id).await?;

        let mut children = Vec::new();
        for child in self.organizations.list_children(id).await? {
            let child_sites = self.sites.list_by_organization(child.id).await?;
            children.push(OrganizationWithSites {
                organization: child,
                sites: child_sites,
            });
        }

        Ok(OrganizationDetail {
            organization,
            sites,
            children,
        })
    }

    pub async fn create(&self, input: CreateOrganization) -> OrgMapResult<Organization> {
        let name = require_name(ENTITY, &input.name)?;

        if self.organizations.find_by_name(&name).await?.is_some() {
            return Err(OrgMapError::Conflict {
                entity: ENTITY.into(),
                reason: format!("an organization named '{name}' already exists"),
            });
        }

        if let Some(parent_id) = input.parent_id {
            self.organizations.get_by_id(parent_id).await?;
        }

        let organization = self
            .organizations
            .create(CreateOrganization {
                name,
                parent_id: input.parent_id,
            })
            .await?;

        info!(
            organization_id = %organization.id,
            parent_id = ?organization.parent_id,
            "organization created"
        );
        Ok(organization)
    }

    /// Apply the present fields of `patch`. Returns the number of
    /// records affected (0 or 1).
    pub async fn update(&self, id: Uuid, patch: UpdateOrganization) -> OrgMapResult<u64> {
        let current = self.organizations.get_by_id(id).await?;

        let name = match patch.name {
            Some(ref raw) => {
                let name = require_name(ENTITY, raw)?;
                if name != current.name {
                    if let Some(other) = self.organizations.find_by_name(&name).await? {
                        if other.id != id {
                            return Err(OrgMapError::Conflict {
                                entity: ENTITY.into(),
                                reason: format!("an organization named '{name}' already exists"),
                            });
                        }
                    }
                }
                Some(name)
            }
            None => None,
        };

        if let Some(Some(new_parent)) = patch.parent_id {
            if current.parent_id != Some(new_parent) {
                self.ensure_acyclic(id, new_parent).await?;
            }
        }

        let affected = self
            .organizations
            .update(
                id,
                UpdateOrganization {
                    name,
                    parent_id: patch.parent_id,
                },
            )
            .await?;

        info!(organization_id = %id, affected, "organization updated");
        Ok(affected)
    }

    /// Remove an organization that owns no children and no sites.
    pub async fn delete(&self, id: Uuid) -> OrgMapResult<u64> {
        self.organizations.get_by_id(id).await?;

        let children = self.organizations.list_children(id).await?;
        if !children.is_empty() {
            return Err(OrgMapError::Conflict {
                entity: ENTITY.into(),
                reason: format!(
                    "organization {id} still has {} child organization(s)",
                    children.len()
                ),
            });
        }

        let sites = self.sites.list_by_organization(id).await?;
        if !sites.is_empty() {
            return Err(OrgMapError::Conflict {
                entity: ENTITY.into(),
                reason: format!("organization {id} still owns {} site(s)", sites.len()),
            });
        }

        let affected = self.organizations.delete(id).await?;
        info!(organization_id = %id, affected, "organization deleted");
        Ok(affected)
    }

    /// Reject re-parenting `id` under `new_parent` when that would close
    /// a loop: `new_parent` is `id` itself or one of its descendants.
    ///
    /// Walks the ancestor chain of `new_parent`. A loop that does not pass
    /// through `id` (written out of band) ends the walk instead of
    /// spinning on it.
    async fn ensure_acyclic(&self, id: Uuid, new_parent: Uuid) -> OrgMapResult<()> {
        if new_parent == id {
            return Err(OrgMapError::Conflict {
                entity: ENTITY.into(),
                reason: format!("organization {id} cannot be its own parent"),
            });
        }

        // The new parent must exist; NotFound propagates from here.
        let parent = self.organizations.get_by_id(new_parent).await?;

        let mut visited = HashSet::from([new_parent]);
        let mut cursor = parent.parent_id;

        while let Some(ancestor) = cursor {
            if ancestor == id {
                return Err(OrgMapError::Conflict {
                    entity: ENTITY.into(),
                    reason: format!(
                        "organization {new_parent} is a descendant of {id}; \
                         re-parenting would create a cycle"
                    ),
                });
            }
            if !visited.insert(ancestor) {
                warn!(
                    organization_id = %ancestor,
                    "ancestor chain already contains a cycle"
                );
                break;
            }
            cursor = match self.organizations.get_by_id(ancestor).await {
                Ok(org) => org.parent_id,
                Err(OrgMapError::NotFound { .. }) => {
                    warn!(organization_id = %ancestor, "dangling parent reference");
                    None
                }
                Err(e) => return Err(e),
            };
        }

        Ok(())
    }
}
