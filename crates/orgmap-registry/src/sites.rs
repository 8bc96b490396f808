//! Site registry: site CRUD bound to the organization hierarchy.

use std::collections::HashMap;

use orgmap_core::error::{OrgMapError, OrgMapResult};
use orgmap_core::geo::{validate_latitude, validate_longitude};
use orgmap_core::models::site::{CreateSite, ResolvedSite, Site, UpdateSite};
use orgmap_core::repository::{OrganizationRepository, SiteRepository};
use tracing::{debug, info};
use uuid::Uuid;

use crate::validate::require_name;

const ENTITY: &str = "site";

/// Site CRUD service.
///
/// The organization repository is used for validation and display only;
/// this service never writes organizations.
pub struct SiteRegistry<S: SiteRepository, O: OrganizationRepository> {
    sites: S,
    organizations: O,
}

impl<S: SiteRepository, O: OrganizationRepository> SiteRegistry<S, O> {
    pub fn new(sites: S, organizations: O) -> Self {
        Self {
            sites,
            organizations,
        }
    }

    /// All sites, each paired with its owning organization.
    pub async fn list(&self) -> OrgMapResult<Vec<ResolvedSite>> {
        let sites = self.sites.list().await?;
        let organizations: HashMap<Uuid, _> = self
            .organizations
            .list()
            .await?
            .into_iter()
            .map(|o| (o.id, o))
            .collect();

        debug!(count = sites.len(), "listed sites");

        Ok(sites
            .into_iter()
            .map(|site| {
                let organization = organizations.get(&site.organization_id).cloned();
                ResolvedSite { site, organization }
            })
            .collect())
    }

    /// Sites owned directly by `organization_id`.
    pub async fn list_by_organization(&self, organization_id: Uuid) -> OrgMapResult<Vec<Site>> {
        self.organizations.get_by_id(organization_id).await?;
        self.sites.list_by_organization(organization_id).await
    }

    pub async fn get(&self, id: Uuid) -> OrgMapResult<Site> {
        self.sites.get_by_id(id).await
    }

    /// Register a site under an existing organization.
    ///
    /// An unknown organization is reported before coordinates are
    /// checked, so the outcome does not depend on the coordinates given.
    pub async fn create(&self, input: CreateSite) -> OrgMapResult<Site> {
        let name = require_name(ENTITY, &input.name)?;

        self.organizations
            .get_by_id(input.organization_id)
            .await
            .map_err(|e| match e {
                OrgMapError::NotFound { id, .. } => OrgMapError::NotFound {
                    entity: "organization".into(),
                    id,
                },
                other => other,
            })?;

        validate_latitude(input.latitude)?;
        validate_longitude(input.longitude)?;

        if self
            .sites
            .find_by_organization_and_name(input.organization_id, &name)
            .await?
            .is_some()
        {
            return Err(duplicate_name(&name, input.organization_id));
        }

        let site = self
            .sites
            .create(CreateSite {
                name,
                ..input
            })
            .await?;

        info!(
            site_id = %site.id,
            organization_id = %site.organization_id,
            "site created"
        );
        Ok(site)
    }

    /// Apply the present fields of `patch`. Returns the number of
    /// records affected (0 or 1).
    ///
    /// A new `organization_id` is not checked for existence.
    pub async fn update(&self, id: Uuid, patch: UpdateSite) -> OrgMapResult<u64> {
        let current = self.sites.get_by_id(id).await?;

        let name = patch
            .name
            .as_deref()
            .map(|raw| require_name(ENTITY, raw))
            .transpose()?;
        if let Some(latitude) = patch.latitude {
            validate_latitude(latitude)?;
        }
        if let Some(longitude) = patch.longitude {
            validate_longitude(longitude)?;
        }

        let target_org = patch.organization_id.unwrap_or(current.organization_id);
        let target_name = name.as_deref().unwrap_or(&current.name);
        if target_org != current.organization_id || target_name != current.name {
            if let Some(other) = self
                .sites
                .find_by_organization_and_name(target_org, target_name)
                .await?
            {
                if other.id != id {
                    return Err(duplicate_name(target_name, target_org));
                }
            }
        }

        let affected = self
            .sites
            .update(
                id,
                UpdateSite {
                    name,
                    ..patch
                },
            )
            .await?;

        info!(site_id = %id, affected, "site updated");
        Ok(affected)
    }

    pub async fn delete(&self, id: Uuid) -> OrgMapResult<u64> {
        self.sites.get_by_id(id).await?;
        let affected = self.sites.delete(id).await?;
        info!(site_id = %id, affected, "site deleted");
        Ok(affected)
    }
}

fn duplicate_name(name: &str, organization_id: Uuid) -> OrgMapError {
    OrgMapError::Conflict {
        entity: ENTITY.into(),
        reason: format!("organization {organization_id} already has a site named '{name}'"),
    }
}
