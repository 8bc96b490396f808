//! SurrealDB implementation of [`SiteRepository`].

use chrono::{DateTime, Utc};
use orgmap_core::error::OrgMapResult;
use orgmap_core::models::site::{CreateSite, Site, UpdateSite};
use orgmap_core::repository::SiteRepository;
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use super::parse_uuid;
use crate::error::DbError;

const ENTITY: &str = "site";

#[derive(Debug, SurrealValue)]
struct SiteRow {
    organization_id: String,
    name: String,
    latitude: f64,
    longitude: f64,
    address: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl SiteRow {
    fn into_site(self, id: Uuid) -> Result<Site, DbError> {
        let organization_id = parse_uuid("organization", &self.organization_id)?;
        Ok(Site {
            id,
            organization_id,
            name: self.name,
            latitude: self.latitude,
            longitude: self.longitude,
            address: self.address,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(Debug, SurrealValue)]
struct SiteRowWithId {
    record_id: String,
    organization_id: String,
    name: String,
    latitude: f64,
    longitude: f64,
    address: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl SiteRowWithId {
    fn try_into_site(self) -> Result<Site, DbError> {
        let id = parse_uuid(ENTITY, &self.record_id)?;
        SiteRow {
            organization_id: self.organization_id,
            name: self.name,
            latitude: self.latitude,
            longitude: self.longitude,
            address: self.address,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
        .into_site(id)
    }
}

fn collect(rows: Vec<SiteRowWithId>) -> Result<Vec<Site>, DbError> {
    rows.into_iter().map(SiteRowWithId::try_into_site).collect()
}

/// SurrealDB implementation of the Site repository.
#[derive(Clone)]
pub struct SurrealSiteRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealSiteRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> SiteRepository for SurrealSiteRepository<C> {
    async fn create(&self, input: CreateSite) -> OrgMapResult<Site> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();

        let result = self
            .db
            .query(
                "CREATE type::record('site', $id) SET \
                 organization_id = $organization_id, name = $name, \
                 latitude = $latitude, longitude = $longitude, \
                 address = $address",
            )
            .bind(("id", id_str.clone()))
            .bind(("organization_id", input.organization_id.to_string()))
            .bind(("name", input.name))
            .bind(("latitude", input.latitude))
            .bind(("longitude", input.longitude))
            .bind(("address", input.address))
            .await
            .map_err(DbError::from)?;

        let mut result = result
            .check()
            .map_err(|e| DbError::from_statement(ENTITY, e))?;

        let rows: Vec<SiteRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: ENTITY.into(),
            id: id_str,
        })?;

        Ok(row.into_site(id)?)
    }

    async fn get_by_id(&self, id: Uuid) -> OrgMapResult<Site> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query("SELECT * FROM type::record('site', $id)")
            .bind(("id", id_str.clone()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<SiteRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: ENTITY.into(),
            id: id_str,
        })?;

        Ok(row.into_site(id)?)
    }

    async fn find_by_organization_and_name(
        &self,
        organization_id: Uuid,
        name: &str,
    ) -> OrgMapResult<Option<Site>> {
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM site \
                 WHERE organization_id = $organization_id AND name = $name \
                 LIMIT 1",
            )
            .bind(("organization_id", organization_id.to_string()))
            .bind(("name", name.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<SiteRowWithId> = result.take(0).map_err(DbError::from)?;

        Ok(rows
            .into_iter()
            .next()
            .map(SiteRowWithId::try_into_site)
            .transpose()?)
    }

    async fn update(&self, id: Uuid, input: UpdateSite) -> OrgMapResult<u64> {
        let mut sets = Vec::new();
        if input.organization_id.is_some() {
            sets.push("organization_id = $organization_id");
        }
        if input.name.is_some() {
            sets.push("name = $name");
        }
        if input.latitude.is_some() {
            sets.push("latitude = $latitude");
        }
        if input.longitude.is_some() {
            sets.push("longitude = $longitude");
        }
        if input.address.is_some() {
            sets.push("address = $address");
        }
        sets.push("updated_at = time::now()");

        let query = format!(
            "UPDATE type::record('site', $id) SET {}",
            sets.join(", ")
        );

        let mut builder = self.db.query(&query).bind(("id", id.to_string()));

        if let Some(organization_id) = input.organization_id {
            builder = builder.bind(("organization_id", organization_id.to_string()));
        }
        if let Some(name) = input.name {
            builder = builder.bind(("name", name));
        }
        if let Some(latitude) = input.latitude {
            builder = builder.bind(("latitude", latitude));
        }
        if let Some(longitude) = input.longitude {
            builder = builder.bind(("longitude", longitude));
        }
        if let Some(address) = input.address {
            builder = builder.bind(("address", address));
        }

        let result = builder.await.map_err(DbError::from)?;
        let mut result = result
            .check()
            .map_err(|e| DbError::from_statement(ENTITY, e))?;

        let rows: Vec<SiteRow> = result.take(0).map_err(DbError::from)?;
        Ok(rows.len() as u64)
    }

    async fn delete(&self, id: Uuid) -> OrgMapResult<u64> {
        let result = self
            .db
            .query("DELETE type::record('site', $id) RETURN BEFORE")
            .bind(("id", id.to_string()))
            .await
            .map_err(DbError::from)?;

        let mut result = result
            .check()
            .map_err(|e| DbError::from_statement(ENTITY, e))?;

        let rows: Vec<SiteRow> = result.take(0).map_err(DbError::from)?;
        Ok(rows.len() as u64)
    }

    async fn list(&self) -> OrgMapResult<Vec<Site>> {
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM site \
                 ORDER BY created_at ASC, name ASC",
            )
            .await
            .map_err(DbError::from)?;

        let rows: Vec<SiteRowWithId> = result.take(0).map_err(DbError::from)?;
        Ok(collect(rows)?)
    }

    async fn list_by_organization(&self, organization_id: Uuid) -> OrgMapResult<Vec<Site>> {
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM site \
                 WHERE organization_id = $organization_id \
                 ORDER BY created_at ASC, name ASC",
            )
            .bind(("organization_id", organization_id.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<SiteRowWithId> = result.take(0).map_err(DbError::from)?;
        Ok(collect(rows)?)
    }
}
