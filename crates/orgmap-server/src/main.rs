//! OrgMap Server: process entry point.
//!
//! Loads configuration, connects to SurrealDB and wires the registry
//! components over it, then runs until interrupted.

mod config;

use anyhow::Context;
use orgmap_db::DbManager;
use orgmap_db::repository::{SurrealOrganizationRepository, SurrealSiteRepository};
use orgmap_registry::Registry;
use tracing_subscriber::EnvFilter;

use crate::config::{AppConfig, LogConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("failed to load configuration")?;
    init_tracing(&config.log)?;

    tracing::info!("starting orgmap server");

    let db = DbManager::connect(&config.database)
        .await
        .context("failed to connect to SurrealDB")?;

    let registry = Registry::new(
        SurrealOrganizationRepository::new(db.client().clone()),
        SurrealSiteRepository::new(db.client().clone()),
    );

    let organizations = registry.hierarchy.list().await?.len();
    let sites = registry.sites.list().await?.len();
    tracing::info!(organizations, sites, "registry ready");

    tokio::signal::ctrl_c()
        .await
        .context("failed to listen for shutdown signal")?;

    tracing::info!("orgmap server stopped");
    Ok(())
}

fn init_tracing(log: &LogConfig) -> anyhow::Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&log.filter)
            .with_context(|| format!("invalid log filter '{}'", log.filter))?,
    };

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if log.json {
        builder.json().init();
    } else {
        builder.init();
    }
    Ok(())
}
