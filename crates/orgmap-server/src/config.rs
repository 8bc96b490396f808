//! Process configuration with layered loading.
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Config file: `$ORGMAP_CONFIG`, else `orgmap.toml` in the working
//!    directory (optional unless named explicitly)
//! 3. Environment variables: `ORGMAP__<SECTION>__<KEY>`, e.g.
//!    `ORGMAP__DATABASE__URL`

use std::path::PathBuf;

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use orgmap_db::DbConfig;
use serde::Deserialize;

/// Names an explicit config file.
pub const CONFIG_PATH_VAR: &str = "ORGMAP_CONFIG";
const DEFAULT_CONFIG_FILE: &str = "orgmap.toml";
const ENV_PREFIX: &str = "ORGMAP";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub database: DbConfig,
    pub log: LogConfig,
}

/// Tracing subscriber settings. `RUST_LOG`, when set, wins over `filter`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub filter: String,
    /// Emit one JSON object per event instead of human-readable lines.
    pub json: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: "info".into(),
            json: true,
        }
    }
}

impl AppConfig {
    /// Load from the config file and `ORGMAP__*` environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        let (path, required) = match std::env::var_os(CONFIG_PATH_VAR) {
            Some(explicit) => (PathBuf::from(explicit), true),
            None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
        };

        Self::from_builder(
            Config::builder()
                .add_source(File::from(path).required(required))
                .add_source(env_source()),
        )
    }

    fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        builder.build()?.try_deserialize()
    }
}

fn env_source() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .separator("__")
        .try_parsing(true)
}
