//! Connection settings for a Gremlin-over-documents graph store.
//!
//! Configuration is loaded from (in priority order):
//! 1. Environment variables (`GRAPHWIRE__GRAPH__` prefix, e.g. `GRAPHWIRE__GRAPH__ENDPOINT`)
//! 2. Config file (`<prefix>.toml`, `[graph]` section)
//! 3. Defaults

use serde::Deserialize;

use crate::error::ConfigError;
use crate::types::Collection;

/// Where the graph lives and how to reach it.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct GraphConfig {
    /// Account endpoint URI.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Account key used to sign requests.
    #[serde(default)]
    pub auth_key: String,

    /// Database that holds the graph collection.
    #[serde(default)]
    pub database: String,

    /// Collection (graph) every command is scoped to.
    #[serde(default)]
    pub collection: String,
}

fn default_endpoint() -> String {
    "https://localhost:8081".to_string()
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            auth_key: String::new(),
            database: String::new(),
            collection: String::new(),
        }
    }
}

impl GraphConfig {
    /// Load from `<file_prefix>.toml` (optional) and the environment.
    pub fn load(file_prefix: &str) -> Result<Self, ConfigError> {
        let cfg = config::Config::builder()
            .add_source(config::File::with_name(file_prefix).required(false))
            .add_source(
                config::Environment::with_prefix("GRAPHWIRE")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let loaded = match cfg.get::<GraphConfig>("graph") {
            Ok(c) => c,
            Err(config::ConfigError::NotFound(_)) => GraphConfig::default(),
            Err(e) => return Err(e.into()),
        };
        loaded.validate()?;
        tracing::debug!(endpoint = %loaded.endpoint, database = %loaded.database, collection = %loaded.collection, "Loaded graph config");
        Ok(loaded)
    }

    /// Reject settings no command can be scoped with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.endpoint.trim().is_empty() {
            return Err(ConfigError::Missing("graph.endpoint"));
        }
        if self.database.trim().is_empty() {
            return Err(ConfigError::Missing("graph.database"));
        }
        if self.collection.trim().is_empty() {
            return Err(ConfigError::Missing("graph.collection"));
        }
        Ok(())
    }

    pub fn collection(&self) -> Collection {
        Collection::new(&self.database, &self.collection)
    }
}
