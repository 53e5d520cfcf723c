//! Configuration management for MovieGraph.
//!
//! Configuration is loaded from (in priority order):
//! 1. Environment variables (`MOVIEGRAPH__` prefix, `__` separator,
//!    e.g. `MOVIEGRAPH__NEO4J__PASSWORD`)
//! 2. Config file (`moviegraph.toml` by default)
//! 3. Defaults
//!
//! The Neo4j password has no default and must come from one of the first two.

use serde::Deserialize;

use crate::error::MovieGraphError;
use crate::types::RelationshipType;

/// Top-level settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub neo4j: Neo4jSettings,

    #[serde(default)]
    pub writer: WriterSettings,
}

/// Neo4j connection settings (`[neo4j]` section).
#[derive(Debug, Clone, Deserialize)]
pub struct Neo4jSettings {
    /// Bolt endpoint, e.g. `bolt://localhost:7687`.
    #[serde(default = "default_uri")]
    pub uri: String,

    #[serde(default = "default_user")]
    pub user: String,

    /// Empty string is accepted for servers running without auth.
    #[serde(default)]
    pub password: Option<String>,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    #[serde(default = "default_fetch_size")]
    pub fetch_size: usize,

    /// Upper bound on connect + ping, in seconds.
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,

    /// Upper bound on a single statement, in seconds.
    #[serde(default = "default_query_timeout")]
    pub query_timeout_secs: u64,
}

/// Writer behavior (`[writer]` section).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WriterSettings {
    /// Relationship type for the Country -> Movie edge.
    #[serde(default)]
    pub country_edge: RelationshipType,
}

impl Neo4jSettings {
    /// The configured password, or a config error if none was supplied.
    pub fn require_password(&self) -> Result<&str, MovieGraphError> {
        self.password.as_deref().ok_or_else(|| {
            MovieGraphError::Config(
                "neo4j.password is not set (use MOVIEGRAPH__NEO4J__PASSWORD or the config file)"
                    .to_string(),
            )
        })
    }
}

fn default_uri() -> String {
    "bolt://localhost:7687".to_string()
}

fn default_user() -> String {
    "neo4j".to_string()
}

fn default_max_connections() -> u32 {
    4
}

fn default_fetch_size() -> usize {
    256
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_query_timeout() -> u64 {
    30
}

impl Default for Neo4jSettings {
    fn default() -> Self {
        Self {
            uri: default_uri(),
            user: default_user(),
            password: None,
            max_connections: default_max_connections(),
            fetch_size: default_fetch_size(),
            connect_timeout_secs: default_connect_timeout(),
            query_timeout_secs: default_query_timeout(),
        }
    }
}

/// Load settings from `<file_prefix>.{toml,yaml,json,...}` and the process environment.
pub fn load_settings(file_prefix: &str) -> Result<Settings, MovieGraphError> {
    load_settings_with_env(file_prefix, None)
}

/// Like [`load_settings`], but reads environment variables from `env`
/// instead of the process environment when it is `Some`.
pub fn load_settings_with_env(
    file_prefix: &str,
    env: Option<config::Map<String, String>>,
) -> Result<Settings, MovieGraphError> {
    let cfg = config::Config::builder()
        .add_source(config::File::with_name(file_prefix).required(false))
        .add_source(
            config::Environment::with_prefix("MOVIEGRAPH")
                .separator("__")
                .source(env),
        )
        .build()?;

    let settings: Settings = cfg.try_deserialize()?;
    tracing::debug!(
        uri = %settings.neo4j.uri,
        user = %settings.neo4j.user,
        country_edge = %settings.writer.country_edge,
        "Loaded settings"
    );
    Ok(settings)
}
