//! Configuration types and loading logic.

use std::collections::HashMap;
use std::path::PathBuf;

use figment::providers::{Env, Format, Toml};
use figment::Figment;
use serde::Deserialize;
use urlshort_tracing::TracingConfig;

/// Top-level server configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UrlshortConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub redirects: RedirectsConfig,
    #[serde(default)]
    pub tracing: TracingConfig,
}

/// Server listen configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_listen_address")]
    pub listen_address: String,
}

/// Where redirect tables come from.
///
/// Layers are applied innermost first: `paths`, then `yaml_file`, then
/// `json_file`. An outer layer wins over an inner one for the same path.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RedirectsConfig {
    /// Inline path → URL table.
    #[serde(default)]
    pub paths: HashMap<String, String>,

    /// YAML list of `{path, url}` records.
    #[serde(default)]
    pub yaml_file: Option<PathBuf>,

    /// JSON array of `{"path", "url"}` records.
    #[serde(default)]
    pub json_file: Option<PathBuf>,
}

fn default_listen_address() -> String {
    "127.0.0.1:8080".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_address: default_listen_address(),
        }
    }
}

impl UrlshortConfig {
    /// Load configuration from TOML file and environment variables.
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (URLSHORT_ prefix, __ for nesting)
    /// 2. TOML config file (skipped if missing)
    /// 3. Defaults
    pub fn load(config_path: &str) -> anyhow::Result<Self> {
        let config: UrlshortConfig = Figment::new()
            .merge(Toml::file(config_path))
            .merge(Env::prefixed("URLSHORT_").split("__"))
            .extract()?;
        Ok(config)
    }
}
