mod types;

pub use types::*;

use anyhow::{Context, Result};
use reelsearch_common::StreamLinkTemplate;
use std::path::Path;
use std::time::Duration;

/// Environment variables that override provider API keys from the file.
pub const ROTTEN_TOMATOES_KEY_ENV: &str = "REELSEARCH_ROTTEN_TOMATOES_API_KEY";
pub const TMDB_KEY_ENV: &str = "REELSEARCH_TMDB_API_KEY";
pub const TVDB_KEY_ENV: &str = "REELSEARCH_TVDB_API_KEY";

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let mut config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    apply_env_overrides(&mut config, |name| std::env::var(name).ok());

    validate_config(&config)?;

    Ok(config)
}

/// Load config from default locations or return default config
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    // Try default locations
    let default_paths = [
        "./reelsearch.toml",
        "~/.config/reelsearch/config.toml",
        "/etc/reelsearch/config.toml",
    ];

    for path_str in default_paths {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            return load_config(path);
        }
    }

    // Return default config if no file found
    let mut config = Config::default();
    apply_env_overrides(&mut config, |name| std::env::var(name).ok());
    Ok(config)
}

/// Replace provider API keys with non-empty values from `lookup`.
pub fn apply_env_overrides<F>(config: &mut Config, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let providers = &mut config.providers;
    let slots = [
        (ROTTEN_TOMATOES_KEY_ENV, &mut providers.rotten_tomatoes.api_key),
        (TMDB_KEY_ENV, &mut providers.tmdb.api_key),
        (TVDB_KEY_ENV, &mut providers.tvdb.api_key),
    ];
    for (name, key) in slots {
        if let Some(value) = lookup(name).filter(|v| !v.trim().is_empty()) {
            *key = value;
        }
    }
}

impl ServerConfig {
    /// Replace host and port with command-line values, where given.
    pub fn apply_overrides(&mut self, host: Option<String>, port: Option<u16>) {
        if let Some(host) = host {
            self.host = host;
        }
        if let Some(port) = port {
            self.port = port;
        }
    }
}

impl SearchConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn stream_template(&self) -> StreamLinkTemplate {
        StreamLinkTemplate::new(self.stream_url_template.clone())
    }
}

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    if config.server.port == 0 {
        anyhow::bail!("Server port cannot be 0");
    }

    if config.search.timeout_secs == 0 {
        anyhow::bail!("Search timeout must be at least one second");
    }

    if !config.search.stream_template().is_valid() {
        anyhow::bail!(
            "Stream URL template '{}' does not contain {{imdb_id}}",
            config.search.stream_url_template
        );
    }

    if config.providers.tmdb.enabled && config.providers.tmdb.requests_per_second == 0 {
        anyhow::bail!("TMDB requests_per_second must be greater than 0");
    }

    // Missing credentials are reported when the aggregator is built, so
    // `validate` can still describe a partially configured file.
    let providers = &config.providers;
    let missing = [
        ("rotten_tomatoes", providers.rotten_tomatoes.enabled, &providers.rotten_tomatoes.api_key),
        ("tmdb", providers.tmdb.enabled, &providers.tmdb.api_key),
        ("tvdb", providers.tvdb.enabled, &providers.tvdb.api_key),
    ];
    for (name, enabled, key) in missing {
        if enabled && key.is_empty() {
            tracing::warn!("Provider '{}' is enabled but has no API key", name);
        }
    }

    Ok(())
}
