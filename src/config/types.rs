use reelsearch_common::record::DEFAULT_STREAM_URL_TEMPLATE;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub search: SearchConfig,

    #[serde(default)]
    pub providers: ProvidersConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchConfig {
    /// Upper bound on the total wait for all providers (default: 20)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Streaming-availability link; `{imdb_id}` is replaced per record
    #[serde(default = "default_stream_url_template")]
    pub stream_url_template: String,
}

fn default_timeout_secs() -> u64 {
    20
}
fn default_stream_url_template() -> String {
    DEFAULT_STREAM_URL_TEMPLATE.to_string()
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            stream_url_template: default_stream_url_template(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ProvidersConfig {
    #[serde(default)]
    pub rotten_tomatoes: RottenTomatoesConfig,

    #[serde(default)]
    pub tmdb: TmdbConfig,

    #[serde(default)]
    pub tvdb: TvdbConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RottenTomatoesConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    #[serde(default)]
    pub api_key: String,

    #[serde(default = "default_rotten_tomatoes_url")]
    pub base_url: String,
}

fn default_enabled() -> bool {
    true
}
fn default_rotten_tomatoes_url() -> String {
    "http://api.rottentomatoes.com/api/public/v1.0".to_string()
}

impl Default for RottenTomatoesConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            api_key: String::new(),
            base_url: default_rotten_tomatoes_url(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TmdbConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    #[serde(default)]
    pub api_key: String,

    #[serde(default = "default_tmdb_url")]
    pub base_url: String,

    /// Rate limit for the search, detail, and credits calls (default: 10)
    #[serde(default = "default_requests_per_second")]
    pub requests_per_second: u32,
}

fn default_tmdb_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}
fn default_requests_per_second() -> u32 {
    10
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            api_key: String::new(),
            base_url: default_tmdb_url(),
            requests_per_second: default_requests_per_second(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TvdbConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    #[serde(default)]
    pub api_key: String,

    #[serde(default = "default_tvdb_url")]
    pub base_url: String,

    /// Only banners of this type are kept (default: "series")
    #[serde(default = "default_banner_type")]
    pub banner_type: String,
}

fn default_tvdb_url() -> String {
    "http://thetvdb.com/api".to_string()
}
fn default_banner_type() -> String {
    "series".to_string()
}

impl Default for TvdbConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            api_key: String::new(),
            base_url: default_tvdb_url(),
            banner_type: default_banner_type(),
        }
    }
}
