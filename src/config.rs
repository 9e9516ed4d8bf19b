use serde::{Deserialize, Serialize};

/// Placeholder values shipped in sample `.env` files. A key equal to one of
/// these is treated as absent.
const PLACEHOLDER_KEYS: &[&str] = &[
    "demo_key",
    "tu_api_key_tmdb",
    "tu_api_key_rawg",
    "tu_api_key_lastfm",
];

pub const TMDB_KEY_NAME: &str = "TMDB API Key";
pub const RAWG_KEY_NAME: &str = "RAWG API Key";
pub const LASTFM_KEY_NAME: &str = "Last.fm API Key";

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// TMDB (films and series) API key
    #[serde(default = "default_api_key")]
    pub tmdb_api_key: String,

    /// TMDB API base URL
    #[serde(default = "default_tmdb_api_url")]
    pub tmdb_api_url: String,

    /// TMDB image CDN base URL (without size segment)
    #[serde(default = "default_tmdb_image_url")]
    pub tmdb_image_url: String,

    /// RAWG (games) API key
    #[serde(default = "default_api_key")]
    pub rawg_api_key: String,

    /// RAWG API base URL
    #[serde(default = "default_rawg_api_url")]
    pub rawg_api_url: String,

    /// Last.fm (music) API key
    #[serde(default = "default_api_key")]
    pub lastfm_api_key: String,

    /// Last.fm API base URL
    #[serde(default = "default_lastfm_api_url")]
    pub lastfm_api_url: String,

    /// Per-request timeout for catalog calls
    #[serde(default = "default_http_timeout_secs")]
    pub http_timeout_secs: u64,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_api_key() -> String {
    "demo_key".to_string()
}

fn default_tmdb_api_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_tmdb_image_url() -> String {
    "https://image.tmdb.org/t/p".to_string()
}

fn default_rawg_api_url() -> String {
    "https://api.rawg.io/api".to_string()
}

fn default_lastfm_api_url() -> String {
    "https://ws.audioscrobbler.com/2.0".to_string()
}

fn default_http_timeout_secs() -> u64 {
    10
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

/// Outcome of inspecting the catalog credentials
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigurationStatus {
    pub is_configured: bool,
    pub missing_keys: Vec<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// Reports which catalog credentials are missing or still set to a
    /// placeholder. Never touches the network and never fails.
    pub fn check_configuration(&self) -> ConfigurationStatus {
        let missing_keys: Vec<String> = [
            (TMDB_KEY_NAME, &self.tmdb_api_key),
            (RAWG_KEY_NAME, &self.rawg_api_key),
            (LASTFM_KEY_NAME, &self.lastfm_api_key),
        ]
        .into_iter()
        .filter(|(_, value)| is_placeholder(value))
        .map(|(name, _)| name.to_string())
        .collect();

        ConfigurationStatus {
            is_configured: missing_keys.is_empty(),
            missing_keys,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tmdb_api_key: default_api_key(),
            tmdb_api_url: default_tmdb_api_url(),
            tmdb_image_url: default_tmdb_image_url(),
            rawg_api_key: default_api_key(),
            rawg_api_url: default_rawg_api_url(),
            lastfm_api_key: default_api_key(),
            lastfm_api_url: default_lastfm_api_url(),
            http_timeout_secs: default_http_timeout_secs(),
            host: default_host(),
            port: default_port(),
        }
    }
}

fn is_placeholder(value: &str) -> bool {
    let trimmed = value.trim();
    trimmed.is_empty() || PLACEHOLDER_KEYS.contains(&trimmed)
}
