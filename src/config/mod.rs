use std::{env, fs, path::Path};

use serde::Deserialize;

use crate::core::error::DetectError;

/// Env var holding the primary provider's bearer token. The token is read
/// here and nowhere else; it must never appear in config files or logs.
pub const BEARER_ENV: &str = "X_BEARER";

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScrapeConfig {
    pub command: String,
    pub profile_timeout_secs: u64,
    pub posts_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub user_agent: String,
    pub cache_ttl_seconds: u64,
    pub max_posts: usize,
    pub api: ApiConfig,
    pub scrape: ScrapeConfig,
    /// Populated from `X_BEARER` at load time, never from the file.
    #[serde(skip)]
    pub bearer: Option<String>,
}

pub fn load_config(path: Option<&str>) -> Result<AppConfig, DetectError> {
    let default_path = Path::new("config/shambird.toml");
    let path = path.map(Path::new).unwrap_or(default_path);

    let mut cfg = if path.exists() {
        let content = fs::read_to_string(path).map_err(|e| DetectError::Config(e.to_string()))?;
        toml::from_str(&content).map_err(|e| DetectError::Config(e.to_string()))?
    } else {
        default_config()
    };

    cfg.bearer = env::var(BEARER_ENV).ok().filter(|t| !t.trim().is_empty());
    if cfg.bearer.is_none() {
        tracing::debug!("{BEARER_ENV} not set; primary provider will be skipped");
    }
    Ok(cfg)
}

fn default_config() -> AppConfig {
    AppConfig {
        user_agent: "shambird/1.0".to_string(),
        cache_ttl_seconds: 600,
        max_posts: 100,
        api: ApiConfig {
            base_url: "https://api.twitter.com/2".to_string(),
            timeout_secs: 20,
        },
        scrape: ScrapeConfig {
            command: "snscrape".to_string(),
            profile_timeout_secs: 30,
            posts_timeout_secs: 45,
        },
        bearer: None,
    }
}
