// File: src/config.rs
// Purpose: Configuration parsing from formsample.toml

use crate::forms::ValidationMode;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Environment variable that points at an alternative config file
pub const CONFIG_PATH_ENV: &str = "FORMSAMPLE_CONFIG";

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub routing: RoutingConfig,

    #[serde(default)]
    pub fetch: FetchConfig,

    #[serde(default)]
    pub forms: FormsConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_host")]
    pub host: String,
}

/// Routing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutingConfig {
    /// Whether page routes are case-insensitive (default: true)
    #[serde(default = "default_true")]
    pub case_insensitive: bool,

    /// Whether a trailing slash must match exactly (default: false, it is ignored)
    #[serde(default = "default_false")]
    pub trailing_slash: bool,
}

/// Remote resource configuration for the fetch page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Id of the post shown on the fetch page
    #[serde(default = "default_post_id")]
    pub post_id: u32,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

/// Form behaviour
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FormsConfig {
    #[serde(default)]
    pub validation_mode: ValidationMode,
}

// Default values
fn default_port() -> u16 {
    3000
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_base_url() -> String {
    "https://jsonplaceholder.typicode.com".to_string()
}

fn default_post_id() -> u32 {
    1
}

fn default_user_agent() -> String {
    concat!("formsample/", env!("CARGO_PKG_VERSION")).to_string()
}

fn default_true() -> bool {
    true
}

fn default_false() -> bool {
    false
}

// Default implementations
impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            host: default_host(),
        }
    }
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            case_insensitive: true,
            trailing_slash: false,
        }
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            post_id: default_post_id(),
            user_agent: default_user_agent(),
        }
    }
}

impl FetchConfig {
    /// URL of a post resource; also used as its cache key
    pub fn post_url(&self, id: u32) -> String {
        format!("{}/posts/{}", self.base_url.trim_end_matches('/'), id)
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        // Missing file means defaults
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;

        Ok(config)
    }

    /// Load configuration from `$FORMSAMPLE_CONFIG` or ./formsample.toml,
    /// then apply the `PORT` override
    pub fn load_default() -> Result<Self> {
        let path = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| "formsample.toml".to_string());
        let mut config = Self::load(path)?;

        if let Ok(port) = std::env::var("PORT") {
            config.server.port = port
                .parse()
                .with_context(|| format!("Invalid PORT value: {}", port))?;
        }

        Ok(config)
    }

    /// Socket address the server binds to
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
