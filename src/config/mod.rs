//! # Configuration Management Module
//!
//! Dexsearch reads a small TOML file describing where the species catalog lives, how
//! search results are presented, which chat prefixes trigger commands, and where logs go.
//!
//! ## Configuration Structure
//!
//! - [`CatalogConfig`] - catalog seed file location
//! - [`SearchConfig`] - result limit and broadcast policy
//! - [`ChatConfig`] - command prefixes for private and broadcast replies
//! - [`LoggingConfig`] - log level and optional log file
//!
//! ## Usage
//!
//! ```rust,no_run
//! use dexsearch::config::Config;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("config.toml").await?;
//!     println!("Catalog: {}", config.catalog.path);
//!
//!     Config::create_default("config.toml").await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Configuration File Format
//!
//! ```toml
//! [catalog]
//! path = "data/catalog.json"
//!
//! [search]
//! result_limit = 10
//! allow_broadcast_show_all = false
//!
//! [chat]
//! private_prefix = "/"
//! broadcast_prefix = "!"
//!
//! [logging]
//! level = "info"
//! file = "dexsearch.log"
//! ```

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use tokio::fs;

use crate::dex::search::{SearchOptions, DEFAULT_RESULT_LIMIT};

/// Prefixes a chat message may start with. Anything else is rejected on load.
pub const ALLOWED_PREFIXES: [&str; 6] = ["/", "!", "^", "+", "$", ">"];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub chat: ChatConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Path to the JSON seed file.
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Names listed before results are sampled. Must be at least 1.
    #[serde(default = "default_result_limit")]
    pub result_limit: usize,
    /// Permit `all` in broadcast searches. Off by default so one query cannot flood a room.
    #[serde(default)]
    pub allow_broadcast_show_all: bool,
}

fn default_result_limit() -> usize {
    DEFAULT_RESULT_LIMIT
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            result_limit: DEFAULT_RESULT_LIMIT,
            allow_broadcast_show_all: false,
        }
    }
}

impl SearchConfig {
    pub fn options(&self) -> SearchOptions {
        SearchOptions {
            result_limit: self.result_limit.max(1),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Prefix for commands whose reply goes only to the sender.
    #[serde(default = "default_private_prefix")]
    pub private_prefix: String,
    /// Prefix for commands whose reply is broadcast to the room.
    #[serde(default = "default_broadcast_prefix")]
    pub broadcast_prefix: String,
}

fn default_private_prefix() -> String {
    "/".to_string()
}

fn default_broadcast_prefix() -> String {
    "!".to_string()
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            private_prefix: default_private_prefix(),
            broadcast_prefix: default_broadcast_prefix(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub file: Option<String>,
}

impl Config {
    /// Load configuration from a file
    pub async fn load(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| anyhow!("Failed to read config file {}: {}", path, e))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| anyhow!("Failed to parse config file {}: {}", path, e))?;

        config
            .validate()
            .map_err(|e| anyhow!("Invalid config file {}: {}", path, e))?;
        Ok(config)
    }

    /// Create a default configuration file
    pub async fn create_default(path: &str) -> Result<()> {
        let config = Config::default();
        let content = toml::to_string_pretty(&config)
            .map_err(|e| anyhow!("Failed to serialize default config: {}", e))?;

        fs::write(path, content)
            .await
            .map_err(|e| anyhow!("Failed to write config file {}: {}", path, e))?;

        Ok(())
    }

    /// Check values serde cannot express.
    pub fn validate(&self) -> Result<()> {
        if self.search.result_limit == 0 {
            return Err(anyhow!("search.result_limit must be at least 1"));
        }
        for prefix in [&self.chat.private_prefix, &self.chat.broadcast_prefix] {
            if !ALLOWED_PREFIXES.contains(&prefix.as_str()) {
                return Err(anyhow!(
                    "chat prefix '{}' not one of {}",
                    prefix,
                    ALLOWED_PREFIXES.join(" ")
                ));
            }
        }
        if self.chat.private_prefix == self.chat.broadcast_prefix {
            return Err(anyhow!("chat.private_prefix and chat.broadcast_prefix must differ"));
        }
        Ok(())
    }

    /// Log level filter named by `logging.level`, falling back to Info.
    pub fn log_level(&self) -> log::LevelFilter {
        self.logging
            .level
            .parse()
            .unwrap_or(log::LevelFilter::Info)
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            catalog: CatalogConfig {
                path: "data/catalog.json".to_string(),
            },
            search: SearchConfig::default(),
            chat: ChatConfig::default(),
            logging: LoggingConfig {
                level: "info".to_string(),
                file: Some("dexsearch.log".to_string()),
            },
        }
    }
}
