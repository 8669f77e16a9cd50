//! Assistant configuration.
//!
//! Loaded from, in order: an explicit `--config` path, `~/.config/yuv/config.toml`,
//! built-in defaults. Every field has a default so partial files are fine.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Transport-level timeout applied to every remote call.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_user_agent() -> String {
    format!("yuv/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointConfig {
    /// Instant-answer JSON API.
    #[serde(default = "default_search_api")]
    pub search_api: String,

    /// Search page linked when the API has nothing useful.
    #[serde(default = "default_search_page")]
    pub search_page: String,

    #[serde(default = "default_weather")]
    pub weather: String,
}

fn default_search_api() -> String {
    "https://api.duckduckgo.com/".to_string()
}

fn default_search_page() -> String {
    "https://duckduckgo.com/".to_string()
}

fn default_weather() -> String {
    "https://wttr.in".to_string()
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            search_api: default_search_api(),
            search_page: default_search_page(),
            weather: default_weather(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// JSON file holding profile, lists and transcript.
    /// Defaults to `<data dir>/yuv/store.json`.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl StorageConfig {
    pub fn resolved_path(&self) -> PathBuf {
        self.path.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("yuv")
                .join("store.json")
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

fn default_log_filter() -> String {
    "yuv=warn".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssistantConfig {
    #[serde(default)]
    pub http: HttpConfig,

    #[serde(default)]
    pub endpoints: EndpointConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub log: LogConfig,
}

impl AssistantConfig {
    /// `~/.config/yuv/config.toml`
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("yuv").join("config.toml"))
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        toml::from_str(&contents).with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// An explicit path must exist; the user config is optional.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        if let Some(user_path) = Self::user_config_path() {
            if user_path.exists() {
                return Self::from_file(&user_path);
            }
        }

        Ok(Self::default())
    }
}
