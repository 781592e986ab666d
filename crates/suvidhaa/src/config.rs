//! Configuration for the Suvidhaa backend

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Environment variable naming an optional TOML config file
pub const CONFIG_PATH_ENV: &str = "SUVIDHAA_CONFIG";

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Record store configuration
    #[serde(default)]
    pub database: DatabaseConfig,
    /// LLM completion service configuration
    #[serde(default)]
    pub llm: LlmConfig,
    /// Document analysis configuration
    #[serde(default)]
    pub analysis: AnalysisConfig,
    /// Remote object store (disabled when absent)
    #[serde(default)]
    pub object_store: Option<ObjectStoreConfig>,
}

impl AppConfig {
    /// Load configuration: defaults, then the optional TOML file, then environment overrides
    pub fn load() -> Result<Self> {
        let mut config = match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) => Self::from_file(Path::new(&path))?,
            Err(_) => Self::default(),
        };
        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Parse a TOML config file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse TOML config text
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| Error::Config(format!("Invalid config file: {}", e)))
    }

    /// Apply environment overrides using the given lookup
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("SUVIDHAA_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("SUVIDHAA_PORT") {
            self.server.port = port
                .parse()
                .map_err(|e| Error::Config(format!("Invalid SUVIDHAA_PORT '{}': {}", port, e)))?;
        }
        if let Some(path) = lookup("DATABASE_PATH") {
            self.database.path = PathBuf::from(path);
        }
        if let Some(base_url) = lookup("LLM_BASE_URL") {
            self.llm.base_url = base_url;
        }
        if let Some(api_key) = lookup("LLM_API_KEY") {
            self.llm.api_key = api_key;
        }
        if let Some(model) = lookup("LLM_MODEL") {
            self.llm.model = model;
        }

        let cloud_name = lookup("CLOUDINARY_CLOUD_NAME");
        let api_key = lookup("CLOUDINARY_API_KEY");
        let api_secret = lookup("CLOUDINARY_API_SECRET");
        if let (Some(cloud_name), Some(api_key), Some(api_secret)) = (cloud_name, api_key, api_secret) {
            let base = self.object_store.take().unwrap_or_default();
            self.object_store = Some(ObjectStoreConfig {
                cloud_name,
                api_key,
                api_secret,
                ..base
            });
        }

        Ok(())
    }
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host address
    pub host: String,
    /// Port number
    pub port: u16,
    /// Maximum upload size in bytes (default: 50MB)
    pub max_upload_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8001,
            max_upload_size: 50 * 1024 * 1024,
        }
    }
}

/// SQLite record store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file
    pub path: PathBuf,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        let path = dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("suvidhaa")
            .join("suvidhaa.db");

        Self { path }
    }
}

/// LLM (OpenAI-compatible chat completions) configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// API base URL (the `/chat/completions` path is appended)
    pub base_url: String,
    /// Bearer token
    pub api_key: String,
    /// Model name
    pub model: String,
    /// Temperature for generation
    pub temperature: f32,
    /// Maximum output tokens
    pub max_tokens: u32,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: "https://integrate.api.nvidia.com/v1".to_string(),
            api_key: String::new(),
            model: "meta/llama-3.1-8b-instruct".to_string(),
            temperature: 0.3, // Low for structured output
            max_tokens: 1500,
            timeout_secs: 120,
        }
    }
}

/// Document analysis configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Characters of extracted text forwarded to the model
    pub max_input_chars: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            max_input_chars: 8000,
        }
    }
}

/// Cloudinary-compatible object store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectStoreConfig {
    /// Upload API base URL
    #[serde(default = "default_object_store_base_url")]
    pub base_url: String,
    /// Cloud (account) name
    pub cloud_name: String,
    /// API key
    pub api_key: String,
    /// API secret used for request signing
    pub api_secret: String,
    /// Request timeout in seconds
    #[serde(default = "default_object_store_timeout")]
    pub timeout_secs: u64,
}

fn default_object_store_base_url() -> String {
    "https://api.cloudinary.com/v1_1".to_string()
}

fn default_object_store_timeout() -> u64 {
    60
}

impl Default for ObjectStoreConfig {
    fn default() -> Self {
        Self {
            base_url: default_object_store_base_url(),
            cloud_name: String::new(),
            api_key: String::new(),
            api_secret: String::new(),
            timeout_secs: default_object_store_timeout(),
        }
    }
}
