//! Configuration management
//!
//! This module handles loading, validation, and management of the Sisuu configuration.
//! Configuration is stored in TOML format, by default at ~/.sisuu/config.toml.
//! A missing default file is not an error: the built-in defaults are used.
//!
//! # Configuration Sections
//!
//! - **core**: Log level
//! - **server**: Bind address, port, allowed CORS origins
//! - **llm**: OpenAI-compatible endpoint and model used for report generation
//! - **storage**: Where finished role profiles are written (Supabase or SQLite)
//!
//! # Environment Overrides
//!
//! Applied after the file is read, so a deployment can run with no file at all:
//!
//! | Variable            | Overrides                      |
//! |---------------------|--------------------------------|
//! | `PORT`              | `server.port`                  |
//! | `OPENAI_MODEL`      | `llm.openai.model`             |
//! | `SUPABASE_URL`      | `storage.supabase.url`         |
//! | `OPENAI_API_KEY`    | secret, never read from a file |
//! | `SUPABASE_ANON_KEY` | secret, never read from a file |
//!
//! # Examples
//!
//! ```no_run
//! use sisuu_engine::config::Config;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::load(None)?;
//!
//! println!("Listening on {}", config.server.bind_addr());
//! println!("Model: {}", config.llm.openai.model);
//! # Ok(())
//! # }
//! ```

use crate::secrets::SecretString;
use sdk::errors::EngineError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Core settings
    #[serde(default)]
    pub core: CoreConfig,

    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Report generation settings
    #[serde(default)]
    pub llm: LLMConfig,

    /// Profile storage settings
    #[serde(default)]
    pub storage: StorageConfig,

    /// API keys, taken from the environment only
    #[serde(skip)]
    pub secrets: Secrets,
}

/// Core configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoreConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address to bind
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind
    #[serde(default = "default_port")]
    pub port: u16,

    /// Allowed CORS origins. Empty means any origin.
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

impl ServerConfig {
    /// `host:port` string suitable for `TcpListener::bind`
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// LLM configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LLMConfig {
    /// OpenAI provider settings
    #[serde(default)]
    pub openai: OpenAIConfig,
}

/// OpenAI provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAIConfig {
    /// Base URL for OpenAI API
    #[serde(default = "default_openai_base_url")]
    pub base_url: String,

    /// Model name
    #[serde(default = "default_openai_model")]
    pub model: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_llm_timeout")]
    pub timeout_secs: u64,
    // Note: API key comes from OPENAI_API_KEY, not from config
}

/// Storage backend selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Hosted Postgres behind the Supabase REST API
    Supabase,

    /// Local SQLite file
    Sqlite,
}

/// Storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Which backend receives finished profiles
    #[serde(default = "default_backend")]
    pub backend: StorageBackend,

    /// Table the profiles are appended to
    #[serde(default = "default_table")]
    pub table: String,

    /// Supabase settings
    #[serde(default)]
    pub supabase: SupabaseConfig,

    /// SQLite settings
    #[serde(default)]
    pub sqlite: SqliteConfig,
}

/// Supabase configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupabaseConfig {
    /// Project URL, e.g. https://xyz.supabase.co
    #[serde(default)]
    pub url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_storage_timeout")]
    pub timeout_secs: u64,
    // Note: key comes from SUPABASE_ANON_KEY, not from config
}

/// SQLite configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SqliteConfig {
    /// Database file path (supports ~ expansion)
    #[serde(default = "default_sqlite_path")]
    pub path: PathBuf,
}

/// Secrets read from the environment
#[derive(Debug, Clone, Default)]
pub struct Secrets {
    pub openai_api_key: Option<SecretString>,
    pub supabase_key: Option<SecretString>,
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    10000
}

fn default_openai_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_openai_model() -> String {
    "gpt-4".to_string()
}

fn default_llm_timeout() -> u64 {
    120
}

fn default_backend() -> StorageBackend {
    StorageBackend::Supabase
}

fn default_table() -> String {
    "role_profiles".to_string()
}

fn default_storage_timeout() -> u64 {
    30
}

fn default_sqlite_path() -> PathBuf {
    PathBuf::from("~/.sisuu/profiles.db")
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: Vec::new(),
        }
    }
}

impl Default for OpenAIConfig {
    fn default() -> Self {
        Self {
            base_url: default_openai_base_url(),
            model: default_openai_model(),
            timeout_secs: default_llm_timeout(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            table: default_table(),
            supabase: SupabaseConfig::default(),
            sqlite: SqliteConfig::default(),
        }
    }
}

impl Default for SupabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            timeout_secs: default_storage_timeout(),
        }
    }
}

impl Default for SqliteConfig {
    fn default() -> Self {
        Self {
            path: default_sqlite_path(),
        }
    }
}

impl Config {
    /// Load the effective configuration
    ///
    /// With `path`, that file must exist. Without it, ~/.sisuu/config.toml is
    /// read when present and the built-in defaults are used otherwise.
    /// Environment overrides are applied before validation.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Configuration file cannot be read
    /// - TOML parsing fails
    /// - Validation fails
    pub fn load(path: Option<&Path>) -> Result<Self, EngineError> {
        let mut config = match path {
            Some(path) => Self::read_file(path)?,
            None => match Self::default_config_path() {
                Some(default_path) if default_path.exists() => Self::read_file(&default_path)?,
                _ => {
                    tracing::debug!("No config file found, using defaults");
                    Self::default()
                }
            },
        };

        config.apply_env(|var| std::env::var(var).ok());
        config.validate_and_process()?;

        Ok(config)
    }

    /// Parse configuration from TOML text without validating it
    pub fn from_toml_str(contents: &str) -> Result<Self, EngineError> {
        toml::from_str(contents)
            .map_err(|e| EngineError::Config(format!("Failed to parse config: {}", e)))
    }

    fn read_file(path: &Path) -> Result<Self, EngineError> {
        let contents = fs::read_to_string(path)
            .map_err(|e| EngineError::Config(format!("Failed to read config file: {}", e)))?;

        tracing::debug!("Loaded config from {}", path.display());
        Self::from_toml_str(&contents)
    }

    /// Get the default configuration file path (~/.sisuu/config.toml)
    fn default_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".sisuu").join("config.toml"))
    }

    /// Apply environment overrides using `lookup` to read variables
    ///
    /// Blank values are treated as unset.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |var: &str| {
            lookup(var)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        if let Some(port) = get("PORT") {
            match port.parse() {
                Ok(port) => self.server.port = port,
                Err(_) => tracing::warn!("Ignoring invalid PORT value '{}'", port),
            }
        }

        if let Some(model) = get("OPENAI_MODEL") {
            self.llm.openai.model = model;
        }

        if let Some(url) = get("SUPABASE_URL") {
            self.storage.supabase.url = url;
        }

        if let Some(key) = get("OPENAI_API_KEY") {
            self.secrets.openai_api_key = Some(SecretString::new(key));
        }

        if let Some(key) = get("SUPABASE_ANON_KEY") {
            self.secrets.supabase_key = Some(SecretString::new(key));
        }
    }

    /// Validate and process configuration
    ///
    /// This method:
    /// - Validates the log level and port
    /// - Expands ~ in the SQLite path
    ///
    /// Secrets and the Supabase URL are checked where they are used, so
    /// `doctor` can report them instead of failing to load.
    pub fn validate_and_process(&mut self) -> Result<(), EngineError> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.core.log_level.as_str()) {
            return Err(EngineError::Config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.core.log_level,
                valid_log_levels.join(", ")
            )));
        }

        if self.server.port == 0 {
            return Err(EngineError::Config("server.port must not be 0".to_string()));
        }

        if self.llm.openai.model.trim().is_empty() {
            return Err(EngineError::Config(
                "llm.openai.model must not be empty".to_string(),
            ));
        }

        if self.storage.table.trim().is_empty() {
            return Err(EngineError::Config(
                "storage.table must not be empty".to_string(),
            ));
        }

        if self.storage.backend == StorageBackend::Sqlite {
            self.storage.sqlite.path = expand_path(&self.storage.sqlite.path)?;
        }

        Ok(())
    }
}

/// Expand ~ in path to user's home directory
fn expand_path(path: &Path) -> Result<PathBuf, EngineError> {
    let path_str = path
        .to_str()
        .ok_or_else(|| EngineError::Config("Invalid UTF-8 in path".to_string()))?;

    if let Some(rest) = path_str.strip_prefix("~/") {
        let home = dirs::home_dir()
            .ok_or_else(|| EngineError::Config("Could not determine home directory".to_string()))?;

        Ok(home.join(rest))
    } else if path_str == "~" {
        dirs::home_dir()
            .ok_or_else(|| EngineError::Config("Could not determine home directory".to_string()))
    } else {
        Ok(path.to_path_buf())
    }
}
