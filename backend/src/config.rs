//! Configuration management for the FarmConnect server
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides such as `FC__SERVER__PORT`; the
//!    environment name itself comes from `FC_ENVIRONMENT`

use std::path::PathBuf;

use config::{ConfigError, Environment, File};
use serde::Deserialize;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Profile document storage
    pub storage: StorageConfig,

    /// Google Document AI settings for Aadhaar OCR
    #[serde(default)]
    pub document_ai: DocumentAiConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    /// Directory holding `farmers.json` and `distributors.json`
    pub data_dir: PathBuf,
}

/// The provider is used only when project, processor and token are all set
#[derive(Debug, Deserialize, Clone)]
pub struct DocumentAiConfig {
    /// Override for the API base URL, e.g. a local emulator
    pub endpoint: Option<String>,

    pub project_id: Option<String>,

    /// Processor region
    #[serde(default = "default_document_ai_location")]
    pub location: String,

    pub processor_id: Option<String>,

    /// OAuth bearer token
    pub access_token: Option<String>,
}

fn default_document_ai_location() -> String {
    "us".to_string()
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment = std::env::var("FC_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 3000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("storage.data_dir", "db")?
            .set_default("document_ai.location", "us")?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (FC__SECTION__KEY)
            .add_source(
                Environment::with_prefix("FC")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            server: ServerConfig::default(),
            storage: StorageConfig::default(),
            document_ai: DocumentAiConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            host: "0.0.0.0".to_string(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("db"),
        }
    }
}

impl Default for DocumentAiConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            project_id: None,
            location: default_document_ai_location(),
            processor_id: None,
            access_token: None,
        }
    }
}
