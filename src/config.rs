use crate::error::app_error::AppError;
use figment::{Figment, providers::{Env, Format, Toml}};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Config {
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
}

/// Key names used in the persisted session store. The consolidated record
/// lives under `user_key`; the remaining keys are the legacy per-field
/// entries kept for backward compatibility with older clients.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct StorageConfig {
    pub user_key: String,
    pub token_key: String,
    pub role_key: String,
    pub user_id_key: String,
    pub email_key: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub json_format: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            user_key: "user".to_string(),
            token_key: "token".to_string(),
            role_key: "role".to_string(),
            user_id_key: "userId".to_string(),
            email_key: "email".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_format: false,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage: StorageConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from multiple sources in priority order:
    /// 1. Campus.toml (base configuration file)
    /// 2. Environment variables (prefixed with CAMPUS_)
    pub fn load() -> Result<Self, AppError> {
        let figment = Figment::new()
            // Start with defaults
            .merge(Toml::string(&toml::to_string(&Config::default()).unwrap()).nested())
            // Layer on Campus.toml if it exists
            .merge(Toml::file("Campus.toml").nested())
            // Layer on environment variables (e.g., CAMPUS_LOGGING_LEVEL)
            .merge(Env::prefixed("CAMPUS_").split("_"));

        figment.extract().map_err(AppError::from)
    }
}
