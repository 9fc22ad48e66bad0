//! Application configuration module
//!
//! Type-safe configuration loaded from environment variables using the
//! `config` and `dotenvy` crates. Variables carry the `ALLERGY_CARD` prefix
//! and nested values use double underscores as separators.
//!
//! Every section has defaults, so an empty environment yields a working
//! setup: in-memory storage, translation disabled, `info` logging.
//!
//! # Example
//!
//! ```no_run
//! use allergy_card::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod error;
mod logging;
mod storage;
mod translation;

pub use error::{ConfigError, ValidationError};
pub use logging::LoggingConfig;
pub use storage::{StorageBackend, StorageConfig};
pub use translation::{TranslationConfig, MAX_RETRIES_LIMIT};

use serde::Deserialize;

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "ALLERGY_CARD";

/// Root application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Translation endpoint (OpenAI-compatible)
    #[serde(default)]
    pub translation: TranslationConfig,

    /// Where cards are kept
    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `ALLERGY_CARD` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `ALLERGY_CARD__TRANSLATION__API_KEY=sk-...` -> `translation.api_key`
    /// - `ALLERGY_CARD__STORAGE__BACKEND=file` -> `storage.backend`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix(ENV_PREFIX)
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` for the first invalid section.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.translation.validate()?;
        self.storage.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}
