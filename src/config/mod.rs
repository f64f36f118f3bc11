//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `NAVSENSE` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use navsense::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {:?}", config.server.socket_addr());
//! ```

mod ai;
mod error;
mod export;
mod server;

pub use ai::AiConfig;
pub use error::{ConfigError, ValidationError};
pub use export::ExportConfig;
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// Bare variable accepted as the backend credential when
/// `NAVSENSE__AI__API_KEY` is not set.
pub const API_KEY_ENV: &str = "API_KEY";

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
/// Every section has defaults, so an empty environment yields a runnable
/// (but unconfigured) service.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment, logging, CORS)
    #[serde(default)]
    pub server: ServerConfig,

    /// Generation backend configuration (Gemini)
    #[serde(default)]
    pub ai: AiConfig,

    /// Report export configuration (Pandoc)
    #[serde(default)]
    pub export: ExportConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Uses `API_KEY` as the default backend credential
    /// 3. Reads environment variables with `NAVSENSE` prefix
    /// 4. Uses `__` (double underscore) to separate nested values
    ///
    /// # Environment Variable Format
    ///
    /// - `NAVSENSE__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `NAVSENSE__AI__MODEL=...` -> `ai.model = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let mut builder = config::Config::builder();
        if let Some(key) = std::env::var(API_KEY_ENV).ok().filter(|k| !k.trim().is_empty()) {
            builder = builder.set_default("ai.api_key", key)?;
        }

        let config = builder
            .add_source(
                config::Environment::default()
                    .prefix("NAVSENSE")
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
    /// Returns `ValidationError` for the first invalid value found.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.ai.validate()?;
        self.export.validate()?;
        if self.ai.timeout_secs >= self.server.request_timeout_secs {
            return Err(ValidationError::AiTimeoutExceedsRequestTimeout {
                ai_secs: self.ai.timeout_secs,
                request_secs: self.server.request_timeout_secs,
            });
        }
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
