//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid bind address: {0}")]
    InvalidBindAddress(String),

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Invalid AI request timeout")]
    InvalidAiTimeout,

    #[error("Temperature must be between 0.0 and 2.0")]
    InvalidTemperature,

    #[error("AI base URL must use http or https")]
    InvalidBaseUrl,

    #[error("AI model name is empty")]
    EmptyModel,

    #[error("Invalid PDF conversion timeout")]
    InvalidPdfTimeout,

    #[error("Session TTL must be positive")]
    InvalidSessionTtl,

    #[error("Session limit must be positive")]
    InvalidMaxSessions,

    #[error("AI request timeout ({ai_secs}s) must be shorter than the request timeout ({request_secs}s)")]
    AiTimeoutExceedsRequestTimeout { ai_secs: u64, request_secs: u64 },
}
