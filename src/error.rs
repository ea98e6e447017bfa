// src/error.rs

//! Unified error handling for the alert application.

use std::fmt;

use thiserror::Error;

/// Result type alias for alert operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// Atom feed parsing failed
    #[error("Feed parse error: {0}")]
    Feed(String),

    /// Email rendering or delivery failed
    #[error("Email error: {0}")]
    Email(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Fetching papers from a source failed
    #[error("Fetch error for {context}: {message}")]
    Fetch { context: String, message: String },
}

impl AppError {
    /// Create a feed parsing error.
    pub fn feed(message: impl fmt::Display) -> Self {
        Self::Feed(message.to_string())
    }

    /// Create an email error.
    pub fn email(message: impl fmt::Display) -> Self {
        Self::Email(message.to_string())
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a fetch error with context.
    pub fn fetch(context: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Fetch {
            context: context.into(),
            message: message.to_string(),
        }
    }
}
