// src/error.rs

//! Unified error handling for the extractor application.
//!
//! Extraction itself never fails; these errors only come from the edges:
//! loading configuration, compiling pattern tables, and talking to a
//! notice collector.

use std::fmt;

use thiserror::Error;

/// Result type alias for extractor operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Regex pattern from a rule table failed to compile
    #[error("Invalid pattern '{pattern}': {message}")]
    Pattern { pattern: String, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Notice collector failed to list or resolve a notice
    #[error("Collector error for {context}: {message}")]
    Collector { context: String, message: String },
}

impl AppError {
    /// Create a pattern compilation error.
    pub fn pattern(pattern: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Pattern {
            pattern: pattern.into(),
            message: message.to_string(),
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a collector error with context.
    pub fn collector(context: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Collector {
            context: context.into(),
            message: message.to_string(),
        }
    }
}
