//! Core error types for butler-core.
//!
//! The compliance and streak engines are total and never fail; only the
//! store and configuration layers produce these errors.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for butler-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Day-record store errors
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV encoding errors
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Day-record store errors.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Failed to create or open the backing file
    #[error("Failed to open store at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write the backing file
    #[error("Failed to write store at {path}: {message}")]
    WriteFailed { path: PathBuf, message: String },

    /// The data directory could not be resolved
    #[error("Could not determine data directory")]
    NoDataDir,
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Unknown dot-path key
    #[error("unknown config key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

/// Validation errors raised at the point of entry.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Drink count arithmetic left the representable range
    #[error("Drink count overflow on {day}: {current} + {added}")]
    CountOverflow {
        day: chrono::NaiveDate,
        current: u32,
        added: u32,
    },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
