//! Error types for the disaster monitor
//!
//! One error enum for the library; the binary wraps it in `anyhow`.

use thiserror::Error;

/// Main error type for the monitor
#[derive(Error, Debug)]
pub enum MonitorError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Training data errors
    #[error("Dataset error: {0}")]
    DatasetError(String),

    /// Prediction requested before `fit`
    #[error("Model has not been fitted")]
    NotFitted,

    /// Feature vector width does not match the fitted model
    #[error("Feature width mismatch: expected {expected}, got {actual}")]
    FeatureMismatch { expected: usize, actual: usize },

    /// Label outside the two known classes
    #[error("Unknown label: {0}")]
    UnknownLabel(String),

    /// Alert store errors
    #[error("Alert store error: {0}")]
    StoreError(#[from] rusqlite::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type alias for monitor operations
pub type Result<T> = std::result::Result<T, MonitorError>;
