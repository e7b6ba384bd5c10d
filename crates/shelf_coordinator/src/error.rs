//! Coordinator error types

use thiserror::Error;

/// Coordinator-related errors
#[derive(Error, Debug)]
pub enum ShelfError {
    /// Failed to read a configuration file
    #[error("Failed to read config: {0}")]
    ConfigRead(#[from] std::io::Error),

    /// Configuration file is not valid TOML for [`CoordinatorConfig`](crate::CoordinatorConfig)
    #[error("Failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Configuration parsed but holds unusable values
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// Saved position could not be encoded or decoded
    #[error("Saved position error: {0}")]
    SavedState(#[from] serde_json::Error),

    /// Saved position was written by a format version we don't understand
    #[error("Unsupported saved position version: {0}")]
    UnsupportedVersion(u32),
}

/// Result type for coordinator operations
pub type Result<T> = std::result::Result<T, ShelfError>;
