//! Error handling module for ClipKit

use thiserror::Error;

use crate::domain::errors::DomainError;

/// Main error type for ClipKit operations outside the per-item pipeline
#[derive(Error, Debug)]
pub enum ClipKitError {
    /// Input file or directory not found
    #[error("Input not found: {path}")]
    InputNotFound { path: String },

    /// Configuration could not be loaded or is invalid
    #[error("Invalid configuration: {message}")]
    ConfigError { message: String },

    /// Batch config file is unreadable or malformed
    #[error("Invalid batch config {path}: {message}")]
    BatchConfigError { path: String, message: String },

    /// Required external tool missing
    #[error("Missing dependency: {name}")]
    DependencyMissing { name: String },

    /// The background lane is already running a job
    #[error("A pipeline run is already in progress")]
    WorkerBusy,

    /// The background lane stopped before reporting completion
    #[error("Pipeline worker stopped unexpectedly")]
    WorkerStopped,

    /// Domain error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// YAML error
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// TOML parse error
    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),
}

/// Result type alias for ClipKit operations
pub type ClipKitResult<T> = std::result::Result<T, ClipKitError>;
