//! Recovery errors

use thiserror::Error;

/// Errors from the recovery pipeline
#[derive(Debug, Error)]
pub enum RecoveryError {
    #[error("Transport send failed on {channel}: {reason}")]
    SendFailed { channel: String, reason: String },

    #[error("Recovery action not found: {0}")]
    ActionNotFound(String),

    #[error("Invalid status transition: {from} -> {to}")]
    InvalidTransition { from: String, to: String },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

/// Result type for recovery operations
pub type RecoveryResult<T> = Result<T, RecoveryError>;
