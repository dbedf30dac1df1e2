//! Learning errors

use thiserror::Error;

/// Errors from the learning loop
#[derive(Debug, Error)]
pub enum LearningError {
    #[error("Fraud case not found: {0}")]
    CaseNotFound(String),

    #[error("Case already reviewed: {0}")]
    CaseAlreadyReviewed(String),

    #[error("Case has no reviewer decision yet: {0}")]
    CaseNotReviewed(String),

    #[error("Feedback not found: {0}")]
    FeedbackNotFound(String),

    #[error("Failed to write to learning ledger: {0}")]
    LedgerWriteError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

/// Result type for learning operations
pub type LearningResult<T> = Result<T, LearningError>;
