//! Escalation errors

use thiserror::Error;

/// Errors from the escalation router
#[derive(Debug, Error)]
pub enum EscalationError {
    #[error("Escalation not found: {0}")]
    EscalationNotFound(String),

    #[error("Escalation already resolved: {0}")]
    AlreadyResolved(String),

    #[error("Staff member not found: {0}")]
    StaffNotFound(String),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

/// Result type for escalation operations
pub type EscalationResult<T> = Result<T, EscalationError>;
