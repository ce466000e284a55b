//! Domain error types

use models_classifieds::service::FormErrors;
use thiserror::Error;

use crate::domain::ports::StorageError;

/// Domain-level errors for classifieds operations
#[derive(Debug, Error)]
pub enum ClassifiedsError {
    /// Resource not found
    #[error("{0}")]
    NotFound(String),

    /// One or more forms failed validation
    #[error("Validation failed")]
    Validation(FormErrors),

    /// A constraint rejected the write
    #[error("Integrity error: {0}")]
    Integrity(String),

    /// Internal error (wraps storage errors)
    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl ClassifiedsError {
    pub fn not_found(what: &str) -> Self {
        ClassifiedsError::NotFound(format!("{what} not found"))
    }

    /// Constraint violations become [ClassifiedsError::Integrity], everything else is internal
    pub fn from_storage<E: StorageError>(err: E) -> Self {
        if err.is_integrity_violation() {
            tracing::warn!(error = %err, "write rejected by a constraint");
            ClassifiedsError::Integrity(err.to_string())
        } else {
            ClassifiedsError::Internal(anyhow::Error::new(err))
        }
    }
}

impl From<FormErrors> for ClassifiedsError {
    fn from(errors: FormErrors) -> Self {
        ClassifiedsError::Validation(errors)
    }
}

/// Result type for domain operations
pub type Result<T> = std::result::Result<T, ClassifiedsError>;
