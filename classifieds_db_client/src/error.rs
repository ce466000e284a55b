//! Database errors for classifieds operations

use thiserror::Error;

/// Errors that can occur during database operations
#[derive(Debug, Error)]
pub enum ClassifiedsDatabaseError {
    #[error("Database conversion error: {0}")]
    Conversion(#[from] models_classifieds::db::DbConversionError),

    #[error("Query error: {0}")]
    Query(#[from] sqlx::Error),
}

impl ClassifiedsDatabaseError {
    /// Unique, foreign key or check constraint rejected the write
    pub fn is_integrity_violation(&self) -> bool {
        match self {
            ClassifiedsDatabaseError::Query(sqlx::Error::Database(e)) => {
                e.is_unique_violation() || e.is_foreign_key_violation() || e.is_check_violation()
            }
            _ => false,
        }
    }
}
