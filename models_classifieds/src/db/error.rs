//! Database layer conversion errors

use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur during database model conversions
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DbConversionError {
    #[error("Invalid database state: profile of user {user_id} has unknown gender code {code:?}")]
    UnknownGender { user_id: Uuid, code: String },
}
