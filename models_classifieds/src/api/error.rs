//! API error bodies

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::service::FormErrors;

/// A plain old json error response for use with axum.
#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct ErrorResponse<'a> {
    /// Message to explain failure
    pub message: &'a str,
}

/// Body returned when one or more composed forms fail validation.
#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct ValidationErrorResponse {
    pub message: String,
    pub errors: FormErrors,
}
