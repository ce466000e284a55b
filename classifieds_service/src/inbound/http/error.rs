use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use models_classifieds::api::{ErrorResponse, ValidationErrorResponse};
use models_classifieds::service::FormErrors;
use thiserror::Error;

use crate::domain::error::ClassifiedsError;

const INTERNAL_MESSAGE: &str = "An internal server error has occurred";

#[derive(Debug, Error)]
pub enum HttpError {
    #[error("{0}")]
    NotFound(String),
    #[error("Validation failed")]
    Validation(FormErrors),
    #[error("An internal server error has occurred")]
    Internal(anyhow::Error),
}

impl From<ClassifiedsError> for HttpError {
    fn from(err: ClassifiedsError) -> Self {
        match err {
            ClassifiedsError::NotFound(msg) => HttpError::NotFound(msg),
            ClassifiedsError::Validation(errors) => HttpError::Validation(errors),
            ClassifiedsError::Integrity(msg) => HttpError::Validation(FormErrors::non_field(msg)),
            ClassifiedsError::Internal(e) => HttpError::Internal(e),
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        match self {
            HttpError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse { message: &msg }),
            )
                .into_response(),
            HttpError::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                Json(ValidationErrorResponse {
                    message: "Validation failed".to_string(),
                    errors,
                }),
            )
                .into_response(),
            HttpError::Internal(err) => {
                tracing::error!(error = ?err, "internal error while handling request");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse {
                        message: INTERNAL_MESSAGE,
                    }),
                )
                    .into_response()
            }
        }
    }
}
