//! Caller identity taken from the `x-user-id` header set by the upstream gateway

use axum::{
    Json,
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::IntoResponse,
};
use models_classifieds::api::ErrorResponse;
use thiserror::Error;
use uuid::Uuid;

pub const USER_ID_HEADER: &str = "x-user-id";

#[derive(Debug, Error)]
pub enum UserExtractorErr {
    #[error("Authentication credentials were not provided")]
    Missing,
    #[error("Invalid user id: {0}")]
    InvalidId(#[from] uuid::Error),
    #[error("The user id header is not valid text")]
    NotText,
}

impl IntoResponse for UserExtractorErr {
    fn into_response(self) -> axum::response::Response {
        (
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse {
                message: &self.to_string(),
            }),
        )
            .into_response()
    }
}

fn user_id_from(parts: &Parts) -> Result<Option<Uuid>, UserExtractorErr> {
    let Some(value) = parts.headers.get(USER_ID_HEADER) else {
        return Ok(None);
    };
    let value = value.to_str().map_err(|_| UserExtractorErr::NotText)?;
    Ok(Some(Uuid::parse_str(value.trim())?))
}

/// An authenticated caller. Rejects with 401 when the header is missing or malformed.
#[derive(Debug, Clone, Copy)]
pub struct UserExtractor {
    pub user_id: Uuid,
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for UserExtractor
where
    S: Send + Sync,
{
    type Rejection = UserExtractorErr;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_id = user_id_from(parts)?.ok_or(UserExtractorErr::Missing)?;
        Ok(UserExtractor { user_id })
    }
}

/// The caller if one was identified. Malformed ids are still rejected.
#[derive(Debug, Clone, Copy)]
pub struct MaybeUser(pub Option<Uuid>);

#[axum::async_trait]
impl<S> FromRequestParts<S> for MaybeUser
where
    S: Send + Sync,
{
    type Rejection = UserExtractorErr;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        user_id_from(parts).map(MaybeUser)
    }
}
