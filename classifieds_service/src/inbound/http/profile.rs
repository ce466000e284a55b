use axum::{Json, extract::State};
use models_classifieds::api::{ProfileResponse, UpdateProfileRequest};

use super::{ClassifiedsRouterState, HttpError, UserExtractor};
use crate::domain::ports::ClassifiedsService;

/// The caller's profile, created empty on first access
#[utoipa::path(
    get,
    tag = "profile",
    path = "/profile",
    responses(
        (status = 200, body = ProfileResponse),
        (status = 401, body = models_classifieds::api::ErrorResponse),
        (status = 404, body = models_classifieds::api::ErrorResponse),
        (status = 500, body = models_classifieds::api::ErrorResponse),
    )
)]
#[tracing::instrument(skip(state), fields(user_id = %user.user_id))]
pub async fn get_profile<T>(
    State(state): State<ClassifiedsRouterState<T>>,
    user: UserExtractor,
) -> Result<Json<ProfileResponse>, HttpError>
where
    T: ClassifiedsService,
{
    Ok(Json(state.service.get_profile(user.user_id).await?))
}

#[utoipa::path(
    patch,
    tag = "profile",
    path = "/profile",
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, body = ProfileResponse),
        (status = 400, body = models_classifieds::api::ValidationErrorResponse),
        (status = 401, body = models_classifieds::api::ErrorResponse),
        (status = 404, body = models_classifieds::api::ErrorResponse),
        (status = 500, body = models_classifieds::api::ErrorResponse),
    )
)]
#[tracing::instrument(skip(state, request), fields(user_id = %user.user_id))]
pub async fn update_profile<T>(
    State(state): State<ClassifiedsRouterState<T>>,
    user: UserExtractor,
    Json(request): Json<UpdateProfileRequest>,
) -> Result<Json<ProfileResponse>, HttpError>
where
    T: ClassifiedsService,
{
    Ok(Json(
        state.service.update_profile(user.user_id, request).await?,
    ))
}
