use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use models_classifieds::api::{AdDetailResponse, AdPage, AdSubmission, ListAdsQuery};
use uuid::Uuid;

use super::{ClassifiedsRouterState, HttpError, MaybeUser, UserExtractor};
use crate::domain::ports::ClassifiedsService;

/// One page of ads, newest first
#[utoipa::path(
    get,
    tag = "ads",
    path = "/ads",
    params(ListAdsQuery),
    responses(
        (status = 200, body = AdPage),
        (status = 500, body = models_classifieds::api::ErrorResponse),
    )
)]
#[tracing::instrument(skip(state))]
pub async fn list_ads<T>(
    State(state): State<ClassifiedsRouterState<T>>,
    Query(query): Query<ListAdsQuery>,
) -> Result<Json<AdPage>, HttpError>
where
    T: ClassifiedsService,
{
    Ok(Json(state.service.list_ads(query).await?))
}

/// A single ad. The owner's phone number is only returned to authenticated callers.
#[utoipa::path(
    get,
    tag = "ads",
    path = "/ads/{id}",
    params(("id" = Uuid, Path, description = "Ad id")),
    responses(
        (status = 200, body = AdDetailResponse),
        (status = 404, body = models_classifieds::api::ErrorResponse),
        (status = 500, body = models_classifieds::api::ErrorResponse),
    )
)]
#[tracing::instrument(skip(state))]
pub async fn get_ad<T>(
    State(state): State<ClassifiedsRouterState<T>>,
    MaybeUser(viewer): MaybeUser,
    Path(ad_id): Path<Uuid>,
) -> Result<Json<AdDetailResponse>, HttpError>
where
    T: ClassifiedsService,
{
    Ok(Json(state.service.get_ad(ad_id, viewer).await?))
}

#[utoipa::path(
    post,
    tag = "ads",
    path = "/ads",
    request_body = AdSubmission,
    responses(
        (status = 201, body = AdDetailResponse),
        (status = 400, body = models_classifieds::api::ValidationErrorResponse),
        (status = 401, body = models_classifieds::api::ErrorResponse),
        (status = 500, body = models_classifieds::api::ErrorResponse),
    )
)]
#[tracing::instrument(skip(state, submission), fields(user_id = %user.user_id))]
pub async fn create_ad<T>(
    State(state): State<ClassifiedsRouterState<T>>,
    user: UserExtractor,
    Json(submission): Json<AdSubmission>,
) -> Result<(StatusCode, Json<AdDetailResponse>), HttpError>
where
    T: ClassifiedsService,
{
    let ad = state.service.create_ad(user.user_id, submission).await?;
    Ok((StatusCode::CREATED, Json(ad)))
}

/// Replace an ad owned by the caller
#[utoipa::path(
    put,
    tag = "ads",
    path = "/ads/{id}",
    params(("id" = Uuid, Path, description = "Ad id")),
    request_body = AdSubmission,
    responses(
        (status = 200, body = AdDetailResponse),
        (status = 400, body = models_classifieds::api::ValidationErrorResponse),
        (status = 401, body = models_classifieds::api::ErrorResponse),
        (status = 404, body = models_classifieds::api::ErrorResponse),
        (status = 500, body = models_classifieds::api::ErrorResponse),
    )
)]
#[tracing::instrument(skip(state, submission), fields(user_id = %user.user_id))]
pub async fn update_ad<T>(
    State(state): State<ClassifiedsRouterState<T>>,
    user: UserExtractor,
    Path(ad_id): Path<Uuid>,
    Json(submission): Json<AdSubmission>,
) -> Result<Json<AdDetailResponse>, HttpError>
where
    T: ClassifiedsService,
{
    Ok(Json(
        state
            .service
            .update_ad(user.user_id, ad_id, submission)
            .await?,
    ))
}

#[utoipa::path(
    delete,
    tag = "ads",
    path = "/ads/{id}",
    params(("id" = Uuid, Path, description = "Ad id")),
    responses(
        (status = 204),
        (status = 401, body = models_classifieds::api::ErrorResponse),
        (status = 404, body = models_classifieds::api::ErrorResponse),
        (status = 500, body = models_classifieds::api::ErrorResponse),
    )
)]
#[tracing::instrument(skip(state), fields(user_id = %user.user_id))]
pub async fn delete_ad<T>(
    State(state): State<ClassifiedsRouterState<T>>,
    user: UserExtractor,
    Path(ad_id): Path<Uuid>,
) -> Result<StatusCode, HttpError>
where
    T: ClassifiedsService,
{
    state.service.delete_ad(user.user_id, ad_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
