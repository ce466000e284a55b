use axum::{
    Json,
    extract::{Path, State},
};
use models_classifieds::api::{LocationNode, NamedItems};
use uuid::Uuid;

use super::{ClassifiedsRouterState, HttpError};
use crate::domain::ports::ClassifiedsService;

#[utoipa::path(
    get,
    tag = "lookups",
    path = "/ajax/locations",
    responses(
        (status = 200, body = NamedItems),
        (status = 500, body = models_classifieds::api::ErrorResponse),
    )
)]
#[tracing::instrument(skip(state))]
pub async fn list_locations<T>(
    State(state): State<ClassifiedsRouterState<T>>,
) -> Result<Json<NamedItems>, HttpError>
where
    T: ClassifiedsService,
{
    Ok(Json(state.service.list_locations().await?.into()))
}

#[utoipa::path(
    get,
    tag = "lookups",
    path = "/ajax/locations/{id}/cities",
    params(("id" = Uuid, Path, description = "Location id")),
    responses(
        (status = 200, body = NamedItems),
        (status = 500, body = models_classifieds::api::ErrorResponse),
    )
)]
#[tracing::instrument(skip(state))]
pub async fn list_cities<T>(
    State(state): State<ClassifiedsRouterState<T>>,
    Path(location_id): Path<Uuid>,
) -> Result<Json<NamedItems>, HttpError>
where
    T: ClassifiedsService,
{
    Ok(Json(state.service.list_cities(location_id).await?.into()))
}

#[utoipa::path(
    get,
    tag = "lookups",
    path = "/ajax/cities/{id}/neighbourhoods",
    params(("id" = Uuid, Path, description = "City id")),
    responses(
        (status = 200, body = NamedItems),
        (status = 500, body = models_classifieds::api::ErrorResponse),
    )
)]
#[tracing::instrument(skip(state))]
pub async fn list_neighbourhoods<T>(
    State(state): State<ClassifiedsRouterState<T>>,
    Path(city_id): Path<Uuid>,
) -> Result<Json<NamedItems>, HttpError>
where
    T: ClassifiedsService,
{
    Ok(Json(state.service.list_neighbourhoods(city_id).await?.into()))
}

/// Locations with their cities and neighbourhoods
#[utoipa::path(
    get,
    tag = "locations",
    path = "/locations/tree",
    responses(
        (status = 200, body = Vec<LocationNode>),
        (status = 500, body = models_classifieds::api::ErrorResponse),
    )
)]
#[tracing::instrument(skip(state))]
pub async fn location_tree<T>(
    State(state): State<ClassifiedsRouterState<T>>,
) -> Result<Json<Vec<LocationNode>>, HttpError>
where
    T: ClassifiedsService,
{
    Ok(Json(state.service.location_tree().await?))
}
