use axum::{
    Json,
    extract::{Path, State},
};
use models_classifieds::search::AdSearchDocument;
use uuid::Uuid;

use super::{ClassifiedsRouterState, HttpError};
use crate::domain::ports::ClassifiedsService;

/// Document for the external search indexer
#[utoipa::path(
    get,
    tag = "internal",
    path = "/internal/ads/{id}/search-document",
    params(("id" = Uuid, Path, description = "Ad id")),
    responses(
        (status = 200, body = AdSearchDocument),
        (status = 404, body = models_classifieds::api::ErrorResponse),
        (status = 500, body = models_classifieds::api::ErrorResponse),
    )
)]
#[tracing::instrument(skip(state))]
pub async fn search_document<T>(
    State(state): State<ClassifiedsRouterState<T>>,
    Path(ad_id): Path<Uuid>,
) -> Result<Json<AdSearchDocument>, HttpError>
where
    T: ClassifiedsService,
{
    Ok(Json(state.service.search_document(ad_id).await?))
}
