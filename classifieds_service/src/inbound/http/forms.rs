use axum::{
    Json,
    extract::{Query, State},
};
use models_classifieds::api::{PropertyFormQuery, PropertyFormResponse};

use super::{ClassifiedsRouterState, HttpError, UserExtractor};
use crate::domain::ports::ClassifiedsService;

/// Field descriptors of the dynamic property form for one category.
/// Unknown or missing categories give an empty form.
#[utoipa::path(
    get,
    tag = "lookups",
    path = "/ajax/property-form",
    params(PropertyFormQuery),
    responses(
        (status = 200, body = PropertyFormResponse),
        (status = 401, body = models_classifieds::api::ErrorResponse),
        (status = 500, body = models_classifieds::api::ErrorResponse),
    )
)]
#[tracing::instrument(skip(state), fields(user_id = %user.user_id))]
pub async fn property_form<T>(
    State(state): State<ClassifiedsRouterState<T>>,
    user: UserExtractor,
    Query(query): Query<PropertyFormQuery>,
) -> Result<Json<PropertyFormResponse>, HttpError>
where
    T: ClassifiedsService,
{
    Ok(Json(state.service.property_form(user.user_id, query).await?))
}
