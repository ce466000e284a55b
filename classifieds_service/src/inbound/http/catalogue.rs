//! Category tree, catalogue administration and the category children lookup

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use models_classifieds::api::{
    AddAllowedValueRequest, AllowedValueResponse, BindPropertyRequest, CategoryNode,
    CategoryPropertyResponse, CategoryResponse, CreateCategoryRequest, CreatePropertyRequest,
    NamedItems, PropertyResponse, UpdateCategoryRequest,
};
use models_classifieds::service::NamedRef;
use uuid::Uuid;

use super::{ClassifiedsRouterState, HttpError};
use crate::domain::ports::ClassifiedsService;

/// All categories nested by parent, with their bound properties and allowed values
#[utoipa::path(
    get,
    tag = "catalogue",
    path = "/categories",
    responses(
        (status = 200, body = Vec<CategoryNode>),
        (status = 500, body = models_classifieds::api::ErrorResponse),
    )
)]
#[tracing::instrument(skip(state))]
pub async fn category_tree<T>(
    State(state): State<ClassifiedsRouterState<T>>,
) -> Result<Json<Vec<CategoryNode>>, HttpError>
where
    T: ClassifiedsService,
{
    Ok(Json(state.service.category_tree().await?))
}

/// Root to leaf path of a category
#[utoipa::path(
    get,
    tag = "catalogue",
    path = "/categories/{id}/hierarchy",
    params(("id" = Uuid, Path, description = "Category id")),
    responses(
        (status = 200, body = Vec<NamedRef>),
        (status = 404, body = models_classifieds::api::ErrorResponse),
        (status = 500, body = models_classifieds::api::ErrorResponse),
    )
)]
#[tracing::instrument(skip(state))]
pub async fn category_hierarchy<T>(
    State(state): State<ClassifiedsRouterState<T>>,
    Path(category_id): Path<Uuid>,
) -> Result<Json<Vec<NamedRef>>, HttpError>
where
    T: ClassifiedsService,
{
    Ok(Json(state.service.category_hierarchy(category_id).await?))
}

#[utoipa::path(
    post,
    tag = "catalogue",
    path = "/categories",
    request_body = CreateCategoryRequest,
    responses(
        (status = 201, body = CategoryResponse),
        (status = 400, body = models_classifieds::api::ValidationErrorResponse),
        (status = 500, body = models_classifieds::api::ErrorResponse),
    )
)]
#[tracing::instrument(skip(state))]
pub async fn create_category<T>(
    State(state): State<ClassifiedsRouterState<T>>,
    Json(request): Json<CreateCategoryRequest>,
) -> Result<(StatusCode, Json<CategoryResponse>), HttpError>
where
    T: ClassifiedsService,
{
    let category = state.service.create_category(request).await?;
    Ok((StatusCode::CREATED, Json(category.into())))
}

/// Partial update. Moving a category re-runs the cycle checks.
#[utoipa::path(
    patch,
    tag = "catalogue",
    path = "/categories/{id}",
    params(("id" = Uuid, Path, description = "Category id")),
    request_body = UpdateCategoryRequest,
    responses(
        (status = 200, body = CategoryResponse),
        (status = 400, body = models_classifieds::api::ValidationErrorResponse),
        (status = 404, body = models_classifieds::api::ErrorResponse),
        (status = 500, body = models_classifieds::api::ErrorResponse),
    )
)]
#[tracing::instrument(skip(state))]
pub async fn update_category<T>(
    State(state): State<ClassifiedsRouterState<T>>,
    Path(category_id): Path<Uuid>,
    Json(request): Json<UpdateCategoryRequest>,
) -> Result<Json<CategoryResponse>, HttpError>
where
    T: ClassifiedsService,
{
    let category = state.service.update_category(category_id, request).await?;
    Ok(Json(category.into()))
}

#[utoipa::path(
    post,
    tag = "catalogue",
    path = "/properties",
    request_body = CreatePropertyRequest,
    responses(
        (status = 201, body = PropertyResponse),
        (status = 400, body = models_classifieds::api::ValidationErrorResponse),
        (status = 500, body = models_classifieds::api::ErrorResponse),
    )
)]
#[tracing::instrument(skip(state))]
pub async fn create_property<T>(
    State(state): State<ClassifiedsRouterState<T>>,
    Json(request): Json<CreatePropertyRequest>,
) -> Result<(StatusCode, Json<PropertyResponse>), HttpError>
where
    T: ClassifiedsService,
{
    let property = state.service.create_property(request).await?;
    Ok((StatusCode::CREATED, Json(property.into())))
}

/// Bind a property to a leaf category
#[utoipa::path(
    post,
    tag = "catalogue",
    path = "/categories/{id}/properties",
    params(("id" = Uuid, Path, description = "Category id")),
    request_body = BindPropertyRequest,
    responses(
        (status = 201, body = CategoryPropertyResponse),
        (status = 400, body = models_classifieds::api::ValidationErrorResponse),
        (status = 404, body = models_classifieds::api::ErrorResponse),
        (status = 500, body = models_classifieds::api::ErrorResponse),
    )
)]
#[tracing::instrument(skip(state))]
pub async fn bind_property<T>(
    State(state): State<ClassifiedsRouterState<T>>,
    Path(category_id): Path<Uuid>,
    Json(request): Json<BindPropertyRequest>,
) -> Result<(StatusCode, Json<CategoryPropertyResponse>), HttpError>
where
    T: ClassifiedsService,
{
    let binding = state.service.bind_property(category_id, request).await?;
    Ok((StatusCode::CREATED, Json(binding.into())))
}

/// Add an allowed value to a choice binding
#[utoipa::path(
    post,
    tag = "catalogue",
    path = "/category-properties/{id}/values",
    params(("id" = Uuid, Path, description = "Category property id")),
    request_body = AddAllowedValueRequest,
    responses(
        (status = 201, body = AllowedValueResponse),
        (status = 400, body = models_classifieds::api::ValidationErrorResponse),
        (status = 404, body = models_classifieds::api::ErrorResponse),
        (status = 500, body = models_classifieds::api::ErrorResponse),
    )
)]
#[tracing::instrument(skip(state))]
pub async fn add_allowed_value<T>(
    State(state): State<ClassifiedsRouterState<T>>,
    Path(binding_id): Path<Uuid>,
    Json(request): Json<AddAllowedValueRequest>,
) -> Result<(StatusCode, Json<AllowedValueResponse>), HttpError>
where
    T: ClassifiedsService,
{
    let value = state.service.add_allowed_value(binding_id, request).await?;
    Ok((StatusCode::CREATED, Json(value.into())))
}

/// Active root categories
#[utoipa::path(
    get,
    tag = "lookups",
    path = "/ajax/categories/children",
    responses(
        (status = 200, body = NamedItems),
        (status = 500, body = models_classifieds::api::ErrorResponse),
    )
)]
#[tracing::instrument(skip(state))]
pub async fn root_categories<T>(
    State(state): State<ClassifiedsRouterState<T>>,
) -> Result<Json<NamedItems>, HttpError>
where
    T: ClassifiedsService,
{
    Ok(Json(state.service.category_children(None).await?.into()))
}

/// Active children of a category
#[utoipa::path(
    get,
    tag = "lookups",
    path = "/ajax/categories/{parent_id}/children",
    params(("parent_id" = Uuid, Path, description = "Parent category id")),
    responses(
        (status = 200, body = NamedItems),
        (status = 500, body = models_classifieds::api::ErrorResponse),
    )
)]
#[tracing::instrument(skip(state))]
pub async fn category_children<T>(
    State(state): State<ClassifiedsRouterState<T>>,
    Path(parent_id): Path<Uuid>,
) -> Result<Json<NamedItems>, HttpError>
where
    T: ClassifiedsService,
{
    Ok(Json(
        state
            .service
            .category_children(Some(parent_id))
            .await?
            .into(),
    ))
}
