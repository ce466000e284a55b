//! Catalogue administration: categories, properties, bindings and allowed values

use models_classifieds::api::{
    AddAllowedValueRequest, BindPropertyRequest, CreateCategoryRequest, CreatePropertyRequest,
    UpdateCategoryRequest,
};
use models_classifieds::service::{
    Category, CategoryProperty, CategoryPropertyValue, FormErrors, Property,
};
use models_classifieds::DataType;
use uuid::Uuid;

use super::ClassifiedsServiceImpl;
use crate::domain::{
    error::{ClassifiedsError, Result},
    models::CategoryTree,
    ports::{ClassifiedsStorage, ConfirmationQueue},
};

const CATEGORY_NAME_MAX_CHARS: usize = 96;
const PROPERTY_NAME_MAX_CHARS: usize = 64;
const VALUE_MAX_CHARS: usize = 128;

const INVALID_CHOICE: &str =
    "Select a valid choice. That choice is not one of the available choices.";

/// Trimmed, non-empty and at most `max` characters
fn clean_name(errors: &mut FormErrors, field: &str, value: &str, max: usize) -> String {
    let value = value.trim();
    let count = value.chars().count();
    if value.is_empty() {
        errors.add_field(field, "This field is required.");
    } else if count > max {
        errors.add_field(
            field,
            format!("Ensure this value has at most {max} characters (it has {count})."),
        );
    }
    value.to_string()
}

/// Parent checks shared by create and update
async fn check_parent<S, Q>(
    service: &ClassifiedsServiceImpl<S, Q>,
    tree: &CategoryTree,
    errors: &mut FormErrors,
    category_id: Uuid,
    parent_id: Option<Uuid>,
) -> Result<()>
where
    S: ClassifiedsStorage,
    Q: ConfirmationQueue,
{
    if let Err(e) = tree.validate_parent(category_id, parent_id) {
        tracing::warn!(%category_id, ?parent_id, error = %e, "rejected category parent");
        errors.add_field("parent_id", e.to_string());
        return Ok(());
    }

    if let Some(parent_id) = parent_id {
        let in_use = service
            .storage
            .category_in_use(parent_id)
            .await
            .map_err(ClassifiedsError::from_storage)?;
        if in_use {
            errors.add_field(
                "parent_id",
                "A category holding ads or properties cannot have subcategories.",
            );
        }
    }

    Ok(())
}

#[tracing::instrument(skip(service))]
pub(super) async fn create_category<S, Q>(
    service: &ClassifiedsServiceImpl<S, Q>,
    request: CreateCategoryRequest,
) -> Result<Category>
where
    S: ClassifiedsStorage,
    Q: ConfirmationQueue,
{
    let mut errors = FormErrors::new();
    let name = clean_name(&mut errors, "name", &request.name, CATEGORY_NAME_MAX_CHARS);

    let mut category = Category::new(name, request.parent_id);
    category.image = request.image;
    category.is_active = request.is_active;

    let tree = service.load_tree().await?;
    check_parent(service, &tree, &mut errors, category.id, category.parent_id).await?;
    errors.into_result()?;

    let category = service
        .storage
        .insert_category(category)
        .await
        .map_err(ClassifiedsError::from_storage)?;

    tracing::info!(category_id = %category.id, "created category");
    Ok(category)
}

#[tracing::instrument(skip(service))]
pub(super) async fn update_category<S, Q>(
    service: &ClassifiedsServiceImpl<S, Q>,
    category_id: Uuid,
    request: UpdateCategoryRequest,
) -> Result<Category>
where
    S: ClassifiedsStorage,
    Q: ConfirmationQueue,
{
    let tree = service.load_tree().await?;
    let mut category = tree
        .get(category_id)
        .cloned()
        .ok_or_else(|| ClassifiedsError::not_found("Category"))?;

    let mut errors = FormErrors::new();
    if let Some(name) = &request.name {
        category.name = clean_name(&mut errors, "name", name, CATEGORY_NAME_MAX_CHARS);
    }
    if let Some(is_active) = request.is_active {
        category.is_active = is_active;
    }
    if let Some(image) = request.image {
        category.image = image;
    }
    if let Some(parent_id) = request.parent_id {
        if parent_id != category.parent_id {
            check_parent(service, &tree, &mut errors, category.id, parent_id).await?;
        }
        category.parent_id = parent_id;
    }
    errors.into_result()?;

    let category = service
        .storage
        .update_category(category)
        .await
        .map_err(ClassifiedsError::from_storage)?
        .ok_or_else(|| ClassifiedsError::not_found("Category"))?;

    tracing::info!(category_id = %category.id, "updated category");
    Ok(category)
}

#[tracing::instrument(skip(service))]
pub(super) async fn create_property<S, Q>(
    service: &ClassifiedsServiceImpl<S, Q>,
    request: CreatePropertyRequest,
) -> Result<Property>
where
    S: ClassifiedsStorage,
    Q: ConfirmationQueue,
{
    let mut errors = FormErrors::new();
    let name = clean_name(&mut errors, "name", &request.name, PROPERTY_NAME_MAX_CHARS);
    errors.into_result()?;

    let property = service
        .storage
        .insert_property(Property::new(name, request.data_type))
        .await
        .map_err(ClassifiedsError::from_storage)?;

    tracing::info!(property_id = %property.id, data_type = ?property.data_type, "created property");
    Ok(property)
}

#[tracing::instrument(skip(service))]
pub(super) async fn bind_property<S, Q>(
    service: &ClassifiedsServiceImpl<S, Q>,
    category_id: Uuid,
    request: BindPropertyRequest,
) -> Result<CategoryProperty>
where
    S: ClassifiedsStorage,
    Q: ConfirmationQueue,
{
    let tree = service.load_tree().await?;
    if tree.get(category_id).is_none() {
        return Err(ClassifiedsError::not_found("Category"));
    }

    let mut errors = FormErrors::new();
    if !tree.is_leaf(category_id) {
        errors.add_non_field("Properties can only be bound to leaf categories.");
    }

    let property = service
        .storage
        .get_property(request.property_id)
        .await
        .map_err(ClassifiedsError::from_storage)?;
    if property.is_none() {
        errors.add_field("property_id", INVALID_CHOICE);
    }
    errors.into_result()?;

    let binding = service
        .storage
        .insert_category_property(CategoryProperty::new(
            category_id,
            request.property_id,
            request.required,
        ))
        .await
        .map_err(ClassifiedsError::from_storage)?;

    tracing::info!(binding_id = %binding.id, "bound property to category");
    Ok(binding)
}

#[tracing::instrument(skip(service))]
pub(super) async fn add_allowed_value<S, Q>(
    service: &ClassifiedsServiceImpl<S, Q>,
    binding_id: Uuid,
    request: AddAllowedValueRequest,
) -> Result<CategoryPropertyValue>
where
    S: ClassifiedsStorage,
    Q: ConfirmationQueue,
{
    let binding = service
        .storage
        .get_category_property(binding_id)
        .await
        .map_err(ClassifiedsError::from_storage)?
        .ok_or_else(|| ClassifiedsError::not_found("Category property"))?;

    let property = service
        .storage
        .get_property(binding.property_id)
        .await
        .map_err(ClassifiedsError::from_storage)?
        .ok_or_else(|| {
            ClassifiedsError::Internal(anyhow::anyhow!(
                "binding {binding_id} references a missing property"
            ))
        })?;

    let mut errors = FormErrors::new();
    if property.data_type != DataType::Choice {
        errors.add_non_field("Allowed values can only be added to choice properties.");
    }
    let value = clean_name(&mut errors, "value", &request.value, VALUE_MAX_CHARS);

    let mut allowed = CategoryPropertyValue::new(binding.id, value);

    if let Some(depends_on_value_id) = request.depends_on_value_id {
        let dependency = service
            .storage
            .get_category_property_value(depends_on_value_id)
            .await
            .map_err(ClassifiedsError::from_storage)?;

        let dependency_binding = match &dependency {
            Some(dep) => service
                .storage
                .get_category_property(dep.category_property_id)
                .await
                .map_err(ClassifiedsError::from_storage)?,
            None => None,
        };

        match (dependency, dependency_binding) {
            (Some(dep), Some(dep_binding))
                if dep_binding.id != binding.id
                    && dep_binding.category_id == binding.category_id =>
            {
                allowed = allowed.depending_on(&dep);
            }
            _ => errors.add_field(
                "depends_on_value_id",
                "Depend on a value of another property of the same category.",
            ),
        }
    }
    errors.into_result()?;

    let allowed = service
        .storage
        .insert_category_property_value(allowed)
        .await
        .map_err(ClassifiedsError::from_storage)?;

    tracing::info!(value_id = %allowed.id, %binding_id, "added allowed value");
    Ok(allowed)
}
