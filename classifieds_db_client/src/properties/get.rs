//! Property, binding and allowed value read operations.

use std::collections::HashMap;

use crate::error::ClassifiedsDatabaseError;
use models_classifieds::db;
use models_classifieds::service::{
    CategoryProperty, CategoryPropertySchema, CategoryPropertyValue, Property,
};
use sqlx::{Pool, Postgres};
use uuid::Uuid;

type Result<T> = std::result::Result<T, ClassifiedsDatabaseError>;

#[tracing::instrument(skip(db))]
pub async fn get_property(db: &Pool<Postgres>, property_id: Uuid) -> Result<Option<Property>> {
    let row = sqlx::query_as::<_, db::Property>(
        r#"
        SELECT id, name, data_type, created_at, updated_at
        FROM properties
        WHERE id = $1
        "#,
    )
    .bind(property_id)
    .fetch_optional(db)
    .await?;

    Ok(row.map(Property::from))
}

#[tracing::instrument(skip(db))]
pub async fn get_category_property(
    db: &Pool<Postgres>,
    category_property_id: Uuid,
) -> Result<Option<CategoryProperty>> {
    let row = sqlx::query_as::<_, db::CategoryProperty>(
        r#"
        SELECT id, category_id, property_id, required, created_at, updated_at
        FROM category_properties
        WHERE id = $1
        "#,
    )
    .bind(category_property_id)
    .fetch_optional(db)
    .await?;

    Ok(row.map(CategoryProperty::from))
}

#[tracing::instrument(skip(db))]
pub async fn get_category_property_value(
    db: &Pool<Postgres>,
    value_id: Uuid,
) -> Result<Option<CategoryPropertyValue>> {
    let row = sqlx::query_as::<_, db::CategoryPropertyValue>(
        r#"
        SELECT id, category_property_id, value, depends_on_id, depends_on_value_id,
               created_at, updated_at
        FROM category_property_values
        WHERE id = $1
        "#,
    )
    .bind(value_id)
    .fetch_optional(db)
    .await?;

    Ok(row.map(CategoryPropertyValue::from))
}

/// Bindings with their property and allowed values, for one category or for all of them.
///
/// Bindings are ordered by property name, allowed values by value.
#[tracing::instrument(skip(db))]
pub async fn get_category_property_schemas(
    db: &Pool<Postgres>,
    category_id: Option<Uuid>,
) -> Result<Vec<CategoryPropertySchema>> {
    let bound = sqlx::query_as::<_, db::BoundProperty>(
        r#"
        SELECT
            cp.id AS binding_id,
            cp.category_id,
            cp.required,
            cp.created_at AS binding_created_at,
            cp.updated_at AS binding_updated_at,
            p.id AS property_id,
            p.name AS property_name,
            p.data_type,
            p.created_at AS property_created_at,
            p.updated_at AS property_updated_at
        FROM category_properties cp
        JOIN properties p ON p.id = cp.property_id
        WHERE $1::uuid IS NULL OR cp.category_id = $1
        ORDER BY p.name, cp.id
        "#,
    )
    .bind(category_id)
    .fetch_all(db)
    .await?;

    if bound.is_empty() {
        return Ok(Vec::new());
    }

    let binding_ids: Vec<Uuid> = bound.iter().map(|b| b.binding_id).collect();

    let values = sqlx::query_as::<_, db::CategoryPropertyValue>(
        r#"
        SELECT id, category_property_id, value, depends_on_id, depends_on_value_id,
               created_at, updated_at
        FROM category_property_values
        WHERE category_property_id = ANY($1)
        ORDER BY value, id
        "#,
    )
    .bind(binding_ids)
    .fetch_all(db)
    .await?;

    let mut values_by_binding: HashMap<Uuid, Vec<CategoryPropertyValue>> = HashMap::new();
    for value in values {
        values_by_binding
            .entry(value.category_property_id)
            .or_default()
            .push(CategoryPropertyValue::from(value));
    }

    tracing::debug!(
        binding_count = bound.len(),
        "loaded category property schemas"
    );

    Ok(bound
        .into_iter()
        .map(|row| {
            let (binding, property) = row.into_parts();
            let values = values_by_binding.remove(&binding.id).unwrap_or_default();
            CategoryPropertySchema {
                binding,
                property,
                values,
            }
        })
        .collect())
}
