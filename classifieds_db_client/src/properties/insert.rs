//! Property, binding and allowed value insert operations.

use crate::error::ClassifiedsDatabaseError;
use models_classifieds::db;
use models_classifieds::service::{CategoryProperty, CategoryPropertyValue, Property};
use sqlx::{Pool, Postgres};

type Result<T> = std::result::Result<T, ClassifiedsDatabaseError>;

#[tracing::instrument(skip(db, property), fields(property_id = %property.id))]
pub async fn insert_property(db: &Pool<Postgres>, property: &Property) -> Result<Property> {
    let row = sqlx::query_as::<_, db::Property>(
        r#"
        INSERT INTO properties (id, name, data_type, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, name, data_type, created_at, updated_at
        "#,
    )
    .bind(property.id)
    .bind(&property.name)
    .bind(property.data_type)
    .bind(property.created_at)
    .bind(property.updated_at)
    .fetch_one(db)
    .await?;

    Ok(Property::from(row))
}

/// Binds a property to a category. A second binding of the same pair violates
/// `category_properties_unique`.
#[tracing::instrument(skip(db, binding), fields(category_id = %binding.category_id, property_id = %binding.property_id))]
pub async fn insert_category_property(
    db: &Pool<Postgres>,
    binding: &CategoryProperty,
) -> Result<CategoryProperty> {
    let row = sqlx::query_as::<_, db::CategoryProperty>(
        r#"
        INSERT INTO category_properties (id, category_id, property_id, required, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id, category_id, property_id, required, created_at, updated_at
        "#,
    )
    .bind(binding.id)
    .bind(binding.category_id)
    .bind(binding.property_id)
    .bind(binding.required)
    .bind(binding.created_at)
    .bind(binding.updated_at)
    .fetch_one(db)
    .await?;

    Ok(CategoryProperty::from(row))
}

#[tracing::instrument(skip(db, value), fields(category_property_id = %value.category_property_id))]
pub async fn insert_category_property_value(
    db: &Pool<Postgres>,
    value: &CategoryPropertyValue,
) -> Result<CategoryPropertyValue> {
    let row = sqlx::query_as::<_, db::CategoryPropertyValue>(
        r#"
        INSERT INTO category_property_values (
            id, category_property_id, value, depends_on_id, depends_on_value_id,
            created_at, updated_at
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING id, category_property_id, value, depends_on_id, depends_on_value_id,
                  created_at, updated_at
        "#,
    )
    .bind(value.id)
    .bind(value.category_property_id)
    .bind(&value.value)
    .bind(value.depends_on_id)
    .bind(value.depends_on_value_id)
    .bind(value.created_at)
    .bind(value.updated_at)
    .fetch_one(db)
    .await?;

    Ok(CategoryPropertyValue::from(row))
}
