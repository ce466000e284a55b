//! Category read operations.

use crate::error::ClassifiedsDatabaseError;
use models_classifieds::db;
use models_classifieds::service::Category;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

type Result<T> = std::result::Result<T, ClassifiedsDatabaseError>;

/// All categories ordered by name. The tree is assembled by the caller.
#[tracing::instrument(skip(db))]
pub async fn get_categories(db: &Pool<Postgres>) -> Result<Vec<Category>> {
    let rows = sqlx::query_as::<_, db::Category>(
        r#"
        SELECT id, name, parent_id, image, is_active, created_at, updated_at
        FROM categories
        ORDER BY name, id
        "#,
    )
    .fetch_all(db)
    .await?;

    Ok(rows.into_iter().map(Category::from).collect())
}

#[tracing::instrument(skip(db))]
pub async fn get_category(db: &Pool<Postgres>, category_id: Uuid) -> Result<Option<Category>> {
    let row = sqlx::query_as::<_, db::Category>(
        r#"
        SELECT id, name, parent_id, image, is_active, created_at, updated_at
        FROM categories
        WHERE id = $1
        "#,
    )
    .bind(category_id)
    .fetch_optional(db)
    .await?;

    Ok(row.map(Category::from))
}

/// Children of `parent_id`, or the roots when no parent is given.
#[tracing::instrument(skip(db))]
pub async fn get_category_children(
    db: &Pool<Postgres>,
    parent_id: Option<Uuid>,
) -> Result<Vec<Category>> {
    let rows = sqlx::query_as::<_, db::Category>(
        r#"
        SELECT id, name, parent_id, image, is_active, created_at, updated_at
        FROM categories
        WHERE parent_id IS NOT DISTINCT FROM $1
        ORDER BY name, id
        "#,
    )
    .bind(parent_id)
    .fetch_all(db)
    .await?;

    Ok(rows.into_iter().map(Category::from).collect())
}

/// Whether any ad or property binding is attached to the category
#[tracing::instrument(skip(db))]
pub async fn category_is_in_use(db: &Pool<Postgres>, category_id: Uuid) -> Result<bool> {
    let in_use: bool = sqlx::query_scalar(
        r#"
        SELECT EXISTS (SELECT 1 FROM ads WHERE category_id = $1)
            OR EXISTS (SELECT 1 FROM category_properties WHERE category_id = $1)
        "#,
    )
    .bind(category_id)
    .fetch_one(db)
    .await?;

    Ok(in_use)
}
