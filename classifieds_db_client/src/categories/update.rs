//! Category update operations.

use crate::error::ClassifiedsDatabaseError;
use models_classifieds::db;
use models_classifieds::service::Category;
use sqlx::{Pool, Postgres};

type Result<T> = std::result::Result<T, ClassifiedsDatabaseError>;

/// Overwrites the mutable fields of a category, returning `None` when it no longer exists.
#[tracing::instrument(skip(db, category), fields(category_id = %category.id))]
pub async fn update_category(db: &Pool<Postgres>, category: &Category) -> Result<Option<Category>> {
    let row = sqlx::query_as::<_, db::Category>(
        r#"
        UPDATE categories
        SET name = $2, parent_id = $3, image = $4, is_active = $5, updated_at = NOW()
        WHERE id = $1
        RETURNING id, name, parent_id, image, is_active, created_at, updated_at
        "#,
    )
    .bind(category.id)
    .bind(&category.name)
    .bind(category.parent_id)
    .bind(&category.image)
    .bind(category.is_active)
    .fetch_optional(db)
    .await?;

    Ok(row.map(Category::from))
}
