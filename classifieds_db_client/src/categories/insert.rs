//! Category insert operations.

use crate::error::ClassifiedsDatabaseError;
use models_classifieds::db;
use models_classifieds::service::Category;
use sqlx::{Pool, Postgres};

type Result<T> = std::result::Result<T, ClassifiedsDatabaseError>;

/// Inserts a category. Parent validity is checked by the caller.
#[tracing::instrument(skip(db, category), fields(category_id = %category.id))]
pub async fn insert_category(db: &Pool<Postgres>, category: &Category) -> Result<Category> {
    let row = sqlx::query_as::<_, db::Category>(
        r#"
        INSERT INTO categories (id, name, parent_id, image, is_active, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING id, name, parent_id, image, is_active, created_at, updated_at
        "#,
    )
    .bind(category.id)
    .bind(&category.name)
    .bind(category.parent_id)
    .bind(&category.image)
    .bind(category.is_active)
    .bind(category.created_at)
    .bind(category.updated_at)
    .fetch_one(db)
    .await?;

    tracing::info!(category_id = %row.id, "inserted category");

    Ok(Category::from(row))
}

#[cfg(all(test, feature = "postgres_test"))]
mod tests {
    use super::*;
    use crate::MIGRATIONS;

    #[sqlx::test(migrator = "MIGRATIONS")]
    async fn test_insert_category(pool: Pool<Postgres>) -> anyhow::Result<()> {
        let root = Category::new("Vehicles".to_string(), None);
        let child = Category::new("Cars".to_string(), Some(root.id));

        insert_category(&pool, &root).await?;
        let inserted = insert_category(&pool, &child).await?;

        assert_eq!(inserted.parent_id, Some(root.id));
        assert!(inserted.is_active);

        Ok(())
    }
}
