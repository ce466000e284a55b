//! Ad delete operations.

use crate::error::ClassifiedsDatabaseError;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

type Result<T> = std::result::Result<T, ClassifiedsDatabaseError>;

/// Deletes an ad owned by `user_id`. Images and property values cascade.
/// Returns false when no such ad exists for that owner.
#[tracing::instrument(skip(db))]
pub async fn delete_ad(db: &Pool<Postgres>, ad_id: Uuid, user_id: Uuid) -> Result<bool> {
    let result = sqlx::query("DELETE FROM ads WHERE id = $1 AND user_id = $2")
        .bind(ad_id)
        .bind(user_id)
        .execute(db)
        .await?;

    Ok(result.rows_affected() > 0)
}
