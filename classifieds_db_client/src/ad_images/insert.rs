//! Ad image insert operations.

use crate::error::ClassifiedsDatabaseError;
use chrono::{DateTime, Utc};
use models_classifieds::service::AdImage;
use sqlx::{Postgres, Transaction};
use uuid::Uuid;

type Result<T> = std::result::Result<T, ClassifiedsDatabaseError>;

/// Bulk inserts image rows as part of the ad write transaction.
#[tracing::instrument(skip(transaction, images), fields(image_count = images.len()))]
pub async fn insert_ad_images(
    transaction: &mut Transaction<'_, Postgres>,
    images: &[AdImage],
) -> Result<()> {
    if images.is_empty() {
        return Ok(());
    }

    let ids: Vec<Uuid> = images.iter().map(|i| i.id).collect();
    let ad_ids: Vec<Uuid> = images.iter().map(|i| i.ad_id).collect();
    let paths: Vec<String> = images.iter().map(|i| i.image.clone()).collect();
    let sizes: Vec<i64> = images.iter().map(|i| i.size_bytes).collect();
    let created: Vec<DateTime<Utc>> = images.iter().map(|i| i.created_at).collect();

    sqlx::query(
        r#"
        INSERT INTO ad_images (id, ad_id, image, size_bytes, created_at)
        SELECT * FROM UNNEST($1::uuid[], $2::uuid[], $3::text[], $4::bigint[], $5::timestamptz[])
        "#,
    )
    .bind(ids)
    .bind(ad_ids)
    .bind(paths)
    .bind(sizes)
    .bind(created)
    .execute(transaction.as_mut())
    .await?;

    Ok(())
}
