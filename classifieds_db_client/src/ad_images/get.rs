//! Ad image read operations.

use crate::error::ClassifiedsDatabaseError;
use models_classifieds::db;
use models_classifieds::service::AdImage;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

type Result<T> = std::result::Result<T, ClassifiedsDatabaseError>;

/// Images of an ad in upload order
#[tracing::instrument(skip(db))]
pub async fn get_ad_images(db: &Pool<Postgres>, ad_id: Uuid) -> Result<Vec<AdImage>> {
    let rows = sqlx::query_as::<_, db::AdImage>(
        r#"
        SELECT id, ad_id, image, size_bytes, created_at
        FROM ad_images
        WHERE ad_id = $1
        ORDER BY created_at, id
        "#,
    )
    .bind(ad_id)
    .fetch_all(db)
    .await?;

    Ok(rows.into_iter().map(AdImage::from).collect())
}
