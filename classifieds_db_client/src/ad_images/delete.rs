//! Ad image delete operations.

use crate::error::ClassifiedsDatabaseError;
use sqlx::{Postgres, Transaction};
use uuid::Uuid;

type Result<T> = std::result::Result<T, ClassifiedsDatabaseError>;

/// Deletes the given images of one ad. Ids belonging to other ads are left untouched.
/// Returns the number of removed rows.
#[tracing::instrument(skip(transaction))]
pub async fn delete_ad_images(
    transaction: &mut Transaction<'_, Postgres>,
    ad_id: Uuid,
    image_ids: &[Uuid],
) -> Result<u64> {
    if image_ids.is_empty() {
        return Ok(0);
    }

    let result = sqlx::query("DELETE FROM ad_images WHERE ad_id = $1 AND id = ANY($2)")
        .bind(ad_id)
        .bind(image_ids)
        .execute(transaction.as_mut())
        .await?;

    Ok(result.rows_affected())
}
