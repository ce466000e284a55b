//! Ad property value deletes.

use crate::error::ClassifiedsDatabaseError;
use sqlx::{Postgres, Transaction};
use uuid::Uuid;

type Result<T> = std::result::Result<T, ClassifiedsDatabaseError>;

/// Removes values of properties that are not bound to `category_id`, used when an
/// ad moves to another category. Returns the number of removed rows.
#[tracing::instrument(skip(transaction))]
pub async fn delete_unbound_ad_property_values(
    transaction: &mut Transaction<'_, Postgres>,
    ad_id: Uuid,
    category_id: Uuid,
) -> Result<u64> {
    let result = sqlx::query(
        r#"
        DELETE FROM ad_property_values
        WHERE ad_id = $1
          AND property_id NOT IN (
              SELECT property_id FROM category_properties WHERE category_id = $2
          )
        "#,
    )
    .bind(ad_id)
    .bind(category_id)
    .execute(transaction.as_mut())
    .await?;

    Ok(result.rows_affected())
}
