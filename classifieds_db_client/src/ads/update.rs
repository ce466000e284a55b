//! Ad update operations.

use crate::error::ClassifiedsDatabaseError;
use models_classifieds::service::Ad;
use sqlx::{Postgres, Transaction};

type Result<T> = std::result::Result<T, ClassifiedsDatabaseError>;

/// Overwrites the editable ad fields as part of the ad write transaction.
#[tracing::instrument(skip(transaction, ad), fields(ad_id = %ad.id))]
pub async fn update_ad(transaction: &mut Transaction<'_, Postgres>, ad: &Ad) -> Result<()> {
    sqlx::query(
        r#"
        UPDATE ads
        SET category_id = $2,
            title = $3,
            description = $4,
            neighbourhood_id = $5,
            price = $6,
            show_phone_number = $7,
            updated_at = $8
        WHERE id = $1
        "#,
    )
    .bind(ad.id)
    .bind(ad.category_id)
    .bind(&ad.title)
    .bind(&ad.description)
    .bind(ad.neighbourhood_id)
    .bind(ad.price)
    .bind(ad.show_phone_number)
    .bind(ad.updated_at)
    .execute(transaction.as_mut())
    .await?;

    Ok(())
}
