//! Ad insert operations.

use crate::error::ClassifiedsDatabaseError;
use models_classifieds::service::Ad;
use sqlx::{Postgres, Transaction};

type Result<T> = std::result::Result<T, ClassifiedsDatabaseError>;

/// Inserts the ad row as part of the ad write transaction.
#[tracing::instrument(skip(transaction, ad), fields(ad_id = %ad.id))]
pub async fn insert_ad(transaction: &mut Transaction<'_, Postgres>, ad: &Ad) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO ads (
            id, user_id, category_id, title, description, neighbourhood_id, price,
            show_phone_number, created_at, updated_at
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        "#,
    )
    .bind(ad.id)
    .bind(ad.user_id)
    .bind(ad.category_id)
    .bind(&ad.title)
    .bind(&ad.description)
    .bind(ad.neighbourhood_id)
    .bind(ad.price)
    .bind(ad.show_phone_number)
    .bind(ad.created_at)
    .bind(ad.updated_at)
    .execute(transaction.as_mut())
    .await?;

    Ok(())
}
