//! Ad property value read operations.

use crate::error::ClassifiedsDatabaseError;
use models_classifieds::db;
use models_classifieds::service::AdPropertyValue;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

type Result<T> = std::result::Result<T, ClassifiedsDatabaseError>;

/// Values of an ad joined with their property's name and data type, ordered by property name.
#[tracing::instrument(skip(db))]
pub async fn get_ad_property_values(
    db: &Pool<Postgres>,
    ad_id: Uuid,
) -> Result<Vec<AdPropertyValue>> {
    let rows = sqlx::query_as::<_, db::AdPropertyValue>(
        r#"
        SELECT
            v.id,
            v.ad_id,
            v.property_id,
            p.name AS property_name,
            p.data_type,
            v.value
        FROM ad_property_values v
        JOIN properties p ON p.id = v.property_id
        WHERE v.ad_id = $1
        ORDER BY p.name, v.id
        "#,
    )
    .bind(ad_id)
    .fetch_all(db)
    .await?;

    Ok(rows.into_iter().map(AdPropertyValue::from).collect())
}
