//! Ad property value upserts.

use std::collections::BTreeMap;

use crate::error::ClassifiedsDatabaseError;
use sqlx::{Postgres, Transaction};
use uuid::Uuid;

type Result<T> = std::result::Result<T, ClassifiedsDatabaseError>;

/// Bulk upserts values keyed on (ad, property); an existing row takes the new value.
///
/// Taking a map guarantees each property appears once, which a single
/// `ON CONFLICT` statement requires.
#[tracing::instrument(skip(transaction, values), fields(value_count = values.len()))]
pub async fn upsert_ad_property_values(
    transaction: &mut Transaction<'_, Postgres>,
    ad_id: Uuid,
    values: &BTreeMap<Uuid, String>,
) -> Result<()> {
    if values.is_empty() {
        return Ok(());
    }

    let ids: Vec<Uuid> = values.keys().map(|_| Uuid::now_v7()).collect();
    let property_ids: Vec<Uuid> = values.keys().copied().collect();
    let raw_values: Vec<String> = values.values().cloned().collect();

    sqlx::query(
        r#"
        INSERT INTO ad_property_values (id, ad_id, property_id, value)
        SELECT v.id, $1, v.property_id, v.value
        FROM UNNEST($2::uuid[], $3::uuid[], $4::text[]) AS v(id, property_id, value)
        ON CONFLICT (ad_id, property_id)
        DO UPDATE SET value = EXCLUDED.value
        "#,
    )
    .bind(ad_id)
    .bind(ids)
    .bind(property_ids)
    .bind(raw_values)
    .execute(transaction.as_mut())
    .await
    .map_err(|e| {
        tracing::error!(error = ?e, ad_id = %ad_id, "failed to upsert ad property values");
        ClassifiedsDatabaseError::Query(e)
    })?;

    tracing::info!(ad_id = %ad_id, value_count = values.len(), "upserted ad property values");

    Ok(())
}
