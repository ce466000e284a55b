//! Ad read operations.

use crate::error::ClassifiedsDatabaseError;
use models_classifieds::db;
use models_classifieds::service::Ad;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

type Result<T> = std::result::Result<T, ClassifiedsDatabaseError>;

/// Filters of the ad listing
#[derive(Debug, Clone, Default)]
pub struct AdListFilter<'a> {
    /// Matched case-insensitively against title, description and category name
    pub keyword: Option<&'a str>,
    pub city_id: Option<Uuid>,
    pub limit: i64,
    pub offset: i64,
}

/// `%keyword%` with LIKE wildcards in the keyword escaped
fn like_pattern(keyword: &str) -> String {
    let escaped = keyword
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

#[tracing::instrument(skip(db))]
pub async fn get_ad(db: &Pool<Postgres>, ad_id: Uuid) -> Result<Option<Ad>> {
    let row = sqlx::query_as::<_, db::Ad>(
        r#"
        SELECT id, user_id, category_id, title, description, neighbourhood_id, price,
               show_phone_number, created_at, updated_at
        FROM ads
        WHERE id = $1
        "#,
    )
    .bind(ad_id)
    .fetch_optional(db)
    .await?;

    Ok(row.map(Ad::from))
}

/// One page of ads, newest first, with the total number of matches.
#[tracing::instrument(skip(db))]
pub async fn list_ads(db: &Pool<Postgres>, filter: AdListFilter<'_>) -> Result<(Vec<Ad>, i64)> {
    let pattern = filter.keyword.map(like_pattern);

    let total: i64 = sqlx::query_scalar(
        r#"
        SELECT COUNT(*)
        FROM ads a
        JOIN categories c ON c.id = a.category_id
        JOIN neighbourhoods n ON n.id = a.neighbourhood_id
        WHERE ($1::text IS NULL
               OR a.title ILIKE $1 OR a.description ILIKE $1 OR c.name ILIKE $1)
          AND ($2::uuid IS NULL OR n.city_id = $2)
        "#,
    )
    .bind(&pattern)
    .bind(filter.city_id)
    .fetch_one(db)
    .await?;

    let rows = sqlx::query_as::<_, db::Ad>(
        r#"
        SELECT a.id, a.user_id, a.category_id, a.title, a.description, a.neighbourhood_id,
               a.price, a.show_phone_number, a.created_at, a.updated_at
        FROM ads a
        JOIN categories c ON c.id = a.category_id
        JOIN neighbourhoods n ON n.id = a.neighbourhood_id
        WHERE ($1::text IS NULL
               OR a.title ILIKE $1 OR a.description ILIKE $1 OR c.name ILIKE $1)
          AND ($2::uuid IS NULL OR n.city_id = $2)
        ORDER BY a.created_at DESC, a.id DESC
        LIMIT $3 OFFSET $4
        "#,
    )
    .bind(&pattern)
    .bind(filter.city_id)
    .bind(filter.limit)
    .bind(filter.offset)
    .fetch_all(db)
    .await?;

    Ok((rows.into_iter().map(Ad::from).collect(), total))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("phone"), "%phone%");
        assert_eq!(like_pattern("100%_"), "%100\\%\\_%");
    }
}
