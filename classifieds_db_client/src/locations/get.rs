//! Location, city and neighbourhood read operations.

use crate::error::ClassifiedsDatabaseError;
use models_classifieds::db;
use models_classifieds::service::{City, Location, LocationHierarchy, Neighbourhood};
use sqlx::{Pool, Postgres};
use uuid::Uuid;

type Result<T> = std::result::Result<T, ClassifiedsDatabaseError>;

#[tracing::instrument(skip(db))]
pub async fn get_locations(db: &Pool<Postgres>) -> Result<Vec<Location>> {
    let rows = sqlx::query_as::<_, db::Location>(
        "SELECT id, name FROM locations ORDER BY name, id",
    )
    .fetch_all(db)
    .await?;

    Ok(rows.into_iter().map(Location::from).collect())
}

/// Cities of one location, or every city when no location is given.
#[tracing::instrument(skip(db))]
pub async fn get_cities(db: &Pool<Postgres>, location_id: Option<Uuid>) -> Result<Vec<City>> {
    let rows = sqlx::query_as::<_, db::City>(
        r#"
        SELECT id, location_id, name
        FROM cities
        WHERE $1::uuid IS NULL OR location_id = $1
        ORDER BY name, id
        "#,
    )
    .bind(location_id)
    .fetch_all(db)
    .await?;

    Ok(rows.into_iter().map(City::from).collect())
}

/// Neighbourhoods of one city, or every neighbourhood when no city is given.
#[tracing::instrument(skip(db))]
pub async fn get_neighbourhoods(
    db: &Pool<Postgres>,
    city_id: Option<Uuid>,
) -> Result<Vec<Neighbourhood>> {
    let rows = sqlx::query_as::<_, db::Neighbourhood>(
        r#"
        SELECT id, city_id, name
        FROM neighbourhoods
        WHERE $1::uuid IS NULL OR city_id = $1
        ORDER BY name, id
        "#,
    )
    .bind(city_id)
    .fetch_all(db)
    .await?;

    Ok(rows.into_iter().map(Neighbourhood::from).collect())
}

#[tracing::instrument(skip(db))]
pub async fn get_neighbourhood(
    db: &Pool<Postgres>,
    neighbourhood_id: Uuid,
) -> Result<Option<Neighbourhood>> {
    let row = sqlx::query_as::<_, db::Neighbourhood>(
        "SELECT id, city_id, name FROM neighbourhoods WHERE id = $1",
    )
    .bind(neighbourhood_id)
    .fetch_optional(db)
    .await?;

    Ok(row.map(Neighbourhood::from))
}

/// location → city → neighbourhood path of a neighbourhood
#[tracing::instrument(skip(db))]
pub async fn get_location_hierarchy(
    db: &Pool<Postgres>,
    neighbourhood_id: Uuid,
) -> Result<Option<LocationHierarchy>> {
    let row = sqlx::query_as::<_, db::LocationHierarchy>(
        r#"
        SELECT
            l.id AS location_id,
            l.name AS location_name,
            c.id AS city_id,
            c.name AS city_name,
            n.id AS neighbourhood_id,
            n.name AS neighbourhood_name
        FROM neighbourhoods n
        JOIN cities c ON c.id = n.city_id
        JOIN locations l ON l.id = c.location_id
        WHERE n.id = $1
        "#,
    )
    .bind(neighbourhood_id)
    .fetch_optional(db)
    .await?;

    Ok(row.map(LocationHierarchy::from))
}

#[cfg(all(test, feature = "postgres_test"))]
mod tests {
    use super::*;
    use crate::MIGRATIONS;

    #[sqlx::test(
        migrator = "MIGRATIONS",
        fixtures(path = "../../fixtures", scripts("classifieds"))
    )]
    async fn test_get_location_hierarchy(pool: Pool<Postgres>) -> anyhow::Result<()> {
        let kreuzberg: Uuid = "22000000-0000-0000-0000-000000000001".parse()?;
        let hierarchy = get_location_hierarchy(&pool, kreuzberg)
            .await?
            .expect("fixture neighbourhood");

        assert_eq!(hierarchy.location.name, "Germany");
        assert_eq!(hierarchy.city.name, "Berlin");
        assert_eq!(hierarchy.neighbourhood.name, "Kreuzberg");

        Ok(())
    }

    #[sqlx::test(
        migrator = "MIGRATIONS",
        fixtures(path = "../../fixtures", scripts("classifieds"))
    )]
    async fn test_cascading_lookups(pool: Pool<Postgres>) -> anyhow::Result<()> {
        let germany: Uuid = "20000000-0000-0000-0000-000000000001".parse()?;
        let berlin: Uuid = "21000000-0000-0000-0000-000000000001".parse()?;

        assert_eq!(get_locations(&pool).await?.len(), 1);
        assert_eq!(get_cities(&pool, Some(germany)).await?.len(), 2);

        let neighbourhoods = get_neighbourhoods(&pool, Some(berlin)).await?;
        assert_eq!(neighbourhoods.len(), 1);
        assert_eq!(neighbourhoods[0].name, "Kreuzberg");

        Ok(())
    }
}
