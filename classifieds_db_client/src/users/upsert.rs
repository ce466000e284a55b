//! User name and profile writes. Both run inside a caller-owned transaction.

use crate::error::ClassifiedsDatabaseError;
use models_classifieds::db;
use models_classifieds::service::{Profile, User};
use sqlx::{Postgres, Transaction};

type Result<T> = std::result::Result<T, ClassifiedsDatabaseError>;

#[tracing::instrument(skip(transaction, user), fields(user_id = %user.id))]
pub async fn update_user_names(
    transaction: &mut Transaction<'_, Postgres>,
    user: &User,
) -> Result<()> {
    sqlx::query("UPDATE users SET first_name = $2, last_name = $3 WHERE id = $1")
        .bind(user.id)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .execute(transaction.as_mut())
        .await?;

    Ok(())
}

/// Creates the profile row on first write, overwrites it afterwards.
#[tracing::instrument(skip(transaction, profile), fields(user_id = %profile.user_id))]
pub async fn upsert_profile(
    transaction: &mut Transaction<'_, Postgres>,
    profile: &Profile,
) -> Result<()> {
    let row = db::Profile::from(profile.clone());

    sqlx::query(
        r#"
        INSERT INTO profiles (
            user_id, profile_pic, full_name, date_of_birth, gender, bio, phone_number, created_at
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        ON CONFLICT (user_id)
        DO UPDATE SET
            profile_pic = EXCLUDED.profile_pic,
            full_name = EXCLUDED.full_name,
            date_of_birth = EXCLUDED.date_of_birth,
            gender = EXCLUDED.gender,
            bio = EXCLUDED.bio,
            phone_number = EXCLUDED.phone_number
        "#,
    )
    .bind(row.user_id)
    .bind(row.profile_pic)
    .bind(row.full_name)
    .bind(row.date_of_birth)
    .bind(row.gender)
    .bind(row.bio)
    .bind(row.phone_number)
    .bind(row.created_at)
    .execute(transaction.as_mut())
    .await?;

    Ok(())
}

#[cfg(all(test, feature = "postgres_test"))]
mod tests {
    use super::*;
    use crate::MIGRATIONS;
    use crate::users::get::get_profile;
    use sqlx::Pool;
    use uuid::Uuid;

    #[sqlx::test(
        migrator = "MIGRATIONS",
        fixtures(path = "../../fixtures", scripts("classifieds"))
    )]
    async fn test_upsert_profile_creates_missing_row(pool: Pool<Postgres>) -> anyhow::Result<()> {
        let other: Uuid = "00000000-0000-0000-0000-000000000002".parse()?;
        let mut profile = Profile::empty(other);
        profile.full_name = "Oscar Other".to_string();

        let mut tx = pool.begin().await?;
        upsert_profile(&mut tx, &profile).await?;
        tx.commit().await?;

        let stored = get_profile(&pool, other).await?.expect("created profile");
        assert_eq!(stored.full_name, "Oscar Other");

        profile.bio = "Collector".to_string();
        let mut tx = pool.begin().await?;
        upsert_profile(&mut tx, &profile).await?;
        tx.commit().await?;

        let stored = get_profile(&pool, other).await?.expect("updated profile");
        assert_eq!(stored.bio, "Collector");

        Ok(())
    }
}
