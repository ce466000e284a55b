//! User and profile read operations.

use crate::error::ClassifiedsDatabaseError;
use models_classifieds::db;
use models_classifieds::service::{Profile, User};
use sqlx::{Pool, Postgres};
use uuid::Uuid;

type Result<T> = std::result::Result<T, ClassifiedsDatabaseError>;

#[tracing::instrument(skip(db))]
pub async fn get_user(db: &Pool<Postgres>, user_id: Uuid) -> Result<Option<User>> {
    let row = sqlx::query_as::<_, db::User>(
        "SELECT id, email, first_name, last_name, created_at FROM users WHERE id = $1",
    )
    .bind(user_id)
    .fetch_optional(db)
    .await?;

    Ok(row.map(User::from))
}

#[tracing::instrument(skip(db))]
pub async fn get_profile(db: &Pool<Postgres>, user_id: Uuid) -> Result<Option<Profile>> {
    let row = sqlx::query_as::<_, db::Profile>(
        r#"
        SELECT user_id, profile_pic, full_name, date_of_birth, gender, bio, phone_number, created_at
        FROM profiles
        WHERE user_id = $1
        "#,
    )
    .bind(user_id)
    .fetch_optional(db)
    .await?;

    row.map(Profile::try_from).transpose().map_err(Into::into)
}
