//! Database layer user and profile models.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::db::error::DbConversionError;
use crate::shared::Gender;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub created_at: DateTime<Utc>,
}

/// Profile model (database representation). Gender is stored as its one letter code.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Profile {
    pub user_id: Uuid,
    pub profile_pic: Option<String>,
    pub full_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<String>,
    pub bio: String,
    pub phone_number: Option<String>,
    pub created_at: DateTime<Utc>,
}

// ===== Conversions =====

impl From<User> for crate::service::User {
    fn from(db: User) -> Self {
        Self {
            id: db.id,
            email: db.email,
            first_name: db.first_name,
            last_name: db.last_name,
            created_at: db.created_at,
        }
    }
}

impl TryFrom<Profile> for crate::service::Profile {
    type Error = DbConversionError;

    fn try_from(db: Profile) -> Result<Self, Self::Error> {
        let gender = match db.gender {
            None => None,
            Some(code) if code.is_empty() => None,
            Some(code) => Some(Gender::from_code(&code).ok_or(
                DbConversionError::UnknownGender {
                    user_id: db.user_id,
                    code,
                },
            )?),
        };

        Ok(Self {
            user_id: db.user_id,
            profile_pic: db.profile_pic,
            full_name: db.full_name,
            date_of_birth: db.date_of_birth,
            gender,
            bio: db.bio,
            phone_number: db.phone_number,
            created_at: db.created_at,
        })
    }
}

impl From<crate::service::Profile> for Profile {
    fn from(profile: crate::service::Profile) -> Self {
        Self {
            user_id: profile.user_id,
            profile_pic: profile.profile_pic,
            full_name: profile.full_name,
            date_of_birth: profile.date_of_birth,
            gender: profile.gender.map(|g| g.code().to_string()),
            bio: profile.bio,
            phone_number: profile.phone_number,
            created_at: profile.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(gender: Option<&str>) -> Profile {
        Profile {
            user_id: Uuid::now_v7(),
            profile_pic: None,
            full_name: "Ada Lovelace".to_string(),
            date_of_birth: None,
            gender: gender.map(str::to_string),
            bio: String::new(),
            phone_number: Some("+4915112345678".to_string()),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn gender_code_is_decoded() {
        let profile = crate::service::Profile::try_from(row(Some("F"))).unwrap();
        assert_eq!(profile.gender, Some(Gender::Female));

        let profile = crate::service::Profile::try_from(row(None)).unwrap();
        assert_eq!(profile.gender, None);
    }

    #[test]
    fn unknown_gender_code_is_rejected() {
        let err = crate::service::Profile::try_from(row(Some("Z"))).unwrap_err();
        assert!(matches!(err, DbConversionError::UnknownGender { code, .. } if code == "Z"));
    }
}
