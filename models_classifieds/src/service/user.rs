use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::Gender;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// "first last" with surrounding whitespace removed
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

/// One-to-one extension of a [User]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub user_id: Uuid,
    pub profile_pic: Option<String>,
    pub full_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<Gender>,
    pub bio: String,
    pub phone_number: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Profile {
    /// A blank profile for users that never saved one
    pub fn empty(user_id: Uuid) -> Self {
        Self {
            user_id,
            profile_pic: None,
            full_name: String::new(),
            date_of_birth: None,
            gender: None,
            bio: String::new(),
            phone_number: None,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_name_trims_missing_parts() {
        let user = User {
            id: Uuid::now_v7(),
            email: "a@b.c".to_string(),
            first_name: "Ada".to_string(),
            last_name: String::new(),
            created_at: Utc::now(),
        };
        assert_eq!(user.full_name(), "Ada");
    }
}
