//! Database layer ad models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::DataType;

/// Ad model (database representation).
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Ad {
    pub id: Uuid,
    pub user_id: Uuid,
    pub category_id: Uuid,
    pub title: String,
    pub description: String,
    pub neighbourhood_id: Uuid,
    pub price: i64,
    pub show_phone_number: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct AdImage {
    pub id: Uuid,
    pub ad_id: Uuid,
    pub image: String,
    pub size_bytes: i64,
    pub created_at: DateTime<Utc>,
}

/// `ad_property_values` joined with `properties` for the name and data type.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct AdPropertyValue {
    pub id: Uuid,
    pub ad_id: Uuid,
    pub property_id: Uuid,
    pub property_name: String,
    pub data_type: DataType,
    pub value: String,
}

// ===== Conversions =====

impl From<Ad> for crate::service::Ad {
    fn from(db: Ad) -> Self {
        Self {
            id: db.id,
            user_id: db.user_id,
            category_id: db.category_id,
            title: db.title,
            description: db.description,
            neighbourhood_id: db.neighbourhood_id,
            price: db.price,
            show_phone_number: db.show_phone_number,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}

impl From<AdImage> for crate::service::AdImage {
    fn from(db: AdImage) -> Self {
        Self {
            id: db.id,
            ad_id: db.ad_id,
            image: db.image,
            size_bytes: db.size_bytes,
            created_at: db.created_at,
        }
    }
}

impl From<AdPropertyValue> for crate::service::AdPropertyValue {
    fn from(db: AdPropertyValue) -> Self {
        Self {
            id: db.id,
            ad_id: db.ad_id,
            property_id: db.property_id,
            property_name: db.property_name,
            data_type: db.data_type,
            value: db.value,
        }
    }
}
