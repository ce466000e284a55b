//! Ads, their images and their property values

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::service::typed_value::TypedValue;
use crate::shared::DataType;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ad {
    pub id: Uuid,
    pub user_id: Uuid,
    /// Always a leaf category
    pub category_id: Uuid,
    pub title: String,
    pub description: String,
    pub neighbourhood_id: Uuid,
    pub price: i64,
    pub show_phone_number: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdImage {
    pub id: Uuid,
    pub ad_id: Uuid,
    /// Storage path of the uploaded file
    pub image: String,
    pub size_bytes: i64,
    pub created_at: DateTime<Utc>,
}

impl AdImage {
    pub fn new(ad_id: Uuid, image: String, size_bytes: i64) -> Self {
        Self {
            id: Uuid::now_v7(),
            ad_id,
            image,
            size_bytes,
            created_at: Utc::now(),
        }
    }
}

/// One stored value per (ad, property), joined with the property's name and type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdPropertyValue {
    pub id: Uuid,
    pub ad_id: Uuid,
    pub property_id: Uuid,
    pub property_name: String,
    pub data_type: DataType,
    pub value: String,
}

impl AdPropertyValue {
    /// The stored text coerced by the property's data type
    pub fn typed_value(&self) -> TypedValue {
        TypedValue::coerce(self.data_type, &self.value)
    }
}
