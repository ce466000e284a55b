//! Database layer property, binding and allowed value models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::DataType;

/// Property model (database representation).
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Property {
    pub id: Uuid,
    pub name: String,
    pub data_type: DataType,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Category property binding (database representation).
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct CategoryProperty {
    pub id: Uuid,
    pub category_id: Uuid,
    pub property_id: Uuid,
    pub required: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Allowed value of a choice binding (database representation).
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct CategoryPropertyValue {
    pub id: Uuid,
    pub category_property_id: Uuid,
    pub value: String,
    pub depends_on_id: Option<Uuid>,
    pub depends_on_value_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ===== Conversions =====

impl From<Property> for crate::service::Property {
    fn from(db: Property) -> Self {
        Self {
            id: db.id,
            name: db.name,
            data_type: db.data_type,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}

impl From<CategoryProperty> for crate::service::CategoryProperty {
    fn from(db: CategoryProperty) -> Self {
        Self {
            id: db.id,
            category_id: db.category_id,
            property_id: db.property_id,
            required: db.required,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}

impl From<CategoryPropertyValue> for crate::service::CategoryPropertyValue {
    fn from(db: CategoryPropertyValue) -> Self {
        Self {
            id: db.id,
            category_property_id: db.category_property_id,
            value: db.value,
            depends_on_id: db.depends_on_id,
            depends_on_value_id: db.depends_on_value_id,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}

/// A binding joined with its property, as read when building dynamic forms.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct BoundProperty {
    pub binding_id: Uuid,
    pub category_id: Uuid,
    pub required: bool,
    pub binding_created_at: DateTime<Utc>,
    pub binding_updated_at: DateTime<Utc>,
    pub property_id: Uuid,
    pub property_name: String,
    pub data_type: DataType,
    pub property_created_at: DateTime<Utc>,
    pub property_updated_at: DateTime<Utc>,
}

impl BoundProperty {
    /// Split into the service binding and property, leaving values to be attached
    pub fn into_parts(self) -> (crate::service::CategoryProperty, crate::service::Property) {
        let binding = crate::service::CategoryProperty {
            id: self.binding_id,
            category_id: self.category_id,
            property_id: self.property_id,
            required: self.required,
            created_at: self.binding_created_at,
            updated_at: self.binding_updated_at,
        };
        let property = crate::service::Property {
            id: self.property_id,
            name: self.property_name,
            data_type: self.data_type,
            created_at: self.property_created_at,
            updated_at: self.property_updated_at,
        };
        (binding, property)
    }
}
