//! Properties, their bindings to categories and the allowed values of choice bindings

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::DataType;

/// A named, typed attribute that can be bound to categories
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub id: Uuid,
    pub name: String,
    pub data_type: DataType,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Property {
    pub fn new(name: String, data_type: DataType) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            name,
            data_type,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Binding of a [Property] to a leaf category. Unique per (category, property).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryProperty {
    pub id: Uuid,
    pub category_id: Uuid,
    pub property_id: Uuid,
    pub required: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CategoryProperty {
    pub fn new(category_id: Uuid, property_id: Uuid, required: bool) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            category_id,
            property_id,
            required,
            created_at: now,
            updated_at: now,
        }
    }
}

/// An allowed value of a choice binding.
///
/// When `depends_on_value_id` is set the value is only selectable while the
/// binding `depends_on_id` holds that value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryPropertyValue {
    pub id: Uuid,
    pub category_property_id: Uuid,
    pub value: String,
    pub depends_on_id: Option<Uuid>,
    pub depends_on_value_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CategoryPropertyValue {
    pub fn new(category_property_id: Uuid, value: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            category_property_id,
            value,
            depends_on_id: None,
            depends_on_value_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Make this value conditional on `depends_on_value` being selected
    pub fn depending_on(mut self, depends_on_value: &CategoryPropertyValue) -> Self {
        self.depends_on_id = Some(depends_on_value.category_property_id);
        self.depends_on_value_id = Some(depends_on_value.id);
        self
    }
}

/// Everything needed to build and validate one dynamic field:
/// the binding, the bound property and its allowed values ordered by value.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryPropertySchema {
    pub binding: CategoryProperty,
    pub property: Property,
    pub values: Vec<CategoryPropertyValue>,
}
