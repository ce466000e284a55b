//! API layer response types.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::service::{self, LocationHierarchy, NamedRef, TypedValue};
use crate::shared::{DataType, FieldKind};

/// `{items: [{id, name}]}` used by the cascading lookups
#[derive(ToSchema, Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NamedItems {
    pub items: Vec<NamedRef>,
}

impl From<Vec<NamedRef>> for NamedItems {
    fn from(items: Vec<NamedRef>) -> Self {
        Self { items }
    }
}

// ===== Catalogue Responses =====

#[derive(ToSchema, Debug, Clone, Serialize, Deserialize)]
pub struct CategoryResponse {
    pub id: Uuid,
    pub name: String,
    pub parent_id: Option<Uuid>,
    pub image: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<service::Category> for CategoryResponse {
    fn from(category: service::Category) -> Self {
        Self {
            id: category.id,
            name: category.name,
            parent_id: category.parent_id,
            image: category.image,
            is_active: category.is_active,
            created_at: category.created_at,
            updated_at: category.updated_at,
        }
    }
}

#[derive(ToSchema, Debug, Clone, Serialize, Deserialize)]
pub struct PropertyResponse {
    pub id: Uuid,
    pub name: String,
    pub data_type: DataType,
    pub created_at: DateTime<Utc>,
}

impl From<service::Property> for PropertyResponse {
    fn from(property: service::Property) -> Self {
        Self {
            id: property.id,
            name: property.name,
            data_type: property.data_type,
            created_at: property.created_at,
        }
    }
}

#[derive(ToSchema, Debug, Clone, Serialize, Deserialize)]
pub struct CategoryPropertyResponse {
    pub id: Uuid,
    pub category_id: Uuid,
    pub property_id: Uuid,
    pub required: bool,
}

impl From<service::CategoryProperty> for CategoryPropertyResponse {
    fn from(binding: service::CategoryProperty) -> Self {
        Self {
            id: binding.id,
            category_id: binding.category_id,
            property_id: binding.property_id,
            required: binding.required,
        }
    }
}

#[derive(ToSchema, Debug, Clone, Serialize, Deserialize)]
pub struct AllowedValueResponse {
    pub id: Uuid,
    pub category_property_id: Uuid,
    pub value: String,
    pub depends_on_id: Option<Uuid>,
    pub depends_on_value_id: Option<Uuid>,
}

impl From<service::CategoryPropertyValue> for AllowedValueResponse {
    fn from(value: service::CategoryPropertyValue) -> Self {
        Self {
            id: value.id,
            category_property_id: value.category_property_id,
            value: value.value,
            depends_on_id: value.depends_on_id,
            depends_on_value_id: value.depends_on_value_id,
        }
    }
}

/// `{id, value}` of an allowed value inside the category tree
#[derive(ToSchema, Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AllowedValueItem {
    pub id: Uuid,
    pub value: String,
}

/// A binding as listed in the category tree
#[derive(ToSchema, Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryNodeProperty {
    pub id: Uuid,
    pub property_id: Uuid,
    pub name: String,
    pub data_type: DataType,
    pub required: bool,
    pub values: Vec<AllowedValueItem>,
}

impl From<&service::CategoryPropertySchema> for CategoryNodeProperty {
    fn from(schema: &service::CategoryPropertySchema) -> Self {
        Self {
            id: schema.binding.id,
            property_id: schema.property.id,
            name: schema.property.name.clone(),
            data_type: schema.property.data_type,
            required: schema.binding.required,
            values: schema
                .values
                .iter()
                .map(|v| AllowedValueItem {
                    id: v.id,
                    value: v.value.clone(),
                })
                .collect(),
        }
    }
}

/// A category with its bindings and nested children. `children` is null on leaves.
#[derive(ToSchema, Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryNode {
    pub id: Uuid,
    pub name: String,
    pub properties: Vec<CategoryNodeProperty>,
    pub children: Option<Vec<CategoryNode>>,
}

// ===== Location Responses =====

#[derive(ToSchema, Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CityNode {
    pub id: Uuid,
    pub name: String,
    pub neighbourhoods: Vec<NamedRef>,
}

#[derive(ToSchema, Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LocationNode {
    pub id: Uuid,
    pub name: String,
    pub cities: Vec<CityNode>,
}

// ===== Dynamic Property Form =====

/// One selectable option of a choice field. The blank option has an empty value.
#[derive(ToSchema, Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChoiceOptionResponse {
    pub value: String,
    pub label: String,
    /// Field that must hold `depends_on_value` for this option to be valid
    pub depends_on_field: Option<String>,
    pub depends_on_value: Option<String>,
}

/// Descriptor of one dynamic property field
#[derive(ToSchema, Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PropertyFieldResponse {
    /// `prop_<property id>`
    pub name: String,
    pub property_id: Uuid,
    pub label: String,
    pub kind: FieldKind,
    pub data_type: DataType,
    pub required: bool,
    #[schema(value_type = Object)]
    pub initial: Option<serde_json::Value>,
    pub choices: Vec<ChoiceOptionResponse>,
    /// Presentation attributes (`class`, `placeholder`)
    pub attrs: BTreeMap<String, String>,
}

/// The form fragment for one category. Empty when the category is unknown.
#[derive(ToSchema, Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PropertyFormResponse {
    pub category_id: Option<Uuid>,
    pub fields: Vec<PropertyFieldResponse>,
}

// ===== Ad Responses =====

#[derive(ToSchema, Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AdImageResponse {
    pub id: Uuid,
    pub image: String,
}

impl From<service::AdImage> for AdImageResponse {
    fn from(image: service::AdImage) -> Self {
        Self {
            id: image.id,
            image: image.image,
        }
    }
}

/// `{id, name, value}` where `value` is typed by the property's data type
#[derive(ToSchema, Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AdPropertyValueResponse {
    /// Property id
    pub id: Uuid,
    pub name: String,
    #[schema(value_type = Object)]
    pub value: TypedValue,
}

impl From<&service::AdPropertyValue> for AdPropertyValueResponse {
    fn from(value: &service::AdPropertyValue) -> Self {
        Self {
            id: value.property_id,
            name: value.property_name.clone(),
            value: value.typed_value(),
        }
    }
}

/// Public view of an ad's owner. `phone_number` is null unless the ad shows it
/// and the requester is authenticated.
#[derive(ToSchema, Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserPublicResponse {
    pub id: Uuid,
    pub email: String,
    pub full_name: String,
    pub profile_pic: Option<String>,
    pub phone_number: Option<String>,
}

#[derive(ToSchema, Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AdDetailResponse {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub price: i64,
    pub category_id: Uuid,
    /// Root to leaf
    pub category_hierarchy: Vec<NamedRef>,
    pub location: LocationHierarchy,
    pub images: Vec<AdImageResponse>,
    pub property_values: Vec<AdPropertyValueResponse>,
    pub user: UserPublicResponse,
    pub show_phone_number: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(ToSchema, Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AdSummaryResponse {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub price: i64,
    pub category_id: Uuid,
    pub neighbourhood_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl From<service::Ad> for AdSummaryResponse {
    fn from(ad: service::Ad) -> Self {
        Self {
            id: ad.id,
            title: ad.title,
            description: ad.description,
            price: ad.price,
            category_id: ad.category_id,
            neighbourhood_id: ad.neighbourhood_id,
            created_at: ad.created_at,
        }
    }
}

/// One page of the ad listing, newest first
#[derive(ToSchema, Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AdPage {
    pub items: Vec<AdSummaryResponse>,
    pub page: u32,
    pub page_size: u32,
    pub total: i64,
}

// ===== Profile Responses =====

#[derive(ToSchema, Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProfileResponse {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub profile_pic: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    /// Display label, e.g. "Prefer not to say"
    pub gender: Option<String>,
    pub bio: String,
    pub phone_number: Option<String>,
}

impl ProfileResponse {
    pub fn new(user: service::User, profile: service::Profile) -> Self {
        Self {
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            full_name: profile.full_name,
            profile_pic: profile.profile_pic,
            date_of_birth: profile.date_of_birth,
            gender: profile.gender.map(|g| g.label().to_string()),
            bio: profile.bio,
            phone_number: profile.phone_number,
        }
    }
}
