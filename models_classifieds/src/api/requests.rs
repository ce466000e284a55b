//! API layer request types.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::shared::DataType;

fn default_true() -> bool {
    true
}

// ===== Catalogue Requests =====

/// Request to create a category, optionally under a parent.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateCategoryRequest {
    pub name: String,
    pub parent_id: Option<Uuid>,
    pub image: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

/// Partial category update. `parent_id: null` moves the category to the root.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateCategoryRequest {
    pub name: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    #[schema(value_type = Option<Uuid>, nullable)]
    pub parent_id: Option<Option<Uuid>>,
    pub is_active: Option<bool>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    #[schema(value_type = Option<String>, nullable)]
    pub image: Option<Option<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreatePropertyRequest {
    pub name: String,
    pub data_type: DataType,
}

/// Bind an existing property to a leaf category.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BindPropertyRequest {
    pub property_id: Uuid,
    #[serde(default)]
    pub required: bool,
}

/// Add an allowed value to a choice binding.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AddAllowedValueRequest {
    pub value: String,
    /// Allowed value of another binding of the same category that must be selected
    /// for this value to be valid
    pub depends_on_value_id: Option<Uuid>,
}

// ===== Ad Requests =====

/// Core ad fields. Missing fields are reported as validation errors.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct AdFields {
    pub category_id: Option<Uuid>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub neighbourhood_id: Option<Uuid>,
    pub price: Option<i64>,
    /// Defaults to true
    pub show_phone_number: Option<bool>,
}

/// Inline profile fields submitted together with an ad.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct ProfileFields {
    pub full_name: Option<String>,
    pub phone_number: Option<String>,
}

/// Metadata of an uploaded image. Image bytes are handled by the file store.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ImageUpload {
    pub file_name: String,
    pub size_bytes: u64,
}

/// Create or update submission composing the ad form, the inline profile form,
/// the image formset and the dynamic property form.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct AdSubmission {
    #[serde(default)]
    pub ad: AdFields,
    #[serde(default)]
    pub profile: ProfileFields,
    #[serde(default)]
    pub upload_images: Vec<ImageUpload>,
    /// Ids of existing images to remove (update only)
    #[serde(default)]
    pub delete_images: Vec<Uuid>,
    /// Dynamic property values keyed by field name (`prop_<property id>`)
    #[serde(default)]
    #[schema(value_type = Object)]
    pub properties: BTreeMap<String, serde_json::Value>,
}

// ===== Profile Requests =====

/// Partial profile update. Gender accepts the code or the display label.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateProfileRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub profile_pic: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<String>,
    pub bio: Option<String>,
    pub phone_number: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_category_distinguishes_null_from_missing() {
        let missing: UpdateCategoryRequest = serde_json::from_str(r#"{"name":"Cars"}"#).unwrap();
        assert_eq!(missing.parent_id, None);

        let null: UpdateCategoryRequest = serde_json::from_str(r#"{"parent_id":null}"#).unwrap();
        assert_eq!(null.parent_id, Some(None));

        let id = Uuid::now_v7();
        let set: UpdateCategoryRequest =
            serde_json::from_value(serde_json::json!({ "parent_id": id })).unwrap();
        assert_eq!(set.parent_id, Some(Some(id)));
    }

    #[test]
    fn submission_sections_default() {
        let submission: AdSubmission = serde_json::from_str("{}").unwrap();
        assert!(submission.upload_images.is_empty());
        assert!(submission.properties.is_empty());
        assert_eq!(submission.ad.show_phone_number, None);
    }

    #[test]
    fn create_category_is_active_by_default() {
        let request: CreateCategoryRequest = serde_json::from_str(r#"{"name":"Phones"}"#).unwrap();
        assert!(request.is_active);
        assert_eq!(request.parent_id, None);
    }
}
