//! Data type shared across database, service, and API layers.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Data type of a property, determining how its text value is validated and coerced.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq, Hash, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "property_data_type", rename_all = "lowercase")]
pub enum DataType {
    /// Free text.
    Text,
    /// Whole numbers (stored values may still hold floats).
    Number,
    /// true/false values.
    #[serde(rename = "bool")]
    #[sqlx(rename = "bool")]
    Boolean,
    /// One of the allowed values declared for the category property.
    Choice,
}

impl DataType {
    /// Check if this data type draws its values from an enumerated set
    pub fn has_allowed_values(&self) -> bool {
        matches!(self, DataType::Choice)
    }

    /// Human readable label
    pub fn label(&self) -> &'static str {
        match self {
            DataType::Text => "Text",
            DataType::Number => "Number",
            DataType::Boolean => "Boolean",
            DataType::Choice => "Choice",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boolean_uses_short_wire_name() {
        assert_eq!(
            serde_json::to_string(&DataType::Boolean).unwrap(),
            "\"bool\""
        );
        assert_eq!(
            serde_json::from_str::<DataType>("\"choice\"").unwrap(),
            DataType::Choice
        );
    }

    #[test]
    fn only_choice_has_allowed_values() {
        assert!(DataType::Choice.has_allowed_values());
        assert!(!DataType::Text.has_allowed_values());
        assert!(!DataType::Number.has_allowed_values());
        assert!(!DataType::Boolean.has_allowed_values());
    }
}
