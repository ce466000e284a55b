//! Typed interpretation of the text stored for an ad property

use serde::{Deserialize, Serialize};

use crate::shared::DataType;

/// A stored property value coerced by the property's [DataType].
/// Serialized without a tag so clients see plain JSON numbers, booleans and strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TypedValue {
    Int(i64),
    Float(f64),
    Bool(bool),
    Text(String),
}

impl TypedValue {
    /// Coerce a stored text value.
    ///
    /// Numbers parse as integers first and fall back to floats; a value that is
    /// neither is returned unchanged as text. Booleans are true only for
    /// `true`, `1` or `yes` (any case).
    pub fn coerce(data_type: DataType, raw: &str) -> Self {
        match data_type {
            DataType::Number => {
                let trimmed = raw.trim();
                if let Ok(i) = trimmed.parse::<i64>() {
                    TypedValue::Int(i)
                } else if let Ok(f) = trimmed.parse::<f64>() {
                    TypedValue::Float(f)
                } else {
                    TypedValue::Text(raw.to_string())
                }
            }
            DataType::Boolean => TypedValue::Bool(is_truthy(raw)),
            DataType::Text | DataType::Choice => TypedValue::Text(raw.to_string()),
        }
    }
}

/// Truthy text forms accepted for boolean properties
pub fn is_truthy(raw: &str) -> bool {
    matches!(raw.to_lowercase().as_str(), "true" | "1" | "yes")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_prefer_integers() {
        assert_eq!(
            TypedValue::coerce(DataType::Number, "128"),
            TypedValue::Int(128)
        );
        assert_eq!(
            TypedValue::coerce(DataType::Number, "12.5"),
            TypedValue::Float(12.5)
        );
        assert_eq!(
            TypedValue::coerce(DataType::Number, "lots"),
            TypedValue::Text("lots".to_string())
        );
    }

    #[test]
    fn booleans_accept_truthy_forms() {
        for raw in ["true", "TRUE", "1", "Yes"] {
            assert_eq!(
                TypedValue::coerce(DataType::Boolean, raw),
                TypedValue::Bool(true)
            );
        }
        for raw in ["false", "0", "no", "", "on"] {
            assert_eq!(
                TypedValue::coerce(DataType::Boolean, raw),
                TypedValue::Bool(false)
            );
        }
    }

    #[test]
    fn text_and_choice_are_untouched() {
        assert_eq!(
            TypedValue::coerce(DataType::Choice, "Red"),
            TypedValue::Text("Red".to_string())
        );
        assert_eq!(
            TypedValue::coerce(DataType::Text, " 42 "),
            TypedValue::Text(" 42 ".to_string())
        );
    }

    #[test]
    fn serializes_untagged() {
        let values = vec![
            TypedValue::Int(128),
            TypedValue::Bool(true),
            TypedValue::Text("blue".to_string()),
        ];
        assert_eq!(
            serde_json::to_value(&values).unwrap(),
            serde_json::json!([128, true, "blue"])
        );
    }
}
