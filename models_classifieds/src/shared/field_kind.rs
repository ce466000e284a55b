use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::shared::DataType;

/// Form field rendered for a bound property
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Char,
    Integer,
    Boolean,
    Choice,
}

impl From<DataType> for FieldKind {
    fn from(data_type: DataType) -> Self {
        match data_type {
            DataType::Text => FieldKind::Char,
            DataType::Number => FieldKind::Integer,
            DataType::Boolean => FieldKind::Boolean,
            DataType::Choice => FieldKind::Choice,
        }
    }
}
