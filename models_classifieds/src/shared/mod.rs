//! Shared types used across database, service, and API layers.

pub mod data_type;
pub mod field_kind;
pub mod gender;

pub use data_type::DataType;
pub use field_kind::FieldKind;
pub use gender::Gender;
