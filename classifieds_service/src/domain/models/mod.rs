//! Domain models - validation rules and the structures the services reason over

pub mod ad_form;
pub mod category_tree;
pub mod images;
pub mod profile_form;
pub mod property_form;
pub mod widgets;

pub use ad_form::{AdFormLookups, CleanedAd};
pub use category_tree::{CategoryTree, HierarchyError};
pub use images::{ImagePolicy, ImagePolicyErr, upload_path};
pub use property_form::{FieldDescriptor, PropertyForm, field_name, parse_field_name};
