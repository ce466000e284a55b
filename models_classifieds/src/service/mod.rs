//! Service layer types - the records the domain works with.

pub mod ad;
pub mod category;
pub mod form_errors;
pub mod location;
pub mod property;
pub mod typed_value;
pub mod user;

pub use ad::{Ad, AdImage, AdPropertyValue};
pub use category::Category;
pub use form_errors::FormErrors;
pub use location::{City, Location, LocationHierarchy, NamedRef, Neighbourhood};
pub use property::{CategoryProperty, CategoryPropertySchema, CategoryPropertyValue, Property};
pub use typed_value::TypedValue;
pub use user::{Profile, User};
