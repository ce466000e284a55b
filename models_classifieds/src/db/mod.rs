//! Database layer types - used only by classifieds_db_client.
//!
//! These structs directly map to database rows (including joined columns).
//! They should not be exposed outside of the db_client.

pub mod ad;
pub mod category;
pub mod error;
pub mod location;
pub mod property;
pub mod user;

pub use ad::{Ad, AdImage, AdPropertyValue};
pub use category::Category;
pub use error::DbConversionError;
pub use location::{City, Location, LocationHierarchy, Neighbourhood};
pub use property::{BoundProperty, CategoryProperty, CategoryPropertyValue, Property};
pub use user::{Profile, User};
