//! Classifieds Database Client
//!
//! This crate provides database access functions for the classifieds service, handling
//! the category tree, properties and their bindings, the location tree, ads with their
//! images and property values, and user profiles.

use sqlx::migrate::Migrator;

pub mod ad_images;
pub mod ad_property_values;
pub mod ads;
pub mod categories;
pub mod error;
pub mod locations;
pub mod properties;
pub mod users;

/// Schema migrations, applied at start-up and by `sqlx::test`
pub static MIGRATIONS: Migrator = sqlx::migrate!("./migrations");
