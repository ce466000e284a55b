//! Stored property values of ads

pub mod delete;
pub mod get;
pub mod upsert;
