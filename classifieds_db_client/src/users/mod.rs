//! Users and their profiles

pub mod get;
pub mod upsert;
