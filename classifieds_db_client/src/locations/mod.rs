//! Location tree lookups

pub mod get;
