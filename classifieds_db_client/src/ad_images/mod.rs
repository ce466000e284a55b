//! Image metadata of ads

pub mod delete;
pub mod get;
pub mod insert;
