//! Category tree operations

pub mod get;
pub mod insert;
pub mod update;
