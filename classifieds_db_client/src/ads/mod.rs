//! Ad rows

pub mod delete;
pub mod get;
pub mod insert;
pub mod update;
