//! Properties, category bindings and allowed values

pub mod get;
pub mod insert;
