//! Classifieds Models
//!
//! This crate defines the data models for the classifieds system using a layered architecture:
//!
//! - **shared**: Shared types (DataType, FieldKind, Gender) used across all layers
//! - **db**: Database row types (used only by classifieds_db_client)
//! - **service**: Business logic layer types (used within classifieds_service)
//! - **api**: API layer types (external-facing requests/responses)
//! - **search**: the document shape handed to the external search index

pub mod api;
pub mod db;
pub mod search;
pub mod service;
pub mod shared;

// Re-export commonly used shared types for convenience
pub use shared::{DataType, FieldKind, Gender};
