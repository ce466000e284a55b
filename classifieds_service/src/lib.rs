//! Classifieds Service library following hexagonal architecture pattern
//!
//! This library provides the classifieds domain logic (category tree, dynamic
//! property forms, ad persistence, locations and profiles) and the adapters
//! that connect it to Postgres, the confirmation email queue and axum.

pub mod domain;
pub mod inbound;
pub mod outbound;
