//! Inbound adapters - HTTP handlers and other entry points

pub mod http;

pub use http::{ClassifiedsRouterState, classifieds_router};
