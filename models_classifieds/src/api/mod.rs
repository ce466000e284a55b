//! API layer types - external-facing request and response types.
//!
//! These structs represent the API contract with clients.
//! They use ToSchema for OpenAPI documentation.

pub mod error;
pub mod query_params;
pub mod requests;
pub mod responses;

pub use error::*;
pub use query_params::*;
pub use requests::*;
pub use responses::*;
