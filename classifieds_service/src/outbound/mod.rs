//! Outbound adapters - implementations of the domain ports

pub mod email_queue;
#[cfg(any(test, feature = "in_memory"))]
pub mod in_memory;
pub mod postgres;

pub use email_queue::{EmailQueue, LoggingMailer};
pub use postgres::ClassifiedsPgStorage;
