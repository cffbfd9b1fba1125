//! `resolver` fetches the authoritative status of a notified protocol
mod resolver;
pub mod types;

pub use resolver::StatusResolver;
pub use types::StatusResolverBuilder;
