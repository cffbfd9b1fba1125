//! `registry` provides the per-handler conversation store
//!
//! A registry is owned by exactly one handler. The dispatcher task and the web requests both
//! touch the same registry, so every access goes through an async lock, and each state
//! transition must be done inside a single [`ConnectionRegistry::update`] call.
mod registry;
pub use registry::ConnectionRegistry;
