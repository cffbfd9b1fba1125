//! `gateway` defines the remote operations provided by the agency
//!
//! The gateway is an authenticated handle, shared by all handlers and by the web boundary.
//! All of its operations are plain remote calls, there is no retry or backoff applied to them.
pub mod types;

pub use types::{AgentRPCBuilder, GatewayError, Invitation, NotificationReceiver, ProtocolRPCBuilder};
