//! `session` logs in the agent at the agency
//!
//! The agent identity is protected by an external WebAuthn authenticator. A login is tried
//! first, and when it fails the agent is registered and logged in again. The resulting
//! [`types::Token`] authorizes every later call to the agency.
pub mod types;
pub mod usecase;
