//! `handler` contains the notification handlers
//!
//! Each handler implements [`HandlerBuilder`], a fixed capability set where every capability
//! is a no-op by default. A handler only overrides the capabilities it is interested in.
//!
//! - [`Greeter`] greets every new connection and logs incoming messages
//! - [`Issuer`] asks for an email address, verifies it and offers an email credential
//! - [`Verifier`] requests a proof of the issued credential
mod greeter;
mod issuer;
pub mod types;
mod verifier;

pub use greeter::Greeter;
pub use issuer::{is_valid_email, Issuer, IssuerConnection, IssuerParams};
pub use types::{HandlerBuilder, HandlerError};
pub use verifier::Verifier;
