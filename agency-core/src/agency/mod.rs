//! `agency` is a domain used to drive an agent hosted by a remote agency
//!
//! There are several sub-domains in it:
//!
//! - `protocol`
//! - `gateway`
//! - `resolver`
//! - `registry`
//! - `handler`
//! - `dispatcher`
//! - `email`
//! - `session`
//! - `issuing`
//!
//! ---
//!
//! The `protocol` sub-domain contains the shared vocabulary between the agency and this agent,
//! like the [`protocol::Notification`] envelope and the [`protocol::ProtocolStatus`] snapshot.
//!
//! The `gateway` sub-domain defines the remote operations an agent is able to invoke through
//! the agency, such as creating an invitation, sending a basic message, offering a credential
//! or requesting a proof.
//!
//! ---
//!
//! The `dispatcher` owns the long-lived notification stream. For each received notification it
//! asks the `resolver` for the authoritative protocol status and then fans the event out to
//! all registered handlers, in their registration order.
//!
//! Each `handler` is an independent state machine. A handler that needs to track its
//! conversations keeps its own [`registry::ConnectionRegistry`], keyed by the connection id,
//! and nothing else is shared between handlers.
//!
//! ```text
//! Agency ──notification──► Dispatcher ──status──► Resolver
//!                              │
//!                              ├──► Greeter
//!                              ├──► Issuer   (registry: email, verified)
//!                              └──► Verifier (registry: presence)
//! ```
//!
//! ---
//!
//! The `session` and `issuing` sub-domains are used once during the agent startup, to login
//! the agent and to make sure a credential definition exists before any credential can be offered.
pub mod dispatcher;
pub mod email;
pub mod gateway;
pub mod handler;
pub mod issuing;
pub mod protocol;
pub mod registry;
pub mod resolver;
pub mod session;
