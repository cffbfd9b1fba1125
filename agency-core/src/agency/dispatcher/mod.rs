//! `dispatcher` owns the notification stream of the agent
//!
//! A [`Dispatcher`] subscribes once, with a freshly generated client id, and then for every
//! received notification it resolves the current protocol status and delivers it to all
//! registered handlers.
//!
//! ```text
//! StatusUpdate + OK      ─► capability matching the protocol type, on every handler
//! StatusUpdate + not OK  ─► logged only
//! ProtocolPaused         ─► on_proof_paused, on every handler
//! unknown kind or type   ─► logged only
//! ```
//!
//! Handlers are invoked one by one in their registration order. Each invocation runs in its
//! own task which is awaited before the next handler, so an error or a panic inside a handler
//! is logged and never reaches the dispatching loop.
mod capability;
mod dispatcher;
pub mod types;

pub use dispatcher::Dispatcher;
pub use types::{DispatchError, ListenerBuilder, ReconnectPolicy};
