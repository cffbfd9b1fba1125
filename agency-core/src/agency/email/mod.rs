//! `email` abstracts the out-of-band email delivery used to verify an email address
//! before a credential is offered
pub mod types;

pub use types::{Email, EmailError, EmailSenderBuilder};
