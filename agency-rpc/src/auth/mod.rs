//! `auth` provides the authenticators used to login the agent
//!
//! - [`CliAuthenticator`] runs the external WebAuthn authenticator command
//! - [`StaticAuthenticator`] returns a token issued beforehand
mod cli;
pub use cli::{AuthnParams, CliAuthenticator};

mod token;
pub use token::StaticAuthenticator;

use rst_common::standard::async_trait::async_trait;

use prople_agency_core::agency::session::types::{AuthenticatorBuilder, SessionError, Token};

/// `Authenticator` is the authenticator selected from the config
#[derive(Clone)]
pub enum Authenticator {
    Cli(CliAuthenticator),
    Static(StaticAuthenticator),
}

#[async_trait]
impl AuthenticatorBuilder for Authenticator {
    async fn login(&self) -> Result<Token, SessionError> {
        match self {
            Authenticator::Cli(authenticator) => authenticator.login().await,
            Authenticator::Static(authenticator) => authenticator.login().await,
        }
    }

    async fn register(&self) -> Result<(), SessionError> {
        match self {
            Authenticator::Cli(authenticator) => authenticator.register().await,
            Authenticator::Static(authenticator) => authenticator.register().await,
        }
    }
}
