use rst_common::standard::async_trait::async_trait;

use prople_agency_core::agency::session::types::{AuthenticatorBuilder, SessionError, Token};

#[derive(Clone)]
pub struct StaticAuthenticator {
    token: Token,
}

impl StaticAuthenticator {
    pub fn new(token: String) -> Self {
        Self {
            token: Token::from(token),
        }
    }
}

#[async_trait]
impl AuthenticatorBuilder for StaticAuthenticator {
    async fn login(&self) -> Result<Token, SessionError> {
        Ok(self.token.clone())
    }

    /// The token owner is already registered
    async fn register(&self) -> Result<(), SessionError> {
        Ok(())
    }
}
