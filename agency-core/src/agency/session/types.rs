use derive_more::{AsRef, From, Into};
use the_newtype::Newtype;

use rst_common::standard::async_trait::async_trait;
use rst_common::with_errors::thiserror::{self, Error};

#[derive(Debug, PartialEq, Error, Clone)]
pub enum SessionError {
    #[error("login error: {0}")]
    LoginError(String),

    #[error("register error: {0}")]
    RegisterError(String),
}

/// `Token` is the bearer token issued by the authenticator
#[derive(Clone, PartialEq, Newtype, From, Into, AsRef)]
pub struct Token(String);

impl Token {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Token(***)")
    }
}

/// `AuthenticatorBuilder` is the black-box authenticator of the agent identity
#[async_trait]
pub trait AuthenticatorBuilder: Clone + Send + Sync {
    async fn login(&self) -> Result<Token, SessionError>;
    async fn register(&self) -> Result<(), SessionError>;
}

#[async_trait]
pub trait SessionUsecaseBuilder: Send + Sync {
    /// `login` always ends with a token, or with the last error of the login attempts
    async fn login(&self) -> Result<Token, SessionError>;
}
