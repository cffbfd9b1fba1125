use rst_common::standard::async_trait::async_trait;
use rst_common::with_logging::log::{info, warn};

use super::types::{AuthenticatorBuilder, SessionError, SessionUsecaseBuilder, Token};

/// `Usecase` is the base implementation of [`SessionUsecaseBuilder`]
pub struct Usecase<TAuthenticator>
where
    TAuthenticator: AuthenticatorBuilder,
{
    authenticator: TAuthenticator,
}

impl<TAuthenticator> Usecase<TAuthenticator>
where
    TAuthenticator: AuthenticatorBuilder,
{
    pub fn new(authenticator: TAuthenticator) -> Self {
        Self { authenticator }
    }
}

#[async_trait]
impl<TAuthenticator> SessionUsecaseBuilder for Usecase<TAuthenticator>
where
    TAuthenticator: AuthenticatorBuilder,
{
    async fn login(&self) -> Result<Token, SessionError> {
        match self.authenticator.login().await {
            Ok(token) => {
                info!("[session] login succeeded");
                return Ok(token);
            }
            Err(err) => warn!("[session] login failed, trying to register: {}", err),
        }

        self.authenticator.register().await?;
        info!("[session] register succeeded");

        self.authenticator.login().await
    }
}
