use std::process::Command;

use rst_common::standard::async_trait::async_trait;
use rst_common::with_logging::log::debug;
use rst_common::with_tokio::tokio;

use prople_agency_core::agency::session::types::{AuthenticatorBuilder, SessionError, Token};

const SUBCMD_LOGIN: &str = "login";
const SUBCMD_REGISTER: &str = "register";

/// `AuthnParams` are passed to the authenticator command through its `FCLI_*` variables
#[derive(Debug, Clone)]
pub struct AuthnParams {
    pub user: String,
    pub url: String,
    pub key: String,
    pub origin: String,
}

/// `CliAuthenticator` runs `<cmd> authn <login|register>`
///
/// The command prints the bearer token on a successful login
#[derive(Debug, Clone)]
pub struct CliAuthenticator {
    cmd: String,
    params: AuthnParams,
}

impl CliAuthenticator {
    pub fn new(cmd: String, params: AuthnParams) -> Self {
        Self { cmd, params }
    }

    async fn exec(&self, subcmd: &'static str) -> Result<String, String> {
        let cmd = self.cmd.to_owned();
        let params = self.params.clone();

        debug!("[auth] exec {} authn {}", cmd, subcmd);
        let output = tokio::task::spawn_blocking(move || {
            Command::new(cmd)
                .args(["authn", subcmd])
                .env("FCLI_USER", params.user)
                .env("FCLI_URL", params.url)
                .env("FCLI_KEY", params.key)
                .env("FCLI_ORIGIN", params.origin)
                .output()
        })
        .await
        .map_err(|err| err.to_string())?
        .map_err(|err| err.to_string())?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(format!("{}: {}", output.status, stderr.trim()));
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

#[async_trait]
impl AuthenticatorBuilder for CliAuthenticator {
    async fn login(&self) -> Result<Token, SessionError> {
        let token = self
            .exec(SUBCMD_LOGIN)
            .await
            .map_err(SessionError::LoginError)?;

        if token.is_empty() {
            return Err(SessionError::LoginError("empty token".to_string()));
        }

        Ok(Token::from(token))
    }

    async fn register(&self) -> Result<(), SessionError> {
        let _ = self
            .exec(SUBCMD_REGISTER)
            .await
            .map_err(SessionError::RegisterError)?;

        Ok(())
    }
}
