use rst_common::standard::serde::{self, Deserialize};

use crate::common::helpers::require;
use crate::common::types::{CommonError, ToValidate};

/// `Agency` configures the agent identity and the connection to the agency
///
/// When `token` is set, it is used as the bearer token as it is and the external
/// authenticator is never called
#[derive(Deserialize, Debug, Clone)]
#[serde(crate = "self::serde")]
#[serde(default)]
pub struct Agency {
    pub(super) user: String,
    pub(super) auth_url: String,
    pub(super) key: String,
    pub(super) origin: String,
    pub(super) server: String,
    pub(super) port: u16,
    pub(super) tls_path: Option<String>,
    pub(super) token: Option<String>,
    pub(super) authn_cmd: String,
}

impl Agency {
    pub fn get_user(&self) -> String {
        self.user.to_owned()
    }

    /// Returns the authenticator settings: url, key and origin
    pub fn get_authn(&self) -> (String, String, String) {
        (
            self.auth_url.to_owned(),
            self.key.to_owned(),
            self.origin.to_owned(),
        )
    }

    pub fn get_authn_cmd(&self) -> String {
        self.authn_cmd.to_owned()
    }

    pub fn get_server(&self) -> (String, u16) {
        (self.server.to_owned(), self.port)
    }

    pub fn get_tls_path(&self) -> Option<String> {
        self.tls_path
            .as_ref()
            .filter(|path| !path.trim().is_empty())
            .cloned()
    }

    pub fn get_token(&self) -> Option<String> {
        self.token
            .as_ref()
            .filter(|token| !token.trim().is_empty())
            .cloned()
    }
}

impl Default for Agency {
    fn default() -> Self {
        Self {
            user: "".to_string(),
            auth_url: "http://localhost:8088".to_string(),
            key: "".to_string(),
            origin: "http://localhost:3000".to_string(),
            server: "localhost".to_string(),
            port: 50052,
            tls_path: None,
            token: None,
            authn_cmd: "findy-agent-cli".to_string(),
        }
    }
}

impl ToValidate for Agency {
    fn validate(&self) -> Result<(), CommonError> {
        require(&self.user, "agency:user")?;
        require(&self.server, "agency:server")?;

        if self.port == 0 {
            return Err(CommonError::ValidationError(
                "config: agency:port is missing".to_string(),
            ));
        }

        if self.get_token().is_none() {
            require(&self.auth_url, "agency:auth_url")?;
            require(&self.key, "agency:key")?;
            require(&self.origin, "agency:origin")?;
            require(&self.authn_cmd, "agency:authn_cmd")?;
        }

        Ok(())
    }
}
