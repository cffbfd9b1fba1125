use rst_common::standard::serde::{self, Deserialize};

use crate::common::types::{CommonError, ToValidate};

use super::{Agency, App, Dispatcher, Email, Issuing};

/// `Config` is the whole agent configuration
///
/// The agent can be configured from the TOML file, from the environment, or both. Values
/// coming from the environment always win, see [`Config::merge_env_with`].
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(crate = "self::serde")]
#[serde(default)]
pub struct Config {
    pub(super) app: App,
    pub(super) agency: Agency,
    pub(super) email: Email,
    pub(super) issuing: Issuing,
    pub(super) dispatcher: Dispatcher,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn app(&self) -> &App {
        &self.app
    }

    pub fn agency(&self) -> &Agency {
        &self.agency
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn issuing(&self) -> &Issuing {
        &self.issuing
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    pub fn merge_env(&mut self) -> Result<(), CommonError> {
        self.merge_env_with(|key| std::env::var(key).ok())
    }

    /// `merge_env_with` overrides the config values with the given variables
    ///
    /// | variable | config |
    /// |----------|--------|
    /// | `FCLI_USER` | `agency.user` |
    /// | `FCLI_URL` | `agency.auth_url` |
    /// | `FCLI_KEY` | `agency.key` |
    /// | `FCLI_ORIGIN` | `agency.origin` |
    /// | `FCLI_TLS_PATH` | `agency.tls_path` |
    /// | `AGENCY_API_SERVER` | `agency.server` |
    /// | `AGENCY_API_SERVER_PORT` | `agency.port` |
    /// | `SENDGRID_API_KEY` | `email.api_key` |
    /// | `SENDGRID_SENDER` | `email.sender` |
    pub fn merge_env_with<F>(&mut self, lookup: F) -> Result<(), CommonError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|value| !value.is_empty());

        if let Some(user) = lookup("FCLI_USER") {
            self.agency.user = user;
        }

        if let Some(url) = lookup("FCLI_URL") {
            self.agency.auth_url = url;
        }

        if let Some(key) = lookup("FCLI_KEY") {
            self.agency.key = key;
        }

        if let Some(origin) = lookup("FCLI_ORIGIN") {
            self.agency.origin = origin;
        }

        if let Some(tls_path) = lookup("FCLI_TLS_PATH") {
            self.agency.tls_path = Some(tls_path);
        }

        if let Some(server) = lookup("AGENCY_API_SERVER") {
            self.agency.server = server;
        }

        if let Some(port) = lookup("AGENCY_API_SERVER_PORT") {
            self.agency.port = port.parse::<u16>().map_err(|err| {
                CommonError::EnvError(format!("AGENCY_API_SERVER_PORT: {}", err))
            })?;
        }

        if let Some(api_key) = lookup("SENDGRID_API_KEY") {
            self.email.api_key = api_key;
        }

        if let Some(sender) = lookup("SENDGRID_SENDER") {
            self.email.sender = sender;
        }

        Ok(())
    }
}

impl ToValidate for Config {
    fn validate(&self) -> Result<(), CommonError> {
        self.app.validate()?;
        self.agency.validate()?;
        self.email.validate()?;
        self.issuing.validate()?;
        self.dispatcher.validate()?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    use crate::common::helpers;

    fn generate_env(pairs: Vec<(&str, &str)>) -> HashMap<String, String> {
        pairs
            .into_iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect()
    }

    #[test]
    fn test_validation_failed() {
        let cfg = Config::default();
        let validation = helpers::validate(cfg);
        assert!(validation.is_err());
        assert!(matches!(
            validation.unwrap_err(),
            CommonError::ValidationError(_)
        ))
    }

    #[test]
    fn test_merge_env() {
        let env = generate_env(vec![
            ("FCLI_USER", "env-agent"),
            ("FCLI_URL", "https://auth.env.example.com"),
            ("FCLI_KEY", "env-key"),
            ("FCLI_ORIGIN", "https://env.example.com"),
            ("FCLI_TLS_PATH", "/tmp/cert"),
            ("AGENCY_API_SERVER", "agency.env.example.com"),
            ("AGENCY_API_SERVER_PORT", "50053"),
            ("SENDGRID_API_KEY", "sendgrid-key"),
            ("SENDGRID_SENDER", "agent@example.com"),
        ]);

        let mut cfg = Config::default();
        let merged = cfg.merge_env_with(|key| env.get(key).cloned());
        assert!(merged.is_ok());
        assert!(helpers::validate(cfg.clone()).is_ok());

        assert_eq!(cfg.agency().get_user(), "env-agent");
        assert_eq!(
            cfg.agency().get_server(),
            ("agency.env.example.com".to_string(), 50053)
        );
        assert_eq!(cfg.agency().get_tls_path(), Some("/tmp/cert".to_string()));

        let (url, key, origin) = cfg.agency().get_authn();
        assert_eq!(url, "https://auth.env.example.com");
        assert_eq!(key, "env-key");
        assert_eq!(origin, "https://env.example.com");

        let (_, api_key, sender) = cfg.email().get_email_config();
        assert_eq!(api_key, "sendgrid-key");
        assert_eq!(sender, "agent@example.com")
    }

    #[test]
    fn test_merge_env_keeps_file_values() {
        let env = generate_env(vec![("FCLI_USER", "")]);

        let mut cfg = Config::default();
        cfg.agency.user = "file-agent".to_string();

        let merged = cfg.merge_env_with(|key| env.get(key).cloned());
        assert!(merged.is_ok());
        assert_eq!(cfg.agency().get_user(), "file-agent")
    }

    #[test]
    fn test_merge_env_invalid_port() {
        let env = generate_env(vec![("AGENCY_API_SERVER_PORT", "not-a-port")]);

        let mut cfg = Config::default();
        let merged = cfg.merge_env_with(|key| env.get(key).cloned());
        assert!(matches!(merged, Err(CommonError::EnvError(_))))
    }
}
