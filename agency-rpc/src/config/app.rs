use rst_common::standard::serde::{self, Deserialize};

use crate::common::helpers::require;
use crate::common::types::{CommonError, ToValidate};

/// `App` configures the web boundary of the agent
#[derive(Deserialize, Debug, Clone)]
#[serde(crate = "self::serde")]
#[serde(default)]
pub struct App {
    pub(super) host: String,
    pub(super) port: String,

    /// Public base url, used to build the links sent by email
    pub(super) public_url: String,
    pub(super) timeout_secs: u64,
}

impl App {
    pub fn get_app_config(&self) -> (String, String) {
        (self.host.to_owned(), self.port.to_owned())
    }

    pub fn get_public_url(&self) -> String {
        self.public_url.trim_end_matches('/').to_owned()
    }

    pub fn get_timeout_secs(&self) -> u64 {
        self.timeout_secs
    }
}

impl Default for App {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: "3001".to_string(),
            public_url: "http://localhost:3001".to_string(),
            timeout_secs: 10,
        }
    }
}

impl ToValidate for App {
    fn validate(&self) -> Result<(), CommonError> {
        require(&self.host, "app:host")?;
        require(&self.port, "app:port")?;
        require(&self.public_url, "app:public_url")?;

        if self.timeout_secs == 0 {
            return Err(CommonError::ValidationError(
                "config: app:timeout_secs must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::env;
    use std::path::PathBuf;

    use rstdev_config::format::use_toml;
    use rstdev_config::parser::from_file;
    use rstdev_config::{types::ConfigError, Builder};

    use crate::common::helpers;

    #[test]
    fn test_parse_app_config() -> Result<(), ConfigError> {
        let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        path.push("src/config/fixtures");

        let toml_file = format!("{}/config_app.toml", path.display());
        let config_toml = {
            let config_builder: Result<App, ConfigError> =
                Builder::new(from_file(toml_file)).fetch()?.parse(use_toml);

            config_builder
        };

        assert!(!config_toml.is_err());

        let config_app = config_toml.unwrap();
        assert_eq!(config_app.host, "localhost".to_string());
        assert_eq!(config_app.port, "8181".to_string());
        assert_eq!(config_app.get_public_url(), "https://agent.example.com");
        assert_eq!(config_app.get_timeout_secs(), 10);
        Ok(())
    }

    #[test]
    fn test_app_validation_failed() {
        let mut app = App::default();
        app.port = "".to_string();

        let validation = helpers::validate(app.clone());
        assert!(validation.is_err());
        assert!(validation.unwrap_err().to_string().contains("app:port"));

        app.port = "3001".to_string();
        app.timeout_secs = 0;
        let validation = helpers::validate(app);
        assert!(validation.is_err());
        assert!(validation
            .unwrap_err()
            .to_string()
            .contains("app:timeout_secs"))
    }
}
