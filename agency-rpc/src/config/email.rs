use rst_common::standard::serde::{self, Deserialize};

use crate::common::helpers::require;
use crate::common::types::{CommonError, ToValidate};

/// `Email` configures the transactional email API used for the email verification
#[derive(Deserialize, Debug, Clone)]
#[serde(crate = "self::serde")]
#[serde(default)]
pub struct Email {
    pub(super) api_url: String,
    pub(super) api_key: String,
    pub(super) sender: String,
}

impl Email {
    /// Returns the api url, api key and sender address
    pub fn get_email_config(&self) -> (String, String, String) {
        (
            self.api_url.trim_end_matches('/').to_owned(),
            self.api_key.to_owned(),
            self.sender.to_owned(),
        )
    }
}

impl Default for Email {
    fn default() -> Self {
        Self {
            api_url: "https://api.sendgrid.com".to_string(),
            api_key: "".to_string(),
            sender: "".to_string(),
        }
    }
}

impl ToValidate for Email {
    fn validate(&self) -> Result<(), CommonError> {
        require(&self.api_url, "email:api_url")?;
        require(&self.sender, "email:sender")?;

        Ok(())
    }
}
