use std::time::Duration;

use rst_common::standard::serde::{self, Deserialize};

use prople_agency_core::agency::issuing::types::IssuingParams;

use crate::common::helpers::require;
use crate::common::types::{CommonError, ToValidate};

/// `Issuing` configures the issued email credential and its proof request
#[derive(Deserialize, Debug, Clone)]
#[serde(crate = "self::serde")]
#[serde(default)]
pub struct Issuing {
    pub(super) cred_def_file: String,
    pub(super) schema_name: String,
    pub(super) schema_version: String,
    pub(super) attributes: Vec<String>,
    pub(super) proof_attributes: Vec<String>,
    pub(super) wait_attempts: u32,
    pub(super) wait_interval_secs: u64,
}

impl Issuing {
    pub fn get_cred_def_file(&self) -> String {
        self.cred_def_file.to_owned()
    }

    pub fn get_proof_attributes(&self) -> Vec<String> {
        self.proof_attributes.to_owned()
    }

    /// The credential definition is tagged with the agent user name
    pub fn build_params(&self, tag: String) -> IssuingParams {
        IssuingParams {
            schema_name: self.schema_name.to_owned(),
            schema_version: self.schema_version.to_owned(),
            attributes: self.attributes.to_owned(),
            tag,
            wait_attempts: self.wait_attempts,
            wait_interval: Duration::from_secs(self.wait_interval_secs),
        }
    }
}

impl Default for Issuing {
    fn default() -> Self {
        Self {
            cred_def_file: "CRED_DEF_ID".to_string(),
            schema_name: "email".to_string(),
            schema_version: "1.0".to_string(),
            attributes: vec!["email".to_string()],
            proof_attributes: vec!["email".to_string()],
            wait_attempts: 30,
            wait_interval_secs: 1,
        }
    }
}

impl ToValidate for Issuing {
    fn validate(&self) -> Result<(), CommonError> {
        require(&self.cred_def_file, "issuing:cred_def_file")?;
        require(&self.schema_name, "issuing:schema_name")?;
        require(&self.schema_version, "issuing:schema_version")?;

        if self.attributes.is_empty() {
            return Err(CommonError::ValidationError(
                "config: issuing:attributes is missing".to_string(),
            ));
        }

        if self.proof_attributes.is_empty() {
            return Err(CommonError::ValidationError(
                "config: issuing:proof_attributes is missing".to_string(),
            ));
        }

        if self.wait_attempts == 0 {
            return Err(CommonError::ValidationError(
                "config: issuing:wait_attempts must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::helpers;

    #[test]
    fn test_default_params() {
        let issuing = Issuing::default();
        assert!(helpers::validate(issuing.clone()).is_ok());

        let params = issuing.build_params("agent".to_string());
        assert_eq!(params, IssuingParams::email("agent".to_string()))
    }

    #[test]
    fn test_issuing_validation_failed() {
        let mut issuing = Issuing::default();
        issuing.attributes = vec![];

        let validation = helpers::validate(issuing.clone());
        assert!(validation.is_err());
        assert!(validation
            .unwrap_err()
            .to_string()
            .contains("issuing:attributes"));

        issuing.attributes = vec!["email".to_string()];
        issuing.wait_attempts = 0;
        let validation = helpers::validate(issuing);
        assert!(validation.is_err());
        assert!(validation
            .unwrap_err()
            .to_string()
            .contains("issuing:wait_attempts"))
    }
}
