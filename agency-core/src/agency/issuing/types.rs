use std::time::Duration;

use rst_common::standard::async_trait::async_trait;
use rst_common::with_errors::thiserror::{self, Error};

use crate::agency::gateway::GatewayError;
use crate::agency::protocol::CredDefID;

#[derive(Debug, PartialEq, Error, Clone)]
pub enum IssuingError {
    #[error("repository error: {0}")]
    RepoError(String),

    #[error("gateway error: {0}")]
    GatewayError(String),

    #[error("schema not readable after {0} attempts")]
    SchemaTimeout(u32),
}

impl From<GatewayError> for IssuingError {
    fn from(value: GatewayError) -> Self {
        IssuingError::GatewayError(value.to_string())
    }
}

/// `CredDefRepoBuilder` persists the credential definition id between runs
#[async_trait]
pub trait CredDefRepoBuilder: Clone + Send + Sync {
    async fn get_cred_def_id(&self) -> Result<Option<CredDefID>, IssuingError>;
    async fn save_cred_def_id(&self, id: CredDefID) -> Result<(), IssuingError>;
}

/// `IssuingParams` describes the schema and the credential definition to create
#[derive(Debug, Clone, PartialEq)]
pub struct IssuingParams {
    pub schema_name: String,
    pub schema_version: String,
    pub attributes: Vec<String>,
    pub tag: String,

    /// The schema is polled at most `wait_attempts` times, `wait_interval` apart
    pub wait_attempts: u32,
    pub wait_interval: Duration,
}

impl IssuingParams {
    /// The email schema, with a single `email` attribute
    pub fn email(tag: String) -> Self {
        Self {
            schema_name: String::from("email"),
            schema_version: String::from("1.0"),
            attributes: vec![String::from("email")],
            tag,
            wait_attempts: 30,
            wait_interval: Duration::from_secs(1),
        }
    }
}

#[async_trait]
pub trait IssuingUsecaseBuilder: Send + Sync {
    /// `prepare` returns the credential definition id used to offer credentials
    async fn prepare(&self) -> Result<CredDefID, IssuingError>;
}
