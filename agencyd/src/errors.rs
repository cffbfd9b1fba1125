use rst_common::with_errors::thiserror::{self, Error};

#[derive(Debug, Error)]
pub enum AgencydError {
    #[error("config error: {0}")]
    ConfigError(String),

    #[error("session error: {0}")]
    SessionError(String),

    #[error("gateway error: {0}")]
    GatewayError(String),

    #[error("issuing error: {0}")]
    IssuingError(String),

    #[error("dispatch error: {0}")]
    DispatchError(String),

    #[error("server error: {0}")]
    ServerError(String),
}
