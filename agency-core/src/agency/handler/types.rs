use rst_common::standard::async_trait::async_trait;
use rst_common::with_errors::thiserror::{self, Error};

use crate::agency::email::EmailError;
use crate::agency::gateway::GatewayError;
use crate::agency::protocol::{
    BasicMessageStatus, DIDExchangeStatus, IssueCredentialStatus, Notification,
    PresentProofStatus,
};

/// `HandlerError` is returned from the handler capabilities
///
/// The dispatcher only logs these errors, a failing handler never stops other handlers
/// from receiving the same notification
#[derive(Debug, PartialEq, Error, Clone)]
pub enum HandlerError {
    #[error("gateway error: {0}")]
    GatewayError(String),

    #[error("email error: {0}")]
    EmailError(String),
}

impl From<GatewayError> for HandlerError {
    fn from(value: GatewayError) -> Self {
        HandlerError::GatewayError(value.to_string())
    }
}

impl From<EmailError> for HandlerError {
    fn from(value: EmailError) -> Self {
        HandlerError::EmailError(value.to_string())
    }
}

/// `HandlerBuilder` is the capability set of a notification handler
///
/// All capabilities are called by the dispatcher, sequentially, from a single task.
/// A handler must not assume it is the only one interested in a connection, and it must
/// silently ignore connections it never registered.
#[async_trait]
pub trait HandlerBuilder: Send + Sync {
    /// `name` is used for logging only
    fn name(&self) -> &str;

    /// `on_new_connection` is called once a connection exchange has finished
    async fn on_new_connection(
        &self,
        _notification: &Notification,
        _status: &DIDExchangeStatus,
    ) -> Result<(), HandlerError> {
        Ok(())
    }

    /// `on_message` is called for every finished basic message, including the messages
    /// sent by this agent
    async fn on_message(
        &self,
        _notification: &Notification,
        _status: &BasicMessageStatus,
    ) -> Result<(), HandlerError> {
        Ok(())
    }

    async fn on_credential_issued(
        &self,
        _notification: &Notification,
        _status: &IssueCredentialStatus,
    ) -> Result<(), HandlerError> {
        Ok(())
    }

    /// `on_proof_paused` is called after a presented proof has been verified cryptographically,
    /// but before the protocol is completed. It is delivered to every handler.
    async fn on_proof_paused(
        &self,
        _notification: &Notification,
        _status: &PresentProofStatus,
    ) -> Result<(), HandlerError> {
        Ok(())
    }

    async fn on_proof_done(
        &self,
        _notification: &Notification,
        _status: &PresentProofStatus,
    ) -> Result<(), HandlerError> {
        Ok(())
    }
}
