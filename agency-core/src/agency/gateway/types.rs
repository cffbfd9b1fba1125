use rst_common::standard::async_trait::async_trait;
use rst_common::with_errors::thiserror::{self, Error};
use rst_common::with_tokio::tokio::sync::mpsc::Receiver;

use crate::agency::protocol::{
    ConnectionID, CredDefID, CredentialAttribute, Notification, ProofAttribute, ProtocolID,
    ProtocolStatus, ProtocolType, ResumeDecision, SchemaID,
};

/// `GatewayError` contains all possible errors when talking to the remote agency
#[derive(Debug, PartialEq, Error, Clone)]
pub enum GatewayError {
    #[error("transport error: {0}")]
    TransportError(String),

    #[error("unauthenticated: {0}")]
    Unauthenticated(String),

    #[error("remote call error: {0}")]
    CallError(String),

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("stream error: {0}")]
    StreamError(String),
}

/// The receiving side of a notification subscription
///
/// An `Err` item or a closed channel both mean the subscription is broken
pub type NotificationReceiver = Receiver<Result<Notification, GatewayError>>;

/// `Invitation` is a pairwise connection invitation created by the agency
#[derive(Debug, Clone, PartialEq)]
pub struct Invitation {
    id: ConnectionID,
    url: String,
    json: String,
}

impl Invitation {
    pub fn new(id: ConnectionID, url: String, json: String) -> Self {
        Self { id, url, json }
    }

    /// The invitation id is also the connection id once the counterpart accepts it
    pub fn get_id(&self) -> &ConnectionID {
        &self.id
    }

    pub fn get_url(&self) -> &str {
        &self.url
    }

    pub fn get_json(&self) -> &str {
        &self.json
    }
}

/// `AgentRPCBuilder` groups the agent level operations, which are not bound to any
/// existing connection
#[async_trait]
pub trait AgentRPCBuilder: Clone + Send + Sync {
    /// `create_invitation` asks the agency for a new pairwise invitation, the `label` is
    /// the name shown to the counterpart
    async fn create_invitation(&self, label: String) -> Result<Invitation, GatewayError>;

    async fn create_schema(
        &self,
        name: String,
        version: String,
        attributes: Vec<String>,
    ) -> Result<SchemaID, GatewayError>;

    /// `get_schema` only succeeds once the schema is readable from the ledger
    async fn get_schema(&self, schema_id: SchemaID) -> Result<SchemaID, GatewayError>;

    async fn create_cred_def(
        &self,
        schema_id: SchemaID,
        tag: String,
    ) -> Result<CredDefID, GatewayError>;
}

/// `ProtocolRPCBuilder` groups the protocol level operations, used to start or continue
/// `DIDComm` protocols over an existing connection
#[async_trait]
pub trait ProtocolRPCBuilder: Clone + Send + Sync {
    async fn status(
        &self,
        protocol_id: ProtocolID,
        protocol_type: ProtocolType,
    ) -> Result<ProtocolStatus, GatewayError>;

    async fn send_message(
        &self,
        connection_id: ConnectionID,
        content: String,
    ) -> Result<ProtocolID, GatewayError>;

    async fn offer_credential(
        &self,
        connection_id: ConnectionID,
        cred_def_id: CredDefID,
        attributes: Vec<CredentialAttribute>,
    ) -> Result<ProtocolID, GatewayError>;

    async fn request_proof(
        &self,
        connection_id: ConnectionID,
        attributes: Vec<ProofAttribute>,
    ) -> Result<ProtocolID, GatewayError>;

    /// `resume` continues a paused protocol with the given decision
    async fn resume(
        &self,
        connection_id: ConnectionID,
        protocol_id: ProtocolID,
        protocol_type: ProtocolType,
        decision: ResumeDecision,
    ) -> Result<ProtocolID, GatewayError>;
}
