use rst_common::standard::async_trait::async_trait;
use rst_common::with_logging::log::{debug, warn};
use rst_common::with_tokio::tokio;
use rst_common::with_tokio::tokio::sync::mpsc;

use tonic::service::interceptor::InterceptedService;
use tonic::transport::Channel;
use tonic::{Code, Status};

use prople_agency_core::agency::dispatcher::ListenerBuilder;
use prople_agency_core::agency::gateway::{
    AgentRPCBuilder, GatewayError, Invitation, NotificationReceiver, ProtocolRPCBuilder,
};
use prople_agency_core::agency::protocol::{
    ClientID, ConnectionID, CredDefID, CredentialAttribute, ProofAttribute, ProtocolID,
    ProtocolStatus, ProtocolType, ResumeDecision, SchemaID,
};

use super::convert;
use super::interceptor::BearerInterceptor;
use super::proto;
use super::proto::agent_service_client::AgentServiceClient;
use super::proto::protocol;
use super::proto::protocol_service_client::ProtocolServiceClient;

type AuthChannel = InterceptedService<Channel, BearerInterceptor>;

/// `AgencyClient` is the authenticated gateway to the agency
///
/// Cloning the client is cheap, all clones share the same channel
#[derive(Clone)]
pub struct AgencyClient {
    agent: AgentServiceClient<AuthChannel>,
    protocol: ProtocolServiceClient<AuthChannel>,
    buffer: usize,
}

impl AgencyClient {
    pub fn new(channel: Channel, interceptor: BearerInterceptor, buffer: usize) -> Self {
        Self {
            agent: AgentServiceClient::with_interceptor(channel.clone(), interceptor.clone()),
            protocol: ProtocolServiceClient::with_interceptor(channel, interceptor),
            buffer,
        }
    }

    async fn start(
        &self,
        connection_id: ConnectionID,
        protocol_type: ProtocolType,
        start_msg: protocol::StartMsg,
    ) -> Result<ProtocolID, GatewayError> {
        let mut client = self.protocol.clone();
        let response = client
            .start(proto::Protocol {
                connection_id: connection_id.as_str().to_string(),
                type_id: convert::protocol_type_into(protocol_type),
                role: protocol::Role::Initiator as i32,
                start_msg: Some(start_msg),
            })
            .await
            .map_err(map_status)?;

        Ok(ProtocolID::from(response.into_inner().id))
    }
}

/// `map_status` maps a failed call to a [`GatewayError`]
pub fn map_status(status: Status) -> GatewayError {
    match status.code() {
        Code::Unauthenticated | Code::PermissionDenied => {
            GatewayError::Unauthenticated(status.message().to_string())
        }
        Code::Unavailable | Code::DeadlineExceeded => {
            GatewayError::TransportError(status.message().to_string())
        }
        _ => GatewayError::CallError(format!("{:?}: {}", status.code(), status.message())),
    }
}

#[async_trait]
impl AgentRPCBuilder for AgencyClient {
    async fn create_invitation(&self, label: String) -> Result<Invitation, GatewayError> {
        let mut client = self.agent.clone();
        let response = client
            .create_invitation(proto::InvitationBase {
                label,
                id: "".to_string(),
            })
            .await
            .map_err(map_status)?;

        convert::to_invitation(response.into_inner())
    }

    async fn create_schema(
        &self,
        name: String,
        version: String,
        attributes: Vec<String>,
    ) -> Result<SchemaID, GatewayError> {
        let mut client = self.agent.clone();
        let response = client
            .create_schema(proto::SchemaCreate {
                name,
                version,
                attributes,
            })
            .await
            .map_err(map_status)?;

        Ok(SchemaID::from(response.into_inner().id))
    }

    async fn get_schema(&self, schema_id: SchemaID) -> Result<SchemaID, GatewayError> {
        let mut client = self.agent.clone();
        let response = client
            .get_schema(proto::Schema {
                id: schema_id.as_str().to_string(),
                data: "".to_string(),
            })
            .await
            .map_err(map_status)?;

        Ok(SchemaID::from(response.into_inner().id))
    }

    async fn create_cred_def(
        &self,
        schema_id: SchemaID,
        tag: String,
    ) -> Result<CredDefID, GatewayError> {
        let mut client = self.agent.clone();
        let response = client
            .create_cred_def(proto::CredDefCreate {
                schema_id: schema_id.as_str().to_string(),
                tag,
            })
            .await
            .map_err(map_status)?;

        Ok(CredDefID::from(response.into_inner().id))
    }
}

#[async_trait]
impl ProtocolRPCBuilder for AgencyClient {
    async fn status(
        &self,
        protocol_id: ProtocolID,
        protocol_type: ProtocolType,
    ) -> Result<ProtocolStatus, GatewayError> {
        let mut client = self.protocol.clone();
        let response = client
            .status(proto::ProtocolId {
                type_id: convert::protocol_type_into(protocol_type),
                id: protocol_id.as_str().to_string(),
                role: protocol::Role::Unknown as i32,
                connection_id: "".to_string(),
            })
            .await
            .map_err(map_status)?;

        convert::to_status(response.into_inner())
    }

    async fn send_message(
        &self,
        connection_id: ConnectionID,
        content: String,
    ) -> Result<ProtocolID, GatewayError> {
        self.start(
            connection_id,
            ProtocolType::BasicMessage,
            protocol::StartMsg::BasicMessage(protocol::BasicMessageMsg { content }),
        )
        .await
    }

    async fn offer_credential(
        &self,
        connection_id: ConnectionID,
        cred_def_id: CredDefID,
        attributes: Vec<CredentialAttribute>,
    ) -> Result<ProtocolID, GatewayError> {
        self.start(
            connection_id,
            ProtocolType::IssueCredential,
            convert::to_issue_msg(cred_def_id.as_str().to_string(), attributes),
        )
        .await
    }

    async fn request_proof(
        &self,
        connection_id: ConnectionID,
        attributes: Vec<ProofAttribute>,
    ) -> Result<ProtocolID, GatewayError> {
        self.start(
            connection_id,
            ProtocolType::PresentProof,
            convert::to_proof_msg(attributes),
        )
        .await
    }

    async fn resume(
        &self,
        connection_id: ConnectionID,
        protocol_id: ProtocolID,
        protocol_type: ProtocolType,
        decision: ResumeDecision,
    ) -> Result<ProtocolID, GatewayError> {
        let mut client = self.protocol.clone();
        let response = client
            .resume(proto::ProtocolState {
                protocol_id: Some(proto::ProtocolId {
                    type_id: convert::protocol_type_into(protocol_type),
                    id: protocol_id.as_str().to_string(),
                    role: protocol::Role::Resumer as i32,
                    connection_id: connection_id.as_str().to_string(),
                }),
                state: convert::decision_into(decision),
                info: "".to_string(),
            })
            .await
            .map_err(map_status)?;

        Ok(ProtocolID::from(response.into_inner().id))
    }
}

#[async_trait]
impl ListenerBuilder for AgencyClient {
    /// `subscribe` opens the agency stream and pumps it into a bounded channel
    ///
    /// A stream failure is delivered as the last item, after that the channel is closed
    async fn subscribe(&self, client_id: ClientID) -> Result<NotificationReceiver, GatewayError> {
        let mut client = self.agent.clone();
        let mut stream = client
            .listen(proto::ClientId {
                id: client_id.as_str().to_string(),
            })
            .await
            .map_err(map_status)?
            .into_inner();

        let (tx, rx) = mpsc::channel(self.buffer);
        tokio::spawn(async move {
            loop {
                let item = match stream.message().await {
                    Ok(Some(status)) => match status.notification {
                        Some(notification) => Ok(convert::to_notification(notification)),
                        None => {
                            debug!("[grpc] agent status without notification");
                            continue;
                        }
                    },
                    Ok(None) => break,
                    Err(status) => {
                        warn!("[grpc] listen stream failed: {}", status);
                        Err(GatewayError::StreamError(status.message().to_string()))
                    }
                };

                let failed = item.is_err();
                if tx.send(item).await.is_err() || failed {
                    break;
                }
            }
        });

        Ok(rx)
    }
}
