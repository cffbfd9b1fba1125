use rst_common::standard::async_trait::async_trait;
use rst_common::with_logging::log::info;

use crate::agency::gateway::ProtocolRPCBuilder;
use crate::agency::protocol::{
    ConnectionID, CredDefID, DIDExchangeStatus, Notification, PresentProofStatus,
    ProofAttribute, ProtocolType, ResumeDecision,
};
use crate::agency::registry::ConnectionRegistry;

use super::types::{HandlerBuilder, HandlerError};

/// `Verifier` requests a proof of the credential issued by this agent
///
/// Only the connections registered through [`Verifier::add_invitation`] receive a proof
/// request, but every paused proof is accepted
pub struct Verifier<TRPCClient>
where
    TRPCClient: ProtocolRPCBuilder,
{
    rpc: TRPCClient,
    cred_def_id: CredDefID,
    proof_attributes: Vec<String>,
    connections: ConnectionRegistry<()>,
}

impl<TRPCClient> Verifier<TRPCClient>
where
    TRPCClient: ProtocolRPCBuilder,
{
    pub fn new(rpc: TRPCClient, cred_def_id: CredDefID, proof_attributes: Vec<String>) -> Self {
        Self {
            rpc,
            cred_def_id,
            proof_attributes,
            connections: ConnectionRegistry::new(),
        }
    }

    pub async fn add_invitation(&self, id: ConnectionID) {
        self.connections.track(id, ()).await
    }

    pub async fn is_tracked(&self, id: &ConnectionID) -> bool {
        self.connections.contains(id).await
    }

    fn build_proof_attributes(&self) -> Vec<ProofAttribute> {
        self.proof_attributes
            .iter()
            .map(|name| ProofAttribute {
                name: name.to_owned(),
                cred_def_id: self.cred_def_id.clone(),
            })
            .collect()
    }
}

#[async_trait]
impl<TRPCClient> HandlerBuilder for Verifier<TRPCClient>
where
    TRPCClient: ProtocolRPCBuilder,
{
    fn name(&self) -> &str {
        "verifier"
    }

    async fn on_new_connection(
        &self,
        notification: &Notification,
        _status: &DIDExchangeStatus,
    ) -> Result<(), HandlerError> {
        let id = notification.get_connection_id();
        if !self.connections.contains(id).await {
            return Ok(());
        }

        info!("[verifier] request proof, conn id: {}", id.as_str());
        let protocol_id = self
            .rpc
            .request_proof(id.clone(), self.build_proof_attributes())
            .await?;

        info!("[verifier] proof requested: {}", protocol_id.as_str());
        Ok(())
    }

    async fn on_proof_paused(
        &self,
        notification: &Notification,
        status: &PresentProofStatus,
    ) -> Result<(), HandlerError> {
        info!(
            "[verifier] proof paused, conn id: {}, attrs: {:?}",
            notification.get_connection_id().as_str(),
            status.attributes
        );

        let _ = self
            .rpc
            .resume(
                notification.get_connection_id().clone(),
                notification.get_protocol_id().clone(),
                ProtocolType::PresentProof,
                ResumeDecision::Accept,
            )
            .await?;

        Ok(())
    }

    async fn on_proof_done(
        &self,
        notification: &Notification,
        status: &PresentProofStatus,
    ) -> Result<(), HandlerError> {
        let id = notification.get_connection_id();
        if self.connections.remove(id).await.is_some() {
            info!(
                "[verifier] proof verified for {}: {:?}",
                id.as_str(),
                status.attributes
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::mock;
    use mockall::predicate::eq;

    use rst_common::with_tokio::tokio;

    use crate::agency::gateway::GatewayError;
    use crate::agency::protocol::{
        CredentialAttribute, NotificationKind, ProofValue, ProtocolID, ProtocolStatus,
    };

    mock!(
        FakeRPCClient{}

        impl Clone for FakeRPCClient {
            fn clone(&self) -> Self;
        }

        #[async_trait]
        impl ProtocolRPCBuilder for FakeRPCClient {
            async fn status(&self, protocol_id: ProtocolID, protocol_type: ProtocolType) -> Result<ProtocolStatus, GatewayError>;
            async fn send_message(&self, connection_id: ConnectionID, content: String) -> Result<ProtocolID, GatewayError>;
            async fn offer_credential(&self, connection_id: ConnectionID, cred_def_id: CredDefID, attributes: Vec<CredentialAttribute>) -> Result<ProtocolID, GatewayError>;
            async fn request_proof(&self, connection_id: ConnectionID, attributes: Vec<ProofAttribute>) -> Result<ProtocolID, GatewayError>;
            async fn resume(&self, connection_id: ConnectionID, protocol_id: ProtocolID, protocol_type: ProtocolType, decision: ResumeDecision) -> Result<ProtocolID, GatewayError>;
        }
    );

    fn generate_verifier(rpc: MockFakeRPCClient) -> Verifier<MockFakeRPCClient> {
        Verifier::new(
            rpc,
            CredDefID::from("cred-def-1"),
            vec!["email".to_string()],
        )
    }

    fn generate_notification(
        protocol_type: ProtocolType,
        kind: NotificationKind,
        conn: &str,
    ) -> Notification {
        Notification::new(
            ProtocolID::from("protocol-1"),
            protocol_type,
            ConnectionID::from(conn),
            kind,
        )
    }

    fn generate_proof() -> PresentProofStatus {
        PresentProofStatus {
            attributes: vec![ProofValue {
                name: "email".to_string(),
                value: "a@b.com".to_string(),
                cred_def_id: "cred-def-1".to_string(),
            }],
        }
    }

    #[tokio::test]
    async fn test_request_proof_tracked() {
        let mut rpc = MockFakeRPCClient::new();
        rpc.expect_request_proof()
            .with(
                eq(ConnectionID::from("conn-1")),
                eq(vec![ProofAttribute {
                    name: "email".to_string(),
                    cred_def_id: CredDefID::from("cred-def-1"),
                }]),
            )
            .times(1)
            .returning(|_, _| Ok(ProtocolID::from("proof-1")));

        let verifier = generate_verifier(rpc);
        verifier.add_invitation(ConnectionID::from("conn-1")).await;

        let output = verifier
            .on_new_connection(
                &generate_notification(
                    ProtocolType::DIDExchange,
                    NotificationKind::StatusUpdate,
                    "conn-1",
                ),
                &DIDExchangeStatus::default(),
            )
            .await;
        assert!(!output.is_err())
    }

    #[tokio::test]
    async fn test_request_proof_untracked() {
        let mut rpc = MockFakeRPCClient::new();
        rpc.expect_request_proof().never();

        let verifier = generate_verifier(rpc);
        let output = verifier
            .on_new_connection(
                &generate_notification(
                    ProtocolType::DIDExchange,
                    NotificationKind::StatusUpdate,
                    "conn-1",
                ),
                &DIDExchangeStatus::default(),
            )
            .await;
        assert!(!output.is_err())
    }

    #[tokio::test]
    async fn test_request_proof_failed() {
        let mut rpc = MockFakeRPCClient::new();
        rpc.expect_request_proof()
            .times(1)
            .returning(|_, _| Err(GatewayError::CallError("no cred def".to_string())));

        let verifier = generate_verifier(rpc);
        verifier.add_invitation(ConnectionID::from("conn-1")).await;

        let output = verifier
            .on_new_connection(
                &generate_notification(
                    ProtocolType::DIDExchange,
                    NotificationKind::StatusUpdate,
                    "conn-1",
                ),
                &DIDExchangeStatus::default(),
            )
            .await;
        assert!(matches!(output, Err(HandlerError::GatewayError(_))));
        assert!(verifier.is_tracked(&ConnectionID::from("conn-1")).await)
    }

    #[tokio::test]
    async fn test_proof_paused_always_accepted() {
        let mut rpc = MockFakeRPCClient::new();
        rpc.expect_resume()
            .with(
                eq(ConnectionID::from("unknown")),
                eq(ProtocolID::from("protocol-1")),
                eq(ProtocolType::PresentProof),
                eq(ResumeDecision::Accept),
            )
            .times(1)
            .returning(|_, _, _, _| Ok(ProtocolID::from("protocol-1")));

        let verifier = generate_verifier(rpc);
        let output = verifier
            .on_proof_paused(
                &generate_notification(
                    ProtocolType::PresentProof,
                    NotificationKind::ProtocolPaused,
                    "unknown",
                ),
                &generate_proof(),
            )
            .await;
        assert!(!output.is_err())
    }

    #[tokio::test]
    async fn test_proof_done_removes_connection() {
        let verifier = generate_verifier(MockFakeRPCClient::new());
        verifier.add_invitation(ConnectionID::from("conn-1")).await;

        let notification = generate_notification(
            ProtocolType::PresentProof,
            NotificationKind::StatusUpdate,
            "conn-1",
        );

        let output = verifier.on_proof_done(&notification, &generate_proof()).await;
        assert!(!output.is_err());
        assert!(!verifier.is_tracked(&ConnectionID::from("conn-1")).await);

        let output = verifier.on_proof_done(&notification, &generate_proof()).await;
        assert!(!output.is_err())
    }
}
