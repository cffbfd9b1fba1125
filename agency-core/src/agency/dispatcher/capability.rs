use crate::agency::handler::{HandlerBuilder, HandlerError};
use crate::agency::protocol::{
    BasicMessageStatus, DIDExchangeStatus, IssueCredentialStatus, Notification,
    PresentProofStatus, ProtocolType, StatusDetail,
};

/// `Capability` is a single handler capability together with the resolved status detail
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Capability {
    NewConnection(DIDExchangeStatus),
    Message(BasicMessageStatus),
    CredentialIssued(IssueCredentialStatus),
    ProofPaused(PresentProofStatus),
    ProofDone(PresentProofStatus),
}

impl Capability {
    /// `from_finished` maps a successfully finished protocol to its capability
    ///
    /// A detail that does not belong to the notified protocol type maps to nothing
    pub(crate) fn from_finished(protocol_type: ProtocolType, detail: StatusDetail) -> Option<Self> {
        match (protocol_type, detail) {
            (ProtocolType::DIDExchange, StatusDetail::DIDExchange(status)) => {
                Some(Capability::NewConnection(status))
            }
            (ProtocolType::BasicMessage, StatusDetail::BasicMessage(status)) => {
                Some(Capability::Message(status))
            }
            (ProtocolType::IssueCredential, StatusDetail::IssueCredential(status)) => {
                Some(Capability::CredentialIssued(status))
            }
            (ProtocolType::PresentProof, StatusDetail::PresentProof(status)) => {
                Some(Capability::ProofDone(status))
            }
            _ => None,
        }
    }

    /// `from_paused` always builds [`Capability::ProofPaused`], an unexpected detail is
    /// replaced by an empty proof
    pub(crate) fn from_paused(detail: StatusDetail) -> Self {
        match detail {
            StatusDetail::PresentProof(status) => Capability::ProofPaused(status),
            _ => Capability::ProofPaused(PresentProofStatus::default()),
        }
    }

    pub(crate) fn name(&self) -> &'static str {
        match self {
            Capability::NewConnection(_) => "on_new_connection",
            Capability::Message(_) => "on_message",
            Capability::CredentialIssued(_) => "on_credential_issued",
            Capability::ProofPaused(_) => "on_proof_paused",
            Capability::ProofDone(_) => "on_proof_done",
        }
    }

    pub(crate) async fn invoke(
        &self,
        handler: &dyn HandlerBuilder,
        notification: &Notification,
    ) -> Result<(), HandlerError> {
        match self {
            Capability::NewConnection(status) => {
                handler.on_new_connection(notification, status).await
            }
            Capability::Message(status) => handler.on_message(notification, status).await,
            Capability::CredentialIssued(status) => {
                handler.on_credential_issued(notification, status).await
            }
            Capability::ProofPaused(status) => handler.on_proof_paused(notification, status).await,
            Capability::ProofDone(status) => handler.on_proof_done(notification, status).await,
        }
    }
}
