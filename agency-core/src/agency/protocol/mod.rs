//! `protocol` keeps the vocabulary shared by all other sub-domains: identifiers,
//! notification envelopes and protocol status snapshots
pub mod types;

pub use types::{
    BasicMessageStatus, ClientID, ConnectionID, CredDefID, CredentialAttribute,
    DIDExchangeStatus, IssueCredentialStatus, Notification, NotificationKind,
    PresentProofStatus, ProofAttribute, ProofValue, ProtocolID, ProtocolState, ProtocolStatus,
    ProtocolType, ResumeDecision, SchemaID, StatusDetail,
};
