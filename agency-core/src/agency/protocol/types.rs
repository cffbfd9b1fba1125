use derive_more::{AsRef, From, Into};
use the_newtype::Newtype;

use rst_common::standard::serde::{self, Deserialize, Serialize};
use rst_common::standard::uuid::Uuid;

/// Identifier of a pairwise connection between this agent and its counterpart
///
/// The agency uses the invitation id as the connection id, which means this value is known
/// before the counterpart accepts the invitation
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Newtype, From, Into, AsRef)]
#[serde(crate = "self::serde")]
pub struct ConnectionID(String);

impl ConnectionID {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ConnectionID {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Identifier of a single protocol run at the agency
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Newtype, From, Into, AsRef)]
#[serde(crate = "self::serde")]
pub struct ProtocolID(String);

impl ProtocolID {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ProtocolID {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Identifier used to subscribe to the agency notification stream
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Newtype, From, Into, AsRef)]
#[serde(crate = "self::serde")]
pub struct ClientID(String);

impl ClientID {
    /// Each subscription should use a fresh identifier
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Newtype, From, Into, AsRef)]
#[serde(crate = "self::serde")]
pub struct CredDefID(String);

impl CredDefID {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for CredDefID {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Newtype, From, Into, AsRef)]
#[serde(crate = "self::serde")]
pub struct SchemaID(String);

impl SchemaID {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// `ProtocolType` is the kind of `DIDComm` protocol a notification belongs to
///
/// Any type that is not supported by this agent is kept as [`ProtocolType::Unknown`] with its
/// raw value, so it can be logged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProtocolType {
    DIDExchange,
    BasicMessage,
    IssueCredential,
    PresentProof,
    Unknown(i32),
}

/// `NotificationKind` tells why the agency pushed a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    /// A protocol has changed its state
    StatusUpdate,

    /// A protocol is waiting for a decision from this agent before it can continue
    ProtocolPaused,

    Unknown(i32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProtocolState {
    Running,
    Ok,
    Err,
    WaitAction,
    Ack,
    Nack,
    Unknown(i32),
}

impl ProtocolState {
    /// Only a protocol that finished successfully is reported to the handlers
    pub fn is_ok(&self) -> bool {
        matches!(self, ProtocolState::Ok)
    }
}

/// `ResumeDecision` is the answer for a paused protocol
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResumeDecision {
    Accept,
    Reject,
}

impl From<ResumeDecision> for ProtocolState {
    fn from(value: ResumeDecision) -> Self {
        match value {
            ResumeDecision::Accept => ProtocolState::Ack,
            ResumeDecision::Reject => ProtocolState::Nack,
        }
    }
}

/// `Notification` is the envelope received from the agency stream
///
/// It only points to a protocol run, the detail of the protocol must be fetched
/// separately, see [`ProtocolStatus`]
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    protocol_id: ProtocolID,
    protocol_type: ProtocolType,
    connection_id: ConnectionID,
    kind: NotificationKind,
}

impl Notification {
    pub fn new(
        protocol_id: ProtocolID,
        protocol_type: ProtocolType,
        connection_id: ConnectionID,
        kind: NotificationKind,
    ) -> Self {
        Self {
            protocol_id,
            protocol_type,
            connection_id,
            kind,
        }
    }

    pub fn get_protocol_id(&self) -> &ProtocolID {
        &self.protocol_id
    }

    pub fn get_protocol_type(&self) -> ProtocolType {
        self.protocol_type
    }

    pub fn get_connection_id(&self) -> &ConnectionID {
        &self.connection_id
    }

    pub fn get_kind(&self) -> NotificationKind {
        self.kind
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DIDExchangeStatus {
    pub id: String,
    pub my_did: String,
    pub their_did: String,
    pub their_endpoint: String,
    pub their_label: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BasicMessageStatus {
    pub content: String,
    pub sent_by_me: bool,
    pub delivered: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialAttribute {
    pub name: String,
    pub value: String,
}

impl CredentialAttribute {
    pub fn new(name: &str, value: &str) -> Self {
        Self {
            name: name.to_string(),
            value: value.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct IssueCredentialStatus {
    pub cred_def_id: String,
    pub schema_id: String,
    pub attributes: Vec<CredentialAttribute>,
}

/// `ProofAttribute` is a single attribute requested from the counterpart
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProofAttribute {
    pub name: String,
    pub cred_def_id: CredDefID,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProofValue {
    pub name: String,
    pub value: String,
    pub cred_def_id: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PresentProofStatus {
    pub attributes: Vec<ProofValue>,
}

/// `StatusDetail` is the protocol specific part of a [`ProtocolStatus`]
#[derive(Debug, Clone, PartialEq)]
pub enum StatusDetail {
    DIDExchange(DIDExchangeStatus),
    BasicMessage(BasicMessageStatus),
    IssueCredential(IssueCredentialStatus),
    PresentProof(PresentProofStatus),
    Empty,
}

/// `ProtocolStatus` is a read-only snapshot of a protocol run fetched from the agency
///
/// This snapshot must never be cached, each notification needs its own fresh status
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolStatus {
    state: ProtocolState,
    detail: StatusDetail,
}

impl ProtocolStatus {
    pub fn new(state: ProtocolState, detail: StatusDetail) -> Self {
        Self { state, detail }
    }

    pub fn get_state(&self) -> ProtocolState {
        self.state
    }

    pub fn get_detail(&self) -> &StatusDetail {
        &self.detail
    }

    pub fn into_detail(self) -> StatusDetail {
        self.detail
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use table_test::table_test;

    #[test]
    fn test_protocol_state_is_ok() {
        let table = vec![
            (ProtocolState::Ok, true),
            (ProtocolState::Running, false),
            (ProtocolState::Err, false),
            (ProtocolState::WaitAction, false),
            (ProtocolState::Ack, false),
            (ProtocolState::Nack, false),
            (ProtocolState::Unknown(99), false),
        ];

        for (validator, input, expected) in table_test!(table) {
            validator
                .given(&format!("{:?}", input))
                .when("is_ok")
                .then(&format!("it should be {}", expected))
                .assert_eq(expected, input.is_ok());
        }
    }

    #[test]
    fn test_resume_decision_to_state() {
        assert_eq!(ProtocolState::from(ResumeDecision::Accept), ProtocolState::Ack);
        assert_eq!(ProtocolState::from(ResumeDecision::Reject), ProtocolState::Nack);
    }

    #[test]
    fn test_generate_client_id() {
        let first = ClientID::generate();
        let second = ClientID::generate();
        assert!(!first.as_str().is_empty());
        assert_ne!(first, second)
    }
}
