//! Conversions between the agency wire types and the domain types
//!
//! Values unknown to this agent are kept with their raw number, so they can be logged
use rst_common::standard::serde_json::{self, Value};

use prople_agency_core::agency::gateway::{GatewayError, Invitation};
use prople_agency_core::agency::protocol::{
    BasicMessageStatus, ConnectionID, CredentialAttribute, DIDExchangeStatus,
    IssueCredentialStatus, Notification, NotificationKind, PresentProofStatus, ProofAttribute,
    ProofValue, ProtocolID, ProtocolState, ProtocolStatus, ProtocolType, ResumeDecision,
    StatusDetail,
};

use super::proto;
use super::proto::{notification, protocol, protocol_state, protocol_status};

pub fn protocol_type_from(value: i32) -> ProtocolType {
    match protocol::Type::try_from(value) {
        Ok(protocol::Type::Didexchange) => ProtocolType::DIDExchange,
        Ok(protocol::Type::BasicMessage) => ProtocolType::BasicMessage,
        Ok(protocol::Type::IssueCredential) => ProtocolType::IssueCredential,
        Ok(protocol::Type::PresentProof) => ProtocolType::PresentProof,
        _ => ProtocolType::Unknown(value),
    }
}

pub fn protocol_type_into(value: ProtocolType) -> i32 {
    match value {
        ProtocolType::DIDExchange => protocol::Type::Didexchange as i32,
        ProtocolType::BasicMessage => protocol::Type::BasicMessage as i32,
        ProtocolType::IssueCredential => protocol::Type::IssueCredential as i32,
        ProtocolType::PresentProof => protocol::Type::PresentProof as i32,
        ProtocolType::Unknown(raw) => raw,
    }
}

pub fn kind_from(value: i32) -> NotificationKind {
    match notification::Type::try_from(value) {
        Ok(notification::Type::StatusUpdate) => NotificationKind::StatusUpdate,
        Ok(notification::Type::ProtocolPaused) => NotificationKind::ProtocolPaused,
        _ => NotificationKind::Unknown(value),
    }
}

pub fn state_from(value: i32) -> ProtocolState {
    match protocol_state::State::try_from(value) {
        Ok(protocol_state::State::Running) => ProtocolState::Running,
        Ok(protocol_state::State::Ok) => ProtocolState::Ok,
        Ok(protocol_state::State::Err) => ProtocolState::Err,
        Ok(protocol_state::State::WaitAction) => ProtocolState::WaitAction,
        Ok(protocol_state::State::Ack) => ProtocolState::Ack,
        Ok(protocol_state::State::Nack) => ProtocolState::Nack,
        Err(_) => ProtocolState::Unknown(value),
    }
}

pub fn decision_into(value: ResumeDecision) -> i32 {
    match value {
        ResumeDecision::Accept => protocol_state::State::Ack as i32,
        ResumeDecision::Reject => protocol_state::State::Nack as i32,
    }
}

pub fn to_notification(value: proto::Notification) -> Notification {
    Notification::new(
        ProtocolID::from(value.protocol_id),
        protocol_type_from(value.protocol_type),
        ConnectionID::from(value.connection_id),
        kind_from(value.type_id),
    )
}

fn to_issuing_attributes(value: Option<protocol::IssuingAttributes>) -> Vec<CredentialAttribute> {
    value
        .map(|attrs| {
            attrs
                .attributes
                .into_iter()
                .map(|attr| CredentialAttribute {
                    name: attr.name,
                    value: attr.value,
                })
                .collect()
        })
        .unwrap_or_default()
}

pub fn to_status(value: proto::ProtocolStatus) -> Result<ProtocolStatus, GatewayError> {
    let state = value
        .state
        .ok_or(GatewayError::InvalidResponse(
            "missing protocol state".to_string(),
        ))?;

    let detail = match value.status {
        Some(protocol_status::Status::DidExchange(status)) => {
            StatusDetail::DIDExchange(DIDExchangeStatus {
                id: status.id,
                my_did: status.my_did,
                their_did: status.their_did,
                their_endpoint: status.their_endpoint,
                their_label: status.their_label,
            })
        }
        Some(protocol_status::Status::BasicMessage(status)) => {
            StatusDetail::BasicMessage(BasicMessageStatus {
                content: status.content,
                sent_by_me: status.sent_by_me,
                delivered: status.delivered,
            })
        }
        Some(protocol_status::Status::IssueCredential(status)) => {
            StatusDetail::IssueCredential(IssueCredentialStatus {
                cred_def_id: status.cred_def_id,
                schema_id: status.schema_id,
                attributes: to_issuing_attributes(status.attributes),
            })
        }
        Some(protocol_status::Status::PresentProof(status)) => {
            StatusDetail::PresentProof(PresentProofStatus {
                attributes: status
                    .attributes
                    .into_iter()
                    .map(|attr| ProofValue {
                        name: attr.name,
                        value: attr.value,
                        cred_def_id: attr.cred_def_id,
                    })
                    .collect(),
            })
        }
        None => StatusDetail::Empty,
    };

    Ok(ProtocolStatus::new(state_from(state.state), detail))
}

/// `to_invitation` reads the invitation id from the `@id` field of the invitation json
pub fn to_invitation(value: proto::Invitation) -> Result<Invitation, GatewayError> {
    let json: Value = serde_json::from_str(&value.json)
        .map_err(|err| GatewayError::InvalidResponse(err.to_string()))?;

    let id = json
        .get("@id")
        .and_then(Value::as_str)
        .ok_or(GatewayError::InvalidResponse(
            "invitation without @id".to_string(),
        ))?;

    Ok(Invitation::new(
        ConnectionID::from(id),
        value.url,
        value.json,
    ))
}

pub fn to_issue_msg(
    cred_def_id: String,
    attributes: Vec<CredentialAttribute>,
) -> protocol::StartMsg {
    protocol::StartMsg::IssueCredential(protocol::IssueCredentialMsg {
        cred_def_id,
        attributes: Some(protocol::IssuingAttributes {
            attributes: attributes
                .into_iter()
                .map(|attr| protocol::issuing_attributes::Attribute {
                    name: attr.name,
                    value: attr.value,
                })
                .collect(),
        }),
    })
}

pub fn to_proof_msg(attributes: Vec<ProofAttribute>) -> protocol::StartMsg {
    protocol::StartMsg::PresentProof(protocol::PresentProofMsg {
        attributes: Some(protocol::Proof {
            attributes: attributes
                .into_iter()
                .map(|attr| protocol::proof::Attribute {
                    name: attr.name,
                    cred_def_id: attr.cred_def_id.as_str().to_string(),
                })
                .collect(),
        }),
    })
}
