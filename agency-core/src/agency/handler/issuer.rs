use rst_common::standard::async_trait::async_trait;
use rst_common::with_logging::log::{info, warn};

use crate::agency::email::{Email, EmailSenderBuilder};
use crate::agency::gateway::ProtocolRPCBuilder;
use crate::agency::protocol::{
    BasicMessageStatus, ConnectionID, CredDefID, CredentialAttribute, DIDExchangeStatus,
    IssueCredentialStatus, Notification,
};
use crate::agency::registry::ConnectionRegistry;

use super::types::{HandlerBuilder, HandlerError};

pub const ASK_FOR_EMAIL: &str = "Please enter your email to get started.";
pub const EMAIL_CONFIRMATION: &str = "Email is on it's way! Please check your mailbox 📫.";
pub const EMAIL_SUBJECT: &str = "Email verification";
pub const EMAIL_ATTRIBUTE: &str = "email";

/// `is_valid_email` only checks the message is a single word containing `@`
///
/// This is intentionally loose, the real check is done by the email verification link
pub fn is_valid_email(msg: &str) -> bool {
    msg.split(' ').count() == 1 && msg.contains('@')
}

/// `IssuerConnection` is the issuer state of a single connection
///
/// ```text
/// Invited ─► AwaitingEmail ─► EmailReceived ─► CredentialOffered ─► Done (removed)
///                 ▲     │
///                 └─────┘ invalid email
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IssuerConnection {
    email: Option<String>,
    verified: bool,
}

impl IssuerConnection {
    pub fn get_email(&self) -> Option<&String> {
        self.email.as_ref()
    }

    pub fn is_verified(&self) -> bool {
        self.verified
    }
}

/// `IssuerParams` are the fixed values used by the [`Issuer`]
#[derive(Debug, Clone)]
pub struct IssuerParams {
    pub cred_def_id: CredDefID,

    /// Base url of the verification endpoint, the connection id will be appended
    /// as the `value` query parameter
    pub verify_url: String,
}

/// `Issuer` issues an email credential after the counterpart proves it owns the address
///
/// Only the connections registered through [`Issuer::add_invitation`] are handled
pub struct Issuer<TRPCClient, TEmailSender>
where
    TRPCClient: ProtocolRPCBuilder,
    TEmailSender: EmailSenderBuilder,
{
    rpc: TRPCClient,
    email_sender: TEmailSender,
    params: IssuerParams,
    connections: ConnectionRegistry<IssuerConnection>,
}

impl<TRPCClient, TEmailSender> Issuer<TRPCClient, TEmailSender>
where
    TRPCClient: ProtocolRPCBuilder,
    TEmailSender: EmailSenderBuilder,
{
    pub fn new(rpc: TRPCClient, email_sender: TEmailSender, params: IssuerParams) -> Self {
        Self {
            rpc,
            email_sender,
            params,
            connections: ConnectionRegistry::new(),
        }
    }

    /// `add_invitation` registers interest in a connection before the counterpart connects
    pub async fn add_invitation(&self, id: ConnectionID) {
        self.connections
            .track(id, IssuerConnection::default())
            .await
    }

    pub async fn get_connection(&self, id: &ConnectionID) -> Option<IssuerConnection> {
        self.connections.get(id).await
    }

    /// `set_email_verified` is called once the counterpart opened the emailed verification link
    ///
    /// It returns `true` only when this call offered the credential. Untracked connections,
    /// connections without an email and already verified connections are left untouched.
    pub async fn set_email_verified(&self, id: &ConnectionID) -> Result<bool, HandlerError> {
        let email = self
            .connections
            .update(id, |conn| match (&conn.email, conn.verified) {
                (Some(email), false) => {
                    conn.verified = true;
                    Some(email.to_owned())
                }
                _ => None,
            })
            .await
            .flatten();

        let email = match email {
            Some(email) => email,
            None => return Ok(false),
        };

        let attributes = vec![CredentialAttribute::new(EMAIL_ATTRIBUTE, &email)];
        info!(
            "[issuer] offer credential, conn id: {}, cred def id: {}, attrs: {:?}",
            id.as_str(),
            self.params.cred_def_id.as_str(),
            attributes
        );

        let protocol_id = self
            .rpc
            .offer_credential(id.clone(), self.params.cred_def_id.clone(), attributes)
            .await?;

        info!("[issuer] credential offered: {}", protocol_id.as_str());
        Ok(true)
    }

    fn build_verification_content(&self, id: &ConnectionID) -> String {
        format!(
            "Please verify your email by clicking the following link:\n {}?value={}",
            self.params.verify_url,
            id.as_str()
        )
    }

    async fn ask_for_email(&self, id: &ConnectionID) -> Result<(), HandlerError> {
        let _ = self
            .rpc
            .send_message(id.clone(), ASK_FOR_EMAIL.to_string())
            .await?;

        Ok(())
    }
}

#[async_trait]
impl<TRPCClient, TEmailSender> HandlerBuilder for Issuer<TRPCClient, TEmailSender>
where
    TRPCClient: ProtocolRPCBuilder,
    TEmailSender: EmailSenderBuilder,
{
    fn name(&self) -> &str {
        "issuer"
    }

    async fn on_new_connection(
        &self,
        notification: &Notification,
        _status: &DIDExchangeStatus,
    ) -> Result<(), HandlerError> {
        let id = notification.get_connection_id();
        match self.connections.get(id).await {
            Some(conn) if conn.email.is_none() => self.ask_for_email(id).await,
            _ => Ok(()),
        }
    }

    async fn on_message(
        &self,
        notification: &Notification,
        status: &BasicMessageStatus,
    ) -> Result<(), HandlerError> {
        if status.sent_by_me {
            return Ok(());
        }

        let id = notification.get_connection_id();
        let msg = status.content.to_owned();
        let valid = is_valid_email(&msg);

        // `None` means untracked or the email has been already received
        let stored = self
            .connections
            .update(id, |conn| {
                if conn.email.is_some() {
                    return None;
                }

                if valid {
                    conn.email = Some(msg.clone());
                }

                Some(valid)
            })
            .await
            .flatten();

        let stored = match stored {
            Some(stored) => stored,
            None => return Ok(()),
        };

        info!(
            "[issuer] basic message {} with protocol id {} completed with {}",
            msg,
            notification.get_protocol_id().as_str(),
            id.as_str()
        );

        if !stored {
            return self.ask_for_email(id).await;
        }

        let email = Email::new(
            msg.clone(),
            EMAIL_SUBJECT.to_string(),
            self.build_verification_content(id),
        );

        info!("[issuer] sending verification email to {}", msg);
        if let Err(err) = self.email_sender.send_email(email).await {
            warn!("[issuer] unable to send verification email: {}", err);
        }

        let _ = self
            .rpc
            .send_message(id.clone(), EMAIL_CONFIRMATION.to_string())
            .await?;

        Ok(())
    }

    async fn on_credential_issued(
        &self,
        notification: &Notification,
        _status: &IssueCredentialStatus,
    ) -> Result<(), HandlerError> {
        let id = notification.get_connection_id();
        if self.connections.remove(id).await.is_some() {
            info!(
                "[issuer] credential issued to: {}, with id: {}",
                id.as_str(),
                notification.get_protocol_id().as_str()
            );
        }

        Ok(())
    }
}
