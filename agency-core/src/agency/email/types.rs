use rst_common::standard::async_trait::async_trait;
use rst_common::with_errors::thiserror::{self, Error};

#[derive(Debug, PartialEq, Error, Clone)]
pub enum EmailError {
    #[error("unable to send email: {0}")]
    SendError(String),

    #[error("email rejected: {0}")]
    Rejected(String),
}

/// `Email` is a single plain text message for one recipient
#[derive(Debug, Clone, PartialEq)]
pub struct Email {
    pub to: String,
    pub subject: String,
    pub content: String,
}

impl Email {
    pub fn new(to: String, subject: String, content: String) -> Self {
        Self {
            to,
            subject,
            content,
        }
    }
}

/// `EmailSenderBuilder` is a trait behavior used to deliver an [`Email`] through
/// some transactional email provider
#[async_trait]
pub trait EmailSenderBuilder: Clone + Send + Sync {
    async fn send_email(&self, email: Email) -> Result<(), EmailError>;
}
