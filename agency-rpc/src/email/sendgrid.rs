use rst_common::standard::async_trait::async_trait;
use rst_common::standard::serde::{self, Serialize};
use rst_common::with_logging::log::info;

use prople_agency_core::agency::email::{Email, EmailError, EmailSenderBuilder};

#[derive(Serialize)]
#[serde(crate = "self::serde")]
struct Address {
    email: String,
}

#[derive(Serialize)]
#[serde(crate = "self::serde")]
struct Personalization {
    to: Vec<Address>,
}

#[derive(Serialize)]
#[serde(crate = "self::serde")]
struct Content {
    #[serde(rename = "type")]
    content_type: String,
    value: String,
}

#[derive(Serialize)]
#[serde(crate = "self::serde")]
struct MailPayload {
    personalizations: Vec<Personalization>,
    from: Address,
    subject: String,
    content: Vec<Content>,
}

impl MailPayload {
    fn new(sender: &str, email: Email) -> Self {
        Self {
            personalizations: vec![Personalization {
                to: vec![Address { email: email.to }],
            }],
            from: Address {
                email: sender.to_string(),
            },
            subject: email.subject,
            content: vec![Content {
                content_type: "text/plain".to_string(),
                value: email.content,
            }],
        }
    }
}

/// `SendgridSender` sends plain text emails through the SendGrid v3 mail API
#[derive(Clone)]
pub struct SendgridSender {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    sender: String,
}

impl SendgridSender {
    pub fn new(api_url: String, api_key: String, sender: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url,
            api_key,
            sender,
        }
    }
}

#[async_trait]
impl EmailSenderBuilder for SendgridSender {
    async fn send_email(&self, email: Email) -> Result<(), EmailError> {
        let to = email.to.to_owned();
        let response = self
            .client
            .post(format!("{}/v3/mail/send", self.api_url))
            .bearer_auth(&self.api_key)
            .json(&MailPayload::new(&self.sender, email))
            .send()
            .await
            .map_err(|err| EmailError::SendError(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(EmailError::Rejected(format!("{}: {}", status, body)));
        }

        info!("[email] sent to {}, status: {}", to, status);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};

    use rst_common::standard::serde_json::json;
    use rst_common::with_tokio::tokio;

    fn generate_email() -> Email {
        Email::new(
            "a@b.com".to_string(),
            "Email verification".to_string(),
            "Please verify your email".to_string(),
        )
    }

    #[tokio::test]
    async fn test_send_email_success() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/v3/mail/send")
            .match_header("authorization", "Bearer sendgrid-key")
            .match_body(Matcher::Json(json!({
                "personalizations": [{"to": [{"email": "a@b.com"}]}],
                "from": {"email": "agent@example.com"},
                "subject": "Email verification",
                "content": [{"type": "text/plain", "value": "Please verify your email"}]
            })))
            .with_status(202)
            .create_async()
            .await;

        let sender = SendgridSender::new(
            server.url(),
            "sendgrid-key".to_string(),
            "agent@example.com".to_string(),
        );

        let output = sender.send_email(generate_email()).await;
        assert!(!output.is_err());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_send_email_rejected() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/v3/mail/send")
            .with_status(401)
            .with_body(r#"{"errors":[{"message":"invalid key"}]}"#)
            .create_async()
            .await;

        let sender = SendgridSender::new(
            server.url(),
            "wrong-key".to_string(),
            "agent@example.com".to_string(),
        );

        let output = sender.send_email(generate_email()).await;
        assert!(output.is_err());
        assert!(matches!(output.unwrap_err(), EmailError::Rejected(_)));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_send_email_unreachable() {
        let sender = SendgridSender::new(
            "http://127.0.0.1:1".to_string(),
            "key".to_string(),
            "agent@example.com".to_string(),
        );

        let output = sender.send_email(generate_email()).await;
        assert!(matches!(output, Err(EmailError::SendError(_))))
    }
}
