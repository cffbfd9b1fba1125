use std::sync::Arc;
use std::time::Duration;

use rst_common::standard::serde::{self, Deserialize};
use rst_common::with_http_tokio::axum::extract::{Query, State};
use rst_common::with_http_tokio::axum::http::StatusCode;
use rst_common::with_http_tokio::axum::response::{Html, IntoResponse, Response};
use rst_common::with_http_tokio::axum::routing::get;
use rst_common::with_http_tokio::axum::Router;
use rst_common::with_http_tokio::tower_http::timeout::TimeoutLayer;
use rst_common::with_http_tokio::tower_http::trace::TraceLayer;
use rst_common::with_logging::log::{error, info};

use prople_agency_core::agency::email::EmailSenderBuilder;
use prople_agency_core::agency::gateway::{AgentRPCBuilder, Invitation, ProtocolRPCBuilder};
use prople_agency_core::agency::handler::{Issuer, Verifier};
use prople_agency_core::agency::protocol::ConnectionID;

use super::page;

pub const HOME_TEXT: &str = "Rust example";

/// `HttpError` is rendered as a plain text 500 response
#[derive(Debug)]
pub struct HttpError(String);

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        error!("[http] {}", self.0);
        (StatusCode::INTERNAL_SERVER_ERROR, self.0).into_response()
    }
}

impl<E: std::error::Error> From<E> for HttpError {
    fn from(value: E) -> Self {
        HttpError(value.to_string())
    }
}

#[derive(Deserialize)]
#[serde(crate = "self::serde")]
pub struct EmailQuery {
    value: Option<String>,
}

/// `AppState` is shared by all web requests
pub struct AppState<TRPCClient, TEmailSender>
where
    TRPCClient: AgentRPCBuilder + ProtocolRPCBuilder,
    TEmailSender: EmailSenderBuilder,
{
    rpc: Arc<TRPCClient>,
    label: String,
    issuer: Arc<Issuer<TRPCClient, TEmailSender>>,
    verifier: Arc<Verifier<TRPCClient>>,
}

impl<TRPCClient, TEmailSender> Clone for AppState<TRPCClient, TEmailSender>
where
    TRPCClient: AgentRPCBuilder + ProtocolRPCBuilder,
    TEmailSender: EmailSenderBuilder,
{
    fn clone(&self) -> Self {
        Self {
            rpc: self.rpc.clone(),
            label: self.label.clone(),
            issuer: self.issuer.clone(),
            verifier: self.verifier.clone(),
        }
    }
}

impl<TRPCClient, TEmailSender> AppState<TRPCClient, TEmailSender>
where
    TRPCClient: AgentRPCBuilder + ProtocolRPCBuilder,
    TEmailSender: EmailSenderBuilder,
{
    /// The `label` is the agent name shown to the counterpart of every invitation
    pub fn new(
        rpc: TRPCClient,
        label: String,
        issuer: Arc<Issuer<TRPCClient, TEmailSender>>,
        verifier: Arc<Verifier<TRPCClient>>,
    ) -> Self {
        Self {
            rpc: Arc::new(rpc),
            label,
            issuer,
            verifier,
        }
    }

    async fn create_invitation(&self) -> Result<Invitation, HttpError> {
        let invitation = self.rpc.create_invitation(self.label.clone()).await?;
        info!("[http] created invitation: {}", invitation.get_url());
        Ok(invitation)
    }
}

pub fn build_router<TRPCClient, TEmailSender>(
    state: AppState<TRPCClient, TEmailSender>,
    timeout: Duration,
) -> Router
where
    TRPCClient: AgentRPCBuilder + ProtocolRPCBuilder + 'static,
    TEmailSender: EmailSenderBuilder + 'static,
{
    Router::new()
        .route("/", get(home))
        .route("/greet", get(greet::<TRPCClient, TEmailSender>))
        .route("/issue", get(issue::<TRPCClient, TEmailSender>))
        .route("/verify", get(verify::<TRPCClient, TEmailSender>))
        .route("/email", get(email::<TRPCClient, TEmailSender>))
        .layer((TraceLayer::new_for_http(), TimeoutLayer::new(timeout)))
        .with_state(state)
}

async fn home() -> &'static str {
    HOME_TEXT
}

async fn greet<TRPCClient, TEmailSender>(
    State(state): State<AppState<TRPCClient, TEmailSender>>,
) -> Result<Html<String>, HttpError>
where
    TRPCClient: AgentRPCBuilder + ProtocolRPCBuilder + 'static,
    TEmailSender: EmailSenderBuilder + 'static,
{
    let invitation = state.create_invitation().await?;
    Ok(Html(page::invitation_page("Greet", invitation.get_url())))
}

async fn issue<TRPCClient, TEmailSender>(
    State(state): State<AppState<TRPCClient, TEmailSender>>,
) -> Result<Html<String>, HttpError>
where
    TRPCClient: AgentRPCBuilder + ProtocolRPCBuilder + 'static,
    TEmailSender: EmailSenderBuilder + 'static,
{
    let invitation = state.create_invitation().await?;
    state.issuer.add_invitation(invitation.get_id().clone()).await;
    Ok(Html(page::invitation_page("Issue", invitation.get_url())))
}

async fn verify<TRPCClient, TEmailSender>(
    State(state): State<AppState<TRPCClient, TEmailSender>>,
) -> Result<Html<String>, HttpError>
where
    TRPCClient: AgentRPCBuilder + ProtocolRPCBuilder + 'static,
    TEmailSender: EmailSenderBuilder + 'static,
{
    let invitation = state.create_invitation().await?;
    state
        .verifier
        .add_invitation(invitation.get_id().clone())
        .await;
    Ok(Html(page::invitation_page("Verify", invitation.get_url())))
}

async fn email<TRPCClient, TEmailSender>(
    State(state): State<AppState<TRPCClient, TEmailSender>>,
    Query(query): Query<EmailQuery>,
) -> Result<Html<String>, HttpError>
where
    TRPCClient: AgentRPCBuilder + ProtocolRPCBuilder + 'static,
    TEmailSender: EmailSenderBuilder + 'static,
{
    let connection_id = match query.value.filter(|value| !value.is_empty()) {
        Some(value) => ConnectionID::from(value),
        None => return Ok(Html(page::error_page())),
    };

    let offered = state.issuer.set_email_verified(&connection_id).await?;
    if !offered {
        info!(
            "[http] nothing to verify for connection: {}",
            connection_id.as_str()
        );
        return Ok(Html(page::error_page()));
    }

    Ok(Html(page::offer_sent_page()))
}
