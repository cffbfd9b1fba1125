use std::future::IntoFuture;
use std::sync::Arc;
use std::time::Duration;

use rst_common::with_http_tokio::axum;
use rst_common::with_logging::log::info;
use rst_common::with_tokio::tokio;
use rst_common::with_tracing::tracing_subscriber::{
    self, layer::SubscriberExt, util::SubscriberInitExt,
};

use prople_agency_core::agency::dispatcher::Dispatcher;
use prople_agency_core::agency::handler::{Greeter, HandlerBuilder, Issuer, IssuerParams, Verifier};
use prople_agency_core::agency::issuing::types::IssuingUsecaseBuilder;
use prople_agency_core::agency::issuing::usecase::Usecase as IssuingUsecase;
use prople_agency_core::agency::resolver::StatusResolver;
use prople_agency_core::agency::session::types::SessionUsecaseBuilder;
use prople_agency_core::agency::session::usecase::Usecase as SessionUsecase;
use prople_agency_rpc::AgencyRPC;

use crate::errors::AgencydError;

use super::http::{build_router, AppState};

/// `App` wires the agency adapters, the notification dispatcher and the web boundary
pub struct App {
    config: Option<String>,
}

impl App {
    pub fn new(config: Option<String>) -> Self {
        Self { config }
    }

    fn init_tracing(&self) {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                    format!(
                        "{}=debug,prople_agency_core=debug,prople_agency_rpc=debug,tower_http=debug,axum=trace",
                        env!("CARGO_CRATE_NAME")
                    )
                    .into()
                }),
            )
            .with(tracing_subscriber::fmt::layer().without_time())
            .init();
    }

    fn build_agency(&self) -> Result<AgencyRPC, AgencydError> {
        let agency_rpc = match &self.config {
            Some(file) => AgencyRPC::new(file),
            None => AgencyRPC::from_env(),
        };

        agency_rpc.map_err(|err| AgencydError::ConfigError(err.to_string()))
    }

    /// `serve` only returns when the web server stops or the notification stream is lost
    pub async fn serve(&self) -> Result<(), AgencydError> {
        self.init_tracing();

        let agency_rpc = self.build_agency()?;
        let config = agency_rpc.config();

        let session = SessionUsecase::new(agency_rpc.build_authenticator());
        let token = session
            .login()
            .await
            .map_err(|err| AgencydError::SessionError(err.to_string()))?;

        let client = agency_rpc
            .connect(&token)
            .await
            .map_err(|err| AgencydError::GatewayError(err.to_string()))?;
        info!("[agencyd] connected to the agency");

        let issuing = IssuingUsecase::new(
            client.clone(),
            agency_rpc.build_cred_def_repo(),
            agency_rpc.build_issuing_params(),
        );
        let cred_def_id = issuing
            .prepare()
            .await
            .map_err(|err| AgencydError::IssuingError(err.to_string()))?;
        info!("[agencyd] using cred def: {}", cred_def_id.as_str());

        let issuer = Arc::new(Issuer::new(
            client.clone(),
            agency_rpc.build_email_sender(),
            IssuerParams {
                cred_def_id: cred_def_id.clone(),
                verify_url: format!("{}/email", config.app().get_public_url()),
            },
        ));

        let verifier = Arc::new(Verifier::new(
            client.clone(),
            cred_def_id,
            config.issuing().get_proof_attributes(),
        ));

        let handlers: Vec<Arc<dyn HandlerBuilder>> = vec![
            Arc::new(Greeter::new(client.clone())) as Arc<dyn HandlerBuilder>,
            issuer.clone() as Arc<dyn HandlerBuilder>,
            verifier.clone() as Arc<dyn HandlerBuilder>,
        ];

        let dispatcher = Dispatcher::new(
            client.clone(),
            StatusResolver::new(client.clone()),
            handlers,
            agency_rpc.build_reconnect_policy(),
        )
        .spawn();

        let state = AppState::new(client, config.agency().get_user(), issuer, verifier);
        let router = build_router(
            state,
            Duration::from_secs(config.app().get_timeout_secs()),
        );

        let (host, port) = config.app().get_app_config();
        let listener = tokio::net::TcpListener::bind(format!("{}:{}", host, port))
            .await
            .map_err(|err| AgencydError::ServerError(err.to_string()))?;
        info!("[agencyd] listening on {}:{}", host, port);

        tokio::select! {
            served = axum::serve(listener, router).into_future() => {
                served.map_err(|err| AgencydError::ServerError(err.to_string()))
            }
            dispatched = dispatcher => {
                match dispatched {
                    Ok(result) => result.map_err(|err| AgencydError::DispatchError(err.to_string())),
                    Err(err) => Err(AgencydError::DispatchError(err.to_string())),
                }
            }
        }
    }
}
