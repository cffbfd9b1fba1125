//! `prople-agency-rpc` provides the adapters of the agency agent
//!
//! - `grpc`: the agency gateway over gRPC
//! - `auth`: the agent authenticators
//! - `email`: the verification email sender
//! - `repo`: the credential definition storage
//! - `config`: the TOML and environment configuration
//!
//! [`AgencyRPC`] builds all of them from a single [`config::Config`]
use std::path::PathBuf;
use std::time::Duration;

use prople_agency_core::agency::dispatcher::ReconnectPolicy;
use prople_agency_core::agency::gateway::GatewayError;
use prople_agency_core::agency::issuing::types::IssuingParams;
use prople_agency_core::agency::session::types::Token;

pub mod auth;
pub mod common;
pub mod config;
pub mod email;
pub mod grpc;
pub mod repo;

use auth::{AuthnParams, Authenticator, CliAuthenticator, StaticAuthenticator};
use common::types::{CommonError, ToValidate};
use config::{Config, Parser as ConfigManager};
use email::SendgridSender;
use grpc::{AgencyClient, BearerInterceptor, ChannelParams};
use repo::CredDefFileRepo;

pub struct AgencyRPC {
    config: Config,
}

impl AgencyRPC {
    /// `new` parses the given config file, then applies the environment overrides
    pub fn new(config_file: &str) -> Result<Self, CommonError> {
        let config = ConfigManager::new(config_file.to_string())
            .parse()
            .map_err(|err| CommonError::ConfigError(err.to_string()))?;

        Self::from_config(config)
    }

    /// `from_env` builds the config only from the environment
    pub fn from_env() -> Result<Self, CommonError> {
        Self::from_config(Config::new())
    }

    pub fn from_config(mut config: Config) -> Result<Self, CommonError> {
        config.merge_env()?;
        config.validate()?;

        Ok(Self { config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn build_authenticator(&self) -> Authenticator {
        let agency = self.config.agency();
        if let Some(token) = agency.get_token() {
            return Authenticator::Static(StaticAuthenticator::new(token));
        }

        let (url, key, origin) = agency.get_authn();
        Authenticator::Cli(CliAuthenticator::new(
            agency.get_authn_cmd(),
            AuthnParams {
                user: agency.get_user(),
                url,
                key,
                origin,
            },
        ))
    }

    /// `connect` opens the authenticated channel to the agency
    pub async fn connect(&self, token: &Token) -> Result<AgencyClient, GatewayError> {
        let (host, port) = self.config.agency().get_server();
        let params = ChannelParams::new(host, port, self.config.agency().get_tls_path())
            .with_timeout(Duration::from_secs(self.config.app().get_timeout_secs()));

        let channel = grpc::channel::connect(&params).await?;
        let interceptor = BearerInterceptor::new(token)?;

        Ok(AgencyClient::new(
            channel,
            interceptor,
            self.config.dispatcher().get_buffer(),
        ))
    }

    pub fn build_email_sender(&self) -> SendgridSender {
        let (api_url, api_key, sender) = self.config.email().get_email_config();
        SendgridSender::new(api_url, api_key, sender)
    }

    pub fn build_cred_def_repo(&self) -> CredDefFileRepo {
        CredDefFileRepo::new(PathBuf::from(self.config.issuing().get_cred_def_file()))
    }

    pub fn build_issuing_params(&self) -> IssuingParams {
        self.config
            .issuing()
            .build_params(self.config.agency().get_user())
    }

    pub fn build_reconnect_policy(&self) -> ReconnectPolicy {
        self.config.dispatcher().build_policy()
    }
}
