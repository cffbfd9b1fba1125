use std::path::PathBuf;
use std::time::Duration;

use rst_common::with_logging::log::info;
use rst_common::with_tokio::tokio;

use tonic::transport::{Certificate, Channel, ClientTlsConfig, Endpoint};

use prople_agency_core::agency::gateway::GatewayError;

/// `ChannelParams` describes where the agency API is served
#[derive(Debug, Clone)]
pub struct ChannelParams {
    host: String,
    port: u16,
    tls_path: Option<String>,
    timeout: Duration,
}

impl ChannelParams {
    pub fn new(host: String, port: u16, tls_path: Option<String>) -> Self {
        Self {
            host,
            port,
            tls_path,
            timeout: Duration::from_secs(10),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn endpoint_url(&self) -> String {
        let scheme = if self.tls_path.is_some() {
            "https"
        } else {
            "http"
        };

        format!("{}://{}:{}", scheme, self.host, self.port)
    }

    /// The agency CA certificate is expected at `<tls_path>/server/server.crt`
    pub fn ca_path(&self) -> Option<PathBuf> {
        self.tls_path.as_ref().map(|tls_path| {
            let mut path = PathBuf::from(tls_path);
            path.push("server");
            path.push("server.crt");
            path
        })
    }
}

/// `connect` opens the channel to the agency, using TLS when a `tls_path` is configured
pub async fn connect(params: &ChannelParams) -> Result<Channel, GatewayError> {
    let mut endpoint = Endpoint::from_shared(params.endpoint_url())
        .map_err(|err| GatewayError::TransportError(err.to_string()))?
        .connect_timeout(params.timeout);

    if let Some(ca_path) = params.ca_path() {
        let pem = tokio::fs::read(&ca_path).await.map_err(|err| {
            GatewayError::TransportError(format!("{}: {}", ca_path.display(), err))
        })?;

        let tls = ClientTlsConfig::new()
            .domain_name(params.host.to_owned())
            .ca_certificate(Certificate::from_pem(pem));

        endpoint = endpoint
            .tls_config(tls)
            .map_err(|err| GatewayError::TransportError(err.to_string()))?;
    }

    info!("[grpc] connecting to {}", params.endpoint_url());
    endpoint
        .connect()
        .await
        .map_err(|err| GatewayError::TransportError(err.to_string()))
}
