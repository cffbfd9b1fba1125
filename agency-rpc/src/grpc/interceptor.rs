use tonic::metadata::{Ascii, MetadataValue};
use tonic::service::Interceptor;
use tonic::{Request, Status};

use prople_agency_core::agency::gateway::GatewayError;
use prople_agency_core::agency::session::types::Token;

const AUTHORIZATION: &str = "authorization";

/// `BearerInterceptor` attaches the agent token to every outgoing call
#[derive(Clone)]
pub struct BearerInterceptor {
    value: MetadataValue<Ascii>,
}

impl BearerInterceptor {
    pub fn new(token: &Token) -> Result<Self, GatewayError> {
        let value = format!("Bearer {}", token.as_str())
            .parse::<MetadataValue<Ascii>>()
            .map_err(|err| GatewayError::Unauthenticated(err.to_string()))?;

        Ok(Self { value })
    }
}

impl Interceptor for BearerInterceptor {
    fn call(&mut self, mut request: Request<()>) -> Result<Request<()>, Status> {
        request
            .metadata_mut()
            .insert(AUTHORIZATION, self.value.clone());

        Ok(request)
    }
}
