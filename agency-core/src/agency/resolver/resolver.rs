use rst_common::standard::async_trait::async_trait;

use crate::agency::gateway::{GatewayError, ProtocolRPCBuilder};
use crate::agency::protocol::{Notification, ProtocolStatus};

use super::types::StatusResolverBuilder;

/// `StatusResolver` resolves a notification using a single `status` call of the
/// [`ProtocolRPCBuilder`], keyed by the protocol id and the protocol type
#[derive(Clone)]
pub struct StatusResolver<TRPCClient>
where
    TRPCClient: ProtocolRPCBuilder,
{
    rpc: TRPCClient,
}

impl<TRPCClient> StatusResolver<TRPCClient>
where
    TRPCClient: ProtocolRPCBuilder,
{
    pub fn new(rpc: TRPCClient) -> Self {
        Self { rpc }
    }
}

#[async_trait]
impl<TRPCClient> StatusResolverBuilder for StatusResolver<TRPCClient>
where
    TRPCClient: ProtocolRPCBuilder,
{
    async fn resolve(&self, notification: &Notification) -> Result<ProtocolStatus, GatewayError> {
        self.rpc
            .status(
                notification.get_protocol_id().clone(),
                notification.get_protocol_type(),
            )
            .await
    }
}
