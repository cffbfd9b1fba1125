use rst_common::standard::async_trait::async_trait;

use crate::agency::gateway::GatewayError;
use crate::agency::protocol::{Notification, ProtocolStatus};

/// `StatusResolverBuilder` turns a [`Notification`] into its current [`ProtocolStatus`]
///
/// Implementations must always ask the agency, a status is never cached
#[async_trait]
pub trait StatusResolverBuilder: Send + Sync {
    async fn resolve(&self, notification: &Notification) -> Result<ProtocolStatus, GatewayError>;
}
