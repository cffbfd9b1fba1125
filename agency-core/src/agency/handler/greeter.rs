use rst_common::standard::async_trait::async_trait;
use rst_common::with_logging::log::info;

use crate::agency::gateway::ProtocolRPCBuilder;
use crate::agency::protocol::{BasicMessageStatus, DIDExchangeStatus, Notification};

use super::types::{HandlerBuilder, HandlerError};

pub const GREETING: &str = "Hi there 👋!";

/// `Greeter` greets each new connection with a basic message
///
/// It has no state at all, so it reacts to every connection, including the
/// connections created for issuing or verifying
#[derive(Clone)]
pub struct Greeter<TRPCClient>
where
    TRPCClient: ProtocolRPCBuilder,
{
    rpc: TRPCClient,
}

impl<TRPCClient> Greeter<TRPCClient>
where
    TRPCClient: ProtocolRPCBuilder,
{
    pub fn new(rpc: TRPCClient) -> Self {
        Self { rpc }
    }
}

#[async_trait]
impl<TRPCClient> HandlerBuilder for Greeter<TRPCClient>
where
    TRPCClient: ProtocolRPCBuilder,
{
    fn name(&self) -> &str {
        "greeter"
    }

    async fn on_new_connection(
        &self,
        notification: &Notification,
        status: &DIDExchangeStatus,
    ) -> Result<(), HandlerError> {
        info!(
            "[greeter] new connection {} with id {}",
            status.their_label,
            notification.get_connection_id().as_str()
        );

        let _ = self
            .rpc
            .send_message(
                notification.get_connection_id().clone(),
                GREETING.to_string(),
            )
            .await?;

        Ok(())
    }

    async fn on_message(
        &self,
        notification: &Notification,
        status: &BasicMessageStatus,
    ) -> Result<(), HandlerError> {
        if !status.sent_by_me {
            info!(
                "[greeter] received basic message {} from {}",
                status.content,
                notification.get_connection_id().as_str()
            );
        }

        Ok(())
    }
}
