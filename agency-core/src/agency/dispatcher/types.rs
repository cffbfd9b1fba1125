use std::time::Duration;

use rst_common::standard::async_trait::async_trait;
use rst_common::with_errors::thiserror::{self, Error};

use crate::agency::gateway::{GatewayError, NotificationReceiver};
use crate::agency::protocol::ClientID;

/// `DispatchError` is returned by the dispatching loop, which means the agent can no longer
/// receive any notification
#[derive(Debug, PartialEq, Error, Clone)]
pub enum DispatchError {
    #[error("notification stream closed: {0}")]
    StreamClosed(String),

    #[error("unable to subscribe: {0}")]
    SubscribeError(String),
}

/// `ListenerBuilder` opens the notification subscription at the agency
#[async_trait]
pub trait ListenerBuilder: Send + Sync {
    async fn subscribe(&self, client_id: ClientID) -> Result<NotificationReceiver, GatewayError>;
}

/// `ReconnectPolicy` decides what happens after the notification stream is lost
///
/// With `max_attempts` set to zero, the first stream failure is returned to the caller.
/// Otherwise the dispatcher subscribes again, with an exponential backoff capped at
/// `max_backoff`. The attempt counter is reset once a subscription delivered any notification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReconnectPolicy {
    pub max_attempts: u32,
    pub initial_backoff: Duration,
    pub max_backoff: Duration,
}

impl ReconnectPolicy {
    pub fn new(max_attempts: u32, initial_backoff: Duration, max_backoff: Duration) -> Self {
        Self {
            max_attempts,
            initial_backoff,
            max_backoff,
        }
    }

    pub fn next_backoff(&self, current: Duration) -> Duration {
        current.saturating_mul(2).min(self.max_backoff)
    }
}

impl Default for ReconnectPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 0,
            initial_backoff: Duration::from_secs(1),
            max_backoff: Duration::from_secs(30),
        }
    }
}
