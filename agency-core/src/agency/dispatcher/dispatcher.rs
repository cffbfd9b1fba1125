use std::sync::Arc;

use rst_common::with_logging::log::{debug, error, info, warn};
use rst_common::with_tokio::tokio;
use rst_common::with_tokio::tokio::task::JoinHandle;

use crate::agency::gateway::NotificationReceiver;
use crate::agency::handler::HandlerBuilder;
use crate::agency::protocol::{ClientID, Notification, NotificationKind, ProtocolType};
use crate::agency::resolver::StatusResolverBuilder;

use super::capability::Capability;
use super::types::{DispatchError, ListenerBuilder, ReconnectPolicy};

/// `Dispatcher` delivers the agency notifications to the registered handlers
pub struct Dispatcher<TListener, TResolver>
where
    TListener: ListenerBuilder,
    TResolver: StatusResolverBuilder,
{
    listener: TListener,
    resolver: TResolver,
    handlers: Vec<Arc<dyn HandlerBuilder>>,
    policy: ReconnectPolicy,
}

impl<TListener, TResolver> Dispatcher<TListener, TResolver>
where
    TListener: ListenerBuilder + 'static,
    TResolver: StatusResolverBuilder + 'static,
{
    /// The handlers order is the delivery order of every notification
    pub fn new(
        listener: TListener,
        resolver: TResolver,
        handlers: Vec<Arc<dyn HandlerBuilder>>,
        policy: ReconnectPolicy,
    ) -> Self {
        Self {
            listener,
            resolver,
            handlers,
            policy,
        }
    }

    /// `spawn` runs [`Dispatcher::listen`] in its own task
    pub fn spawn(self) -> JoinHandle<Result<(), DispatchError>> {
        tokio::spawn(async move { self.listen().await })
    }

    /// `listen` consumes the notification stream until it is lost and the reconnect
    /// policy does not allow another subscription
    ///
    /// This function never returns `Ok`, it only stops with a [`DispatchError`]
    pub async fn listen(&self) -> Result<(), DispatchError> {
        let mut attempts: u32 = 0;
        let mut backoff = self.policy.initial_backoff;

        loop {
            let client_id = ClientID::generate();
            info!("[dispatcher] subscribe with client id: {}", client_id.as_str());

            let (received, err) = match self.listener.subscribe(client_id).await {
                Ok(receiver) => self.consume(receiver).await,
                Err(err) => (0, DispatchError::SubscribeError(err.to_string())),
            };

            if received > 0 {
                attempts = 0;
                backoff = self.policy.initial_backoff;
            }

            if attempts >= self.policy.max_attempts {
                error!("[dispatcher] stop listening: {}", err);
                return Err(err);
            }

            attempts += 1;
            warn!(
                "[dispatcher] {}, reconnecting in {:?} (attempt {}/{})",
                err, backoff, attempts, self.policy.max_attempts
            );

            tokio::time::sleep(backoff).await;
            backoff = self.policy.next_backoff(backoff);
        }
    }

    async fn consume(&self, mut receiver: NotificationReceiver) -> (usize, DispatchError) {
        let mut received: usize = 0;

        loop {
            match receiver.recv().await {
                Some(Ok(notification)) => {
                    received += 1;
                    self.dispatch(notification).await
                }
                Some(Err(err)) => return (received, DispatchError::StreamClosed(err.to_string())),
                None => {
                    return (
                        received,
                        DispatchError::StreamClosed("stream ended".to_string()),
                    )
                }
            }
        }
    }

    /// `dispatch` delivers a single notification
    ///
    /// Any failure is logged and the notification is abandoned, there is nothing returned
    /// to the caller
    pub async fn dispatch(&self, notification: Notification) {
        debug!(
            "[dispatcher] notification: {:?}, protocol id: {}, conn id: {}",
            notification.get_kind(),
            notification.get_protocol_id().as_str(),
            notification.get_connection_id().as_str()
        );

        if let ProtocolType::Unknown(value) = notification.get_protocol_type() {
            warn!("[dispatcher] unsupported protocol type: {}", value);
            return;
        }

        if let NotificationKind::Unknown(value) = notification.get_kind() {
            warn!("[dispatcher] unsupported notification kind: {}", value);
            return;
        }

        let status = match self.resolver.resolve(&notification).await {
            Ok(status) => status,
            Err(err) => {
                error!(
                    "[dispatcher] unable to resolve status of {}: {}",
                    notification.get_protocol_id().as_str(),
                    err
                );
                return;
            }
        };

        let capability = match notification.get_kind() {
            NotificationKind::StatusUpdate => {
                let state = status.get_state();
                if !state.is_ok() {
                    info!(
                        "[dispatcher] protocol {} of type {:?} finished with state {:?}",
                        notification.get_protocol_id().as_str(),
                        notification.get_protocol_type(),
                        state
                    );
                    return;
                }

                match Capability::from_finished(
                    notification.get_protocol_type(),
                    status.into_detail(),
                ) {
                    Some(capability) => capability,
                    None => {
                        warn!(
                            "[dispatcher] status detail does not match protocol type {:?}",
                            notification.get_protocol_type()
                        );
                        return;
                    }
                }
            }
            NotificationKind::ProtocolPaused => Capability::from_paused(status.into_detail()),
            NotificationKind::Unknown(_) => return,
        };

        for handler in self.handlers.iter() {
            invoke(handler.clone(), notification.clone(), capability.clone()).await
        }
    }
}

async fn invoke(handler: Arc<dyn HandlerBuilder>, notification: Notification, capability: Capability) {
    let name = handler.name().to_string();
    let capability_name = capability.name();

    let task = tokio::spawn(async move { capability.invoke(handler.as_ref(), &notification).await });

    match task.await {
        Ok(Ok(_)) => debug!("[dispatcher] {}:{} done", name, capability_name),
        Ok(Err(err)) => error!("[dispatcher] {}:{} failed: {}", name, capability_name, err),
        Err(err) => error!("[dispatcher] {}:{} panicked: {}", name, capability_name, err),
    }
}
