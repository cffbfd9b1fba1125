use std::collections::HashMap;
use std::sync::Arc;

use rst_common::with_tokio::tokio::sync::RwLock;

use crate::agency::protocol::ConnectionID;

/// `ConnectionRegistry` maps a [`ConnectionID`] to the handler's own connection state
///
/// Cloning the registry only clones the handle, all clones point to the same map
#[derive(Clone)]
pub struct ConnectionRegistry<TState>
where
    TState: Clone + Send + Sync,
{
    connections: Arc<RwLock<HashMap<ConnectionID, TState>>>,
}

impl<TState> ConnectionRegistry<TState>
where
    TState: Clone + Send + Sync,
{
    pub fn new() -> Self {
        Self {
            connections: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// `track` registers interest in a connection, an existing state will be replaced
    pub async fn track(&self, id: ConnectionID, state: TState) {
        let mut connections = self.connections.write().await;
        connections.insert(id, state);
    }

    pub async fn get(&self, id: &ConnectionID) -> Option<TState> {
        let connections = self.connections.read().await;
        connections.get(id).cloned()
    }

    pub async fn contains(&self, id: &ConnectionID) -> bool {
        let connections = self.connections.read().await;
        connections.contains_key(id)
    }

    /// `update` runs the given transition while holding the write lock
    ///
    /// It returns `None` when the connection is not tracked, the transition will not be called
    pub async fn update<F, R>(&self, id: &ConnectionID, transition: F) -> Option<R>
    where
        F: FnOnce(&mut TState) -> R,
    {
        let mut connections = self.connections.write().await;
        connections.get_mut(id).map(transition)
    }

    pub async fn remove(&self, id: &ConnectionID) -> Option<TState> {
        let mut connections = self.connections.write().await;
        connections.remove(id)
    }

    pub async fn len(&self) -> usize {
        let connections = self.connections.read().await;
        connections.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl<TState> Default for ConnectionRegistry<TState>
where
    TState: Clone + Send + Sync,
{
    fn default() -> Self {
        Self::new()
    }
}
