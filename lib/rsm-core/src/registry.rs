//! Registry of per-node outbound control channels

use crate::{ControlMessage, RoutingError};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{mpsc, RwLock};
use tracing::debug;

/// NodeChannelRegistry maps each connected E2 node to the sending half of its
/// control channel. The receiving half belongs to the node's control session.
pub struct NodeChannelRegistry {
    // Map of E2 node id to the sender of its channel
    channels: Arc<RwLock<HashMap<String, mpsc::Sender<ControlMessage>>>>,
    capacity: usize,
}

impl NodeChannelRegistry {
    /// Create a registry whose channels buffer up to `capacity` messages
    pub fn new(capacity: usize) -> Self {
        Self {
            channels: Arc::new(RwLock::new(HashMap::new())),
            capacity: capacity.max(1),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Create the channel for a node and return its receiving half
    pub async fn attach(
        &self,
        node_id: String,
    ) -> Result<mpsc::Receiver<ControlMessage>, RoutingError> {
        let mut channels = self.channels.write().await;
        if channels.contains_key(&node_id) {
            return Err(RoutingError::NodeAlreadyAttached(node_id));
        }

        let (sender, receiver) = mpsc::channel(self.capacity);
        channels.insert(node_id.clone(), sender);

        debug!("Attached control channel for e2 node: {}", node_id);
        Ok(receiver)
    }

    /// Drop a node's channel; returns whether it was attached
    pub async fn detach(&self, node_id: &str) -> bool {
        let mut channels = self.channels.write().await;
        let removed = channels.remove(node_id).is_some();
        debug!("Detached control channel for e2 node: {}", node_id);
        removed
    }

    /// Get a sender for a node. The lock is released before the caller sends.
    pub async fn sender(&self, node_id: &str) -> Result<mpsc::Sender<ControlMessage>, RoutingError> {
        let channels = self.channels.read().await;
        channels
            .get(node_id)
            .cloned()
            .ok_or_else(|| RoutingError::UnknownNode(node_id.to_string()))
    }

    /// List attached node ids, sorted
    pub async fn node_ids(&self) -> Vec<String> {
        let channels = self.channels.read().await;
        let mut ids: Vec<String> = channels.keys().cloned().collect();
        ids.sort();
        ids
    }

    pub async fn contains(&self, node_id: &str) -> bool {
        let channels = self.channels.read().await;
        channels.contains_key(node_id)
    }

    /// Get count of attached nodes
    pub async fn node_count(&self) -> usize {
        let channels = self.channels.read().await;
        channels.len()
    }
}

impl Default for NodeChannelRegistry {
    fn default() -> Self {
        Self::new(100)
    }
}
