//! Delivery of encoded control messages to per-node channels

use crate::registry::NodeChannelRegistry;
use crate::{ControlMessage, RoutingError};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{timeout_at, Instant};
use tracing::{debug, warn};

/// Routes control messages to the channel of their target E2 node.
///
/// The router exclusively owns the channel registry; node attach/detach goes
/// through it. A send never waits longer than the configured timeout or the
/// caller's deadline. Dropping the `route` future abandons the send.
pub struct RequestRouter {
    registry: NodeChannelRegistry,
    send_timeout: Duration,
}

impl RequestRouter {
    pub fn new(channel_capacity: usize, send_timeout: Duration) -> Self {
        Self {
            registry: NodeChannelRegistry::new(channel_capacity),
            send_timeout,
        }
    }

    pub fn send_timeout(&self) -> Duration {
        self.send_timeout
    }

    /// Register a connected node; the returned receiver feeds its control session
    pub async fn attach_node(
        &self,
        node_id: impl Into<String>,
    ) -> Result<mpsc::Receiver<ControlMessage>, RoutingError> {
        self.registry.attach(node_id.into()).await
    }

    pub async fn detach_node(&self, node_id: &str) -> bool {
        self.registry.detach(node_id).await
    }

    pub async fn is_attached(&self, node_id: &str) -> bool {
        self.registry.contains(node_id).await
    }

    pub async fn connected_nodes(&self) -> Vec<String> {
        self.registry.node_ids().await
    }

    /// Hand a message to a node's channel, bounded by the configured send timeout
    pub async fn route(&self, node_id: &str, message: ControlMessage) -> Result<(), RoutingError> {
        let deadline = Instant::now() + self.send_timeout;
        self.route_until(node_id, message, deadline).await
    }

    /// Hand a message to a node's channel, giving up at `deadline`
    pub async fn route_until(
        &self,
        node_id: &str,
        message: ControlMessage,
        deadline: Instant,
    ) -> Result<(), RoutingError> {
        let sender = self.registry.sender(node_id).await?;

        match timeout_at(deadline, sender.send(message)).await {
            Ok(Ok(())) => {
                debug!("Routed control message to e2 node {}", node_id);
                Ok(())
            }
            Ok(Err(_)) => {
                warn!("Control channel for e2 node {} is closed", node_id);
                Err(RoutingError::ChannelClosed(node_id.to_string()))
            }
            Err(_) => {
                warn!("Timed out routing control message to e2 node {}", node_id);
                Err(RoutingError::SendTimeout(node_id.to_string()))
            }
        }
    }
}
