//! E2 node connection tracking
//!
//! Consumes `controls` relation events from the topology watch and keeps the
//! router's channel registry in step: a node gets a control channel when it
//! appears and loses it when its relation is removed. Each channel is drained
//! by a control session task.

use rsm_api::topo::{Event, EventType};
use rsm_core::{ControlMessage, RequestRouter};
use rsm_e2::decode_control_message;
use rsm_topo::RnibClient;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

pub struct E2ConnectionManager {
    rnib: RnibClient,
    router: Arc<RequestRouter>,
    sessions: HashMap<String, JoinHandle<()>>,
}

impl E2ConnectionManager {
    pub fn new(rnib: RnibClient, router: Arc<RequestRouter>) -> Self {
        Self {
            rnib,
            router,
            sessions: HashMap::new(),
        }
    }

    /// Process connection events until the watch ends
    pub async fn run(mut self, mut events: mpsc::Receiver<Event>) {
        while let Some(event) = events.recv().await {
            self.handle_event(event).await;
        }
        info!("E2 connection watch ended");
    }

    pub async fn handle_event(&mut self, event: Event) {
        let Some(relation) = event.object.as_relation() else {
            debug!("Ignoring non-relation object {}", event.object.id);
            return;
        };
        let node_id = relation.tgt_entity_id.clone();

        match event.event_type {
            EventType::None | EventType::Added => self.connect(node_id).await,
            EventType::Removed => self.disconnect(&node_id).await,
            EventType::Updated => debug!("E2 node {} relation updated", node_id),
        }
    }

    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    #[instrument(skip(self))]
    async fn connect(&mut self, node_id: String) {
        let receiver = match self.router.attach_node(node_id.clone()).await {
            Ok(receiver) => receiver,
            Err(e) => {
                warn!("{}", e);
                return;
            }
        };
        info!("E2 node {} connected", node_id);
        self.describe(&node_id).await;

        let session = tokio::spawn(control_session(node_id.clone(), receiver));
        self.sessions.insert(node_id, session);
    }

    #[instrument(skip(self))]
    async fn disconnect(&mut self, node_id: &str) {
        if self.router.detach_node(node_id).await {
            info!("E2 node {} disconnected", node_id);
        }
        // The session drains what is queued and ends once the channel closes
        self.sessions.remove(node_id);
    }

    async fn describe(&self, node_id: &str) {
        match self.rnib.get_supported_slicing_config_types(node_id).await {
            Ok(configs) => {
                let commands: Vec<i32> = configs.iter().map(|c| c.slicing_config_type).collect();
                info!("E2 node {} supports slicing configs {:?}", node_id, commands);
            }
            Err(e) => warn!("Failed to read slicing capabilities of e2 node {}: {}", node_id, e),
        }

        match self.rnib.get_cells(node_id).await {
            Ok(cells) => {
                for cell in cells {
                    debug!(
                        "E2 node {} cell {} (pci {})",
                        node_id, cell.cell_global_id, cell.pci
                    );
                }
            }
            Err(e) => warn!("{}", e),
        }
    }
}

/// Stand-in for the E2 control procedure: decode and log each request
async fn control_session(node_id: String, mut messages: mpsc::Receiver<ControlMessage>) {
    while let Some(message) = messages.recv().await {
        match decode_control_message(&message) {
            Ok(decoded) => debug!(
                e2_node_id = %node_id,
                command = %decoded.command,
                "Control request {:?}",
                decoded.payload
            ),
            Err(e) => warn!("Undecodable control request for e2 node {}: {}", node_id, e),
        }
    }
    debug!("Control session for e2 node {} closed", node_id);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ControllerConfig;
    use rsm_api::topo::{Filters, CONTROLS};
    use rsm_topo::{InMemoryTopo, TopoService};
    use std::time::Duration;

    async fn setup() -> (InMemoryTopo, E2ConnectionManager, Arc<RequestRouter>) {
        let topo = InMemoryTopo::new();
        for object in ControllerConfig::example().topology.objects() {
            topo.create(object).await.unwrap();
        }
        let router = Arc::new(RequestRouter::new(4, Duration::from_millis(50)));
        let manager = E2ConnectionManager::new(
            RnibClient::new(Arc::new(topo.clone())),
            router.clone(),
        );
        (topo, manager, router)
    }

    #[tokio::test]
    async fn test_replayed_node_is_attached() {
        let (topo, mut manager, router) = setup().await;
        let mut events = topo.watch(Filters::kind(CONTROLS)).await.unwrap();

        manager.handle_event(events.recv().await.unwrap()).await;
        assert!(router.is_attached("e2:4/e00/2/64").await);
        assert_eq!(manager.session_count(), 1);
    }

    #[tokio::test]
    async fn test_removed_relation_detaches() {
        let (topo, mut manager, router) = setup().await;
        let relation = topo.get("onos-rsm-controls-e2:4/e00/2/64").await.unwrap();

        manager
            .handle_event(Event {
                event_type: EventType::Added,
                object: relation.clone(),
            })
            .await;
        // A second add for the same node is rejected by the registry
        manager
            .handle_event(Event {
                event_type: EventType::None,
                object: relation.clone(),
            })
            .await;
        assert_eq!(router.connected_nodes().await.len(), 1);

        manager
            .handle_event(Event {
                event_type: EventType::Removed,
                object: relation,
            })
            .await;
        assert!(!router.is_attached("e2:4/e00/2/64").await);
        assert_eq!(manager.session_count(), 0);
    }

    #[tokio::test]
    async fn test_entities_are_ignored() {
        let (topo, mut manager, router) = setup().await;
        let entity = topo.get("e2:4/e00/2/64").await.unwrap();
        manager
            .handle_event(Event {
                event_type: EventType::Added,
                object: entity,
            })
            .await;
        assert!(router.connected_nodes().await.is_empty());
    }
}
