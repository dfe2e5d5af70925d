//! R-NIB client used by the slice manager

use prost::Message;
use rsm_api::topo::{
    E2Cell, E2Node, Event, Filters, Id, RsmRanFunction, RsmSupportedSlicingConfigItem, CONTAINS,
    CONTROLS, E2CELL, RSM_RAN_FUNCTION_TYPE_URL,
};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::{TopoService, TopologyError};

/// Reads E2 node, cell and capability information from the topology
#[derive(Clone)]
pub struct RnibClient {
    topo: Arc<dyn TopoService>,
}

impl RnibClient {
    pub fn new(topo: Arc<dyn TopoService>) -> Self {
        Self { topo }
    }

    fn controls_filter() -> Filters {
        Filters::kind(CONTROLS)
    }

    /// IDs of the E2 nodes currently controlled, one per `controls` relation
    pub async fn e2_node_ids(&self) -> Result<Vec<Id>, TopologyError> {
        let objects = self.topo.list(&Self::controls_filter()).await?;
        Ok(objects
            .iter()
            .filter_map(|object| object.as_relation())
            .map(|relation| relation.tgt_entity_id.clone())
            .collect())
    }

    pub async fn get_e2_node_aspects(&self, node_id: &str) -> Result<E2Node, TopologyError> {
        let object = self.topo.get(node_id).await?;
        object.e2_node_aspect().cloned().ok_or_else(|| {
            TopologyError::NotFound(format!("e2 node {} has no e2node aspect", node_id))
        })
    }

    /// Slicing configurations supported across every RSM RAN function of the node
    pub async fn get_supported_slicing_config_types(
        &self,
        node_id: &str,
    ) -> Result<Vec<RsmSupportedSlicingConfigItem>, TopologyError> {
        let e2_node = self.get_e2_node_aspects(node_id).await?;
        let mut result = Vec::new();

        for (sm_name, sm) in &e2_node.service_models {
            for ran_function in &sm.ran_functions {
                if ran_function.type_url != RSM_RAN_FUNCTION_TYPE_URL {
                    debug!(
                        "RanFunction for SM - {}, URL - {} is not an RSM RAN function description",
                        sm_name, ran_function.type_url
                    );
                    continue;
                }
                let description = match RsmRanFunction::decode(ran_function.value.as_slice()) {
                    Ok(description) => description,
                    Err(e) => {
                        debug!(
                            "RanFunction for SM - {}, URL - {} does not have RSM RAN Function Description: {}",
                            sm_name, ran_function.type_url, e
                        );
                        continue;
                    }
                };
                for capability in description.ric_slicing_node_capability_list {
                    result.extend(capability.supported_config);
                }
            }
        }

        Ok(result)
    }

    /// Cells contained by the node
    pub async fn get_cells(&self, node_id: &str) -> Result<Vec<E2Cell>, TopologyError> {
        let objects = self
            .topo
            .list(&Filters::relation(node_id, CONTAINS, ""))
            .await?;

        let cells: Vec<E2Cell> = objects
            .iter()
            .filter(|object| object.kind_id() == E2CELL)
            .map(|object| object.e2_cell_aspect().cloned().unwrap_or_default())
            .collect();

        if cells.is_empty() {
            return Err(TopologyError::NotFound(format!(
                "there is no cell to subscribe for e2 node {}",
                node_id
            )));
        }
        Ok(cells)
    }

    /// Forward `controls` relation events to `sender` until either side goes away.
    ///
    /// Returns once the subscription is in place.
    pub async fn watch_e2_connections(
        &self,
        sender: mpsc::Sender<Event>,
    ) -> Result<(), TopologyError> {
        let mut events = self.topo.watch(Self::controls_filter()).await?;
        info!("Watching E2 connections");

        tokio::spawn(async move {
            while let Some(event) = events.recv().await {
                if sender.send(event).await.is_err() {
                    debug!("E2 connection watcher dropped, stopping forwarder");
                    return;
                }
            }
            debug!("Topology watch closed");
        });

        Ok(())
    }
}
