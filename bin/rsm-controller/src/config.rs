//! YAML configuration for the RSM controller

use anyhow::{bail, Context, Result};
use rsm_api::topo::{
    E2Cell, E2Node, Object, RsmNodeSlicingCapabilityItem, RsmRanFunction, RsmSlicingType,
    RsmSupportedSlicingConfigItem, ServiceModelInfo, CONTAINS, CONTROLS, E2CELL, E2NODE,
};
use rsm_core::EnumPolicy;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

/// Entity id of this application in the controls relations it owns
pub const APP_ID: &str = "onos-rsm";

const RSM_SM_OID: &str = "1.3.6.1.4.1.53148.1.1.2.102";
const RSM_SM_NAME: &str = "ORAN-E2SM-RSM";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    /// Address of the northbound HTTP API
    pub listen_addr: SocketAddr,
    /// Pending control messages buffered per E2 node
    pub channel_capacity: usize,
    /// Longest a request waits for room in a node's channel
    pub send_timeout_ms: u64,
    pub enum_policy: EnumPolicy,
    pub log_level: String,
    pub json_logs: bool,
    /// E2 nodes loaded into the in-memory topology at startup
    pub topology: TopologySeed,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([0, 0, 0, 0], 5150)),
            channel_capacity: 100,
            send_timeout_ms: 5000,
            enum_policy: EnumPolicy::Coerce,
            log_level: "info".to_string(),
            json_logs: false,
            topology: TopologySeed::default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TopologySeed {
    #[serde(default)]
    pub nodes: Vec<NodeSeed>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeSeed {
    pub id: String,
    #[serde(default)]
    pub cells: Vec<CellSeed>,
    /// Raw `E2SmRsmCommand` values the node accepts; empty means no RSM RAN function
    #[serde(default)]
    pub slicing_configs: Vec<i32>,
    #[serde(default = "default_max_slices")]
    pub max_slices: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellSeed {
    pub cell_global_id: String,
    #[serde(default)]
    pub pci: u32,
}

fn default_max_slices() -> i32 {
    4
}

impl ControllerConfig {
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: ControllerConfig = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_yaml(&content)
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }

    /// Defaults when no file is given
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.channel_capacity == 0 {
            bail!("channel_capacity must be greater than 0");
        }
        if self.send_timeout_ms == 0 {
            bail!("send_timeout_ms must be greater than 0");
        }

        let mut seen = HashSet::new();
        for node in &self.topology.nodes {
            if node.id.is_empty() {
                bail!("topology node with an empty id");
            }
            if !seen.insert(node.id.as_str()) {
                bail!("duplicate topology node id {}", node.id);
            }
        }
        Ok(())
    }

    pub fn send_timeout(&self) -> Duration {
        Duration::from_millis(self.send_timeout_ms)
    }

    /// Configuration written by `gen-config`
    pub fn example() -> Self {
        Self {
            topology: TopologySeed {
                nodes: vec![NodeSeed {
                    id: "e2:4/e00/2/64".to_string(),
                    cells: vec![CellSeed {
                        cell_global_id: "138426014550001".to_string(),
                        pci: 1,
                    }],
                    slicing_configs: vec![0, 1, 2, 3],
                    max_slices: default_max_slices(),
                }],
            },
            ..Self::default()
        }
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}

impl TopologySeed {
    /// Topology objects for the seeded nodes: entities first, then relations
    pub fn objects(&self) -> Vec<Object> {
        let mut entities = Vec::new();
        let mut relations = Vec::new();

        for node in &self.nodes {
            entities.push(Object::entity(node.id.as_str(), E2NODE).with_e2_node(node.e2_node()));
            relations.push(Object::relation(CONTROLS, APP_ID, &node.id));

            for cell in &node.cells {
                let cell_object_id = format!("{}/{}", node.id, cell.cell_global_id);
                entities.push(
                    Object::entity(cell_object_id.as_str(), E2CELL).with_e2_cell(E2Cell {
                        cell_object_id: cell_object_id.clone(),
                        cell_global_id: cell.cell_global_id.clone(),
                        pci: cell.pci,
                    }),
                );
                relations.push(Object::relation(CONTAINS, &node.id, &cell_object_id));
            }
        }

        entities.extend(relations);
        entities
    }
}

impl NodeSeed {
    fn e2_node(&self) -> E2Node {
        let mut node = E2Node::default();
        if self.slicing_configs.is_empty() {
            return node;
        }

        let ran_function = RsmRanFunction {
            id: "1".to_string(),
            ric_slicing_node_capability_list: vec![RsmNodeSlicingCapabilityItem {
                max_number_of_slices_dl: self.max_slices,
                max_number_of_slices_ul: self.max_slices,
                slicing_type: RsmSlicingType::Static as i32,
                max_number_of_ues_per_slice: 0,
                supported_config: self
                    .slicing_configs
                    .iter()
                    .map(|&slicing_config_type| RsmSupportedSlicingConfigItem {
                        slicing_config_type,
                    })
                    .collect(),
            }],
        };
        node.service_models.insert(
            RSM_SM_OID.to_string(),
            ServiceModelInfo {
                oid: RSM_SM_OID.to_string(),
                name: RSM_SM_NAME.to_string(),
                ran_functions: vec![ran_function.to_ran_function()],
            },
        );
        node
    }
}
