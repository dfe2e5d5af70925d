use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// E2 node aspect: the service models the node advertised at setup
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct E2Node {
    /// Service models keyed by OID
    #[serde(default)]
    pub service_models: BTreeMap<String, ServiceModelInfo>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceModelInfo {
    pub oid: String,
    pub name: String,
    #[serde(default)]
    pub ran_functions: Vec<RanFunction>,
}

/// Encoded RAN function description (a protobuf `Any`)
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RanFunction {
    pub type_url: String,
    #[serde(default)]
    pub value: Vec<u8>,
}

/// E2 cell aspect
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct E2Cell {
    pub cell_object_id: String,
    pub cell_global_id: String,
    #[serde(default)]
    pub pci: u32,
}
