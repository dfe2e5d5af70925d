//! RSM RAN function description carried in an E2 node's service models.

use prost::Message;

use super::RanFunction;

pub const RSM_RAN_FUNCTION_TYPE_URL: &str = "type.googleapis.com/onos.topo.RSMRanFunction";

#[derive(Clone, PartialEq, Message)]
pub struct RsmRanFunction {
    #[prost(string, tag = "1")]
    pub id: String,
    #[prost(message, repeated, tag = "2")]
    pub ric_slicing_node_capability_list: Vec<RsmNodeSlicingCapabilityItem>,
}

#[derive(Clone, PartialEq, Message)]
pub struct RsmNodeSlicingCapabilityItem {
    #[prost(int32, tag = "1")]
    pub max_number_of_slices_dl: i32,
    #[prost(int32, tag = "2")]
    pub max_number_of_slices_ul: i32,
    #[prost(enumeration = "RsmSlicingType", tag = "3")]
    pub slicing_type: i32,
    #[prost(int32, tag = "4")]
    pub max_number_of_ues_per_slice: i32,
    #[prost(message, repeated, tag = "5")]
    pub supported_config: Vec<RsmSupportedSlicingConfigItem>,
}

#[derive(Clone, PartialEq, Message)]
pub struct RsmSupportedSlicingConfigItem {
    /// Raw `E2SmRsmCommand` value
    #[prost(int32, tag = "1")]
    pub slicing_config_type: i32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration)]
#[repr(i32)]
pub enum RsmSlicingType {
    Static = 0,
    Dynamic = 1,
}

impl RsmRanFunction {
    /// Wrap the encoded descriptor the way an E2 node publishes it
    pub fn to_ran_function(&self) -> RanFunction {
        RanFunction {
            type_url: RSM_RAN_FUNCTION_TYPE_URL.to_string(),
            value: self.encode_to_vec(),
        }
    }
}
