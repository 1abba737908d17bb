use hns_hashes::Hash;
use serde::{Deserialize, Serialize};

/// Subset of the node's `GET /` status document.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RpcNodeInfo {
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub network: String,
    pub chain: RpcChainInfo,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RpcChainInfo {
    pub height: u32,
    #[serde(default)]
    pub tip: Option<Hash>,
    #[serde(default)]
    pub progress: f64,
}
