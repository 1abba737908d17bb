use hns_consensus_core::tx::TransactionOutpoint;
use hns_hashes::Hash;
use serde::{Deserialize, Serialize};

use super::RpcOutpoint;

/// Result of `getnameinfo`. `info` is `null` for names that were never opened.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RpcNameInfo {
    pub info: Option<RpcNameState>,
}

/// The node's view of a name.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RpcNameState {
    pub name: String,
    pub name_hash: Hash,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub height: u32,
    #[serde(default)]
    pub renewal: u32,
    #[serde(default)]
    pub owner: Option<RpcOutpoint>,
    #[serde(default)]
    pub value: u64,
    #[serde(default)]
    pub highest: u64,
    #[serde(default)]
    pub transfer: u32,
    #[serde(default)]
    pub revoked: u32,
    #[serde(default)]
    pub claimed: u32,
    #[serde(default)]
    pub renewals: u32,
    #[serde(default)]
    pub registered: bool,
    #[serde(default)]
    pub expired: bool,
    #[serde(default)]
    pub weak: bool,
}

impl RpcNameState {
    /// The outpoint of the coin currently holding the name, if any.
    pub fn owner_outpoint(&self) -> Option<TransactionOutpoint> {
        self.owner.map(TransactionOutpoint::from).filter(|outpoint| !outpoint.is_null())
    }

    /// Finalize covenant flags: bit 0 marks a name claimed with a weak proof.
    pub fn flags(&self) -> u8 {
        u8::from(self.weak)
    }
}
