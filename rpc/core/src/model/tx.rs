use hns_addresses::Address;
use hns_consensus_core::tx::TransactionId;
use hns_hashes::Hash;
use serde::{Deserialize, Serialize};

/// Outpoint as rendered by the node (`{ hash, index }`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RpcOutpoint {
    pub hash: Hash,
    pub index: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RpcCovenant {
    #[serde(rename = "type")]
    pub covenant_type: u8,
    #[serde(default)]
    pub action: String,
    /// Hex encoded items.
    pub items: Vec<String>,
}

/// Result of `GET /coin/:hash/:index`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RpcCoin {
    pub version: u32,
    /// `-1` while the coin is in the mempool.
    pub height: i64,
    pub value: u64,
    pub address: Address,
    pub covenant: RpcCovenant,
    pub coinbase: bool,
    pub hash: TransactionId,
    pub index: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RpcTransactionInput {
    pub prevout: RpcOutpoint,
    /// Hex encoded witness items.
    pub witness: Vec<String>,
    pub sequence: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RpcTransactionOutput {
    pub value: u64,
    pub address: Address,
    pub covenant: RpcCovenant,
}

/// Result of `GET /tx/:hash`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RpcTransaction {
    pub hash: TransactionId,
    pub version: u32,
    pub inputs: Vec<RpcTransactionInput>,
    pub outputs: Vec<RpcTransactionOutput>,
    pub locktime: u32,
    #[serde(default = "unconfirmed")]
    pub height: i64,
}

fn unconfirmed() -> i64 {
    -1
}

/// Per-input context passed to `signrawtransaction`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RpcSignInput {
    pub txid: TransactionId,
    pub vout: u32,
    pub address: Address,
    /// Value in whole coins.
    pub amount: f64,
}

/// Result of `signrawtransaction`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RpcSignedTransaction {
    pub hex: String,
    pub complete: bool,
}
