use hns_addresses::Address;
use hns_consensus_core::tx::TransactionId;
use serde::{Deserialize, Serialize};

/// Entry of the wallet's `listunspent` result.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RpcUnspent {
    pub txid: TransactionId,
    pub vout: u32,
    pub address: Address,
    #[serde(default)]
    pub account: String,
    /// Value in whole coins.
    pub amount: f64,
    pub confirmations: u32,
    #[serde(default = "spendable")]
    pub spendable: bool,
}

fn spendable() -> bool {
    true
}
