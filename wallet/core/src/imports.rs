//!
//! Common imports used internally by the builders and the funder.
//!

pub use crate::error::Error;
pub use crate::result::Result;
pub use crate::rpc::{Rpc, RpcCall};

pub use hns_addresses::{Address, Prefix};
pub use hns_consensus_core::covenant::{Covenant, CovenantType};
pub use hns_consensus_core::name::Name;
pub use hns_consensus_core::tx::{Coin, MutableTransaction, Transaction, TransactionId, TransactionOutpoint, TransactionOutput};
pub use hns_consensus_core::Params;
pub use hns_core::{debug, info, trace, warn};
pub use hns_hashes::Hash;
pub use hns_rpc_core::api::ops::RpcApiOps;
pub use hns_rpc_core::model::*;
pub use std::sync::Arc;
