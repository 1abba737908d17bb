//!
//! Node and wallet RPC handles shared by the builders and the funder.
//!

use crate::error::Error;
use crate::result::Result;
use hns_rpc_core::{
    api::{
        ops::RpcApiOps,
        rpc::{NodeRpcApi, WalletRpcApi},
    },
    RpcResult,
};
use std::sync::Arc;

pub type DynNodeRpcApi = dyn NodeRpcApi;
pub type DynWalletRpcApi = dyn WalletRpcApi;

/// A pair of RPC endpoints: the full node and the wallet holding fee coins.
#[derive(Clone)]
pub struct Rpc {
    pub node: Arc<DynNodeRpcApi>,
    pub wallet: Arc<DynWalletRpcApi>,
}

impl Rpc {
    pub fn new(node: Arc<DynNodeRpcApi>, wallet: Arc<DynWalletRpcApi>) -> Self {
        Rpc { node, wallet }
    }

    pub fn node(&self) -> &Arc<DynNodeRpcApi> {
        &self.node
    }

    pub fn wallet(&self) -> &Arc<DynWalletRpcApi> {
        &self.wallet
    }
}

/// Tags an RPC result with the call that produced it.
pub trait RpcCall<T> {
    fn call(self, op: RpcApiOps) -> Result<T>;
}

impl<T> RpcCall<T> for RpcResult<T> {
    fn call(self, op: RpcApiOps) -> Result<T> {
        self.map_err(|source| Error::rpc(op, source))
    }
}
