use hns_addresses::{Address, AddressError};
use hns_consensus_core::{
    covenant::CovenantError,
    name::NameError,
    tx::{TransactionId, TransactionOutpoint},
};
use hns_rpc_core::{api::ops::RpcApiOps, RpcError};
use hns_txscript::TxScriptError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("could not find a coin for name {0}")]
    NameNotFound(String),

    #[error("name coin is locked by {0}, not the anyone-can-renew script")]
    WrongLockScript(Address),

    #[error("transfer script is not HIP-1: {0}")]
    NotHIP1Script(TxScriptError),

    #[error("could not get parent transaction {0} with the TRANSFER")]
    NoParentTransaction(TransactionId),

    #[error("could not find the input with the TRANSFER script for {0}")]
    NoTransferInput(TransactionOutpoint),

    #[error("can not fund transaction: no spendable coins")]
    NoSpendableCoins,

    #[error("insufficient funds: {available} available, {required} required")]
    InsufficientFunds { available: u64, required: u64 },

    #[error("expected a skeleton with one input and one output, found {inputs} inputs and {outputs} outputs")]
    UnexpectedSkeleton { inputs: usize, outputs: usize },

    #[error("RPC call {call} failed: {source}")]
    RpcFailure { call: RpcApiOps, source: RpcError },

    #[error(transparent)]
    Name(#[from] NameError),

    #[error(transparent)]
    Covenant(#[from] CovenantError),

    #[error(transparent)]
    Address(#[from] AddressError),
}

impl Error {
    pub fn rpc(call: RpcApiOps, source: RpcError) -> Self {
        Error::RpcFailure { call, source }
    }
}
