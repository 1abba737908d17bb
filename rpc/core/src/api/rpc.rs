//! The client API
//!
//! Rpc = External RPC Service
//! All data provided by the node and wallet is trusted as-is; builders only
//! check the shape they depend on.

use crate::{model::*, RpcResult};
use async_trait::async_trait;
use hns_addresses::Address;
use hns_consensus_core::tx::{TransactionId, TransactionOutpoint};
use hns_hashes::Hash;

/// Full node service: chain state, coin lookup, signing and broadcast.
#[async_trait]
pub trait NodeRpcApi: Sync + Send {
    /// Ownership and auction state of `name`.
    async fn get_name_info(&self, name: &str) -> RpcResult<RpcNameInfo>;

    /// Unspent output at `outpoint`, `None` if the node does not know it or it is spent.
    async fn get_coin(&self, outpoint: TransactionOutpoint) -> RpcResult<Option<RpcCoin>>;

    /// Transaction by id, `None` if the node does not index it.
    async fn get_transaction(&self, transaction_id: TransactionId) -> RpcResult<Option<RpcTransaction>>;

    async fn get_info(&self) -> RpcResult<RpcNodeInfo>;

    async fn get_block_hash(&self, height: u32) -> RpcResult<Hash>;

    /// Signs `tx_hex` with `keys` (WIF). `inputs` supplies the previous outputs
    /// of inputs the node cannot look up itself.
    async fn sign_raw_transaction(
        &self,
        tx_hex: String,
        inputs: Vec<RpcSignInput>,
        keys: Vec<String>,
    ) -> RpcResult<RpcSignedTransaction>;

    async fn send_raw_transaction(&self, tx_hex: String) -> RpcResult<TransactionId>;

    async fn get_raw_mempool(&self) -> RpcResult<Vec<TransactionId>>;
}

/// Wallet service: coins and key custody.
#[async_trait]
pub trait WalletRpcApi: Sync + Send {
    async fn select_wallet(&self, wallet_id: &str) -> RpcResult<()>;

    async fn get_new_address(&self) -> RpcResult<Address>;

    async fn list_unspent(&self) -> RpcResult<Vec<RpcUnspent>>;

    async fn get_raw_change_address(&self) -> RpcResult<Address>;

    /// Private key of `address` in WIF. The wallet must be unlocked.
    async fn dump_priv_key(&self, address: &Address) -> RpcResult<String>;

    /// Unlocks the wallet for `timeout` seconds.
    async fn wallet_passphrase(&self, passphrase: &str, timeout: u64) -> RpcResult<()>;
}
