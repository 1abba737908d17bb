use crate::client::HttpClient;
use async_trait::async_trait;
use hns_consensus_core::tx::{TransactionId, TransactionOutpoint};
use hns_hashes::Hash;
use hns_rpc_core::{api::ops::RpcApiOps, api::rpc::NodeRpcApi, model::*, RpcResult};
use serde_json::json;

/// Node client: JSON-RPC on `/` plus the REST coin, transaction and status endpoints.
#[derive(Debug)]
pub struct NodeHttpClient {
    client: HttpClient,
}

impl NodeHttpClient {
    pub fn new(url: &str, api_key: Option<String>) -> RpcResult<Self> {
        Ok(Self { client: HttpClient::new(url, api_key)? })
    }

    pub fn url(&self) -> &str {
        self.client.url()
    }
}

#[async_trait]
impl NodeRpcApi for NodeHttpClient {
    async fn get_name_info(&self, name: &str) -> RpcResult<RpcNameInfo> {
        self.client.call(RpcApiOps::GetNameInfo, json!([name])).await
    }

    async fn get_coin(&self, outpoint: TransactionOutpoint) -> RpcResult<Option<RpcCoin>> {
        self.client.get(&format!("/coin/{}/{}", outpoint.transaction_id, outpoint.index)).await
    }

    async fn get_transaction(&self, transaction_id: TransactionId) -> RpcResult<Option<RpcTransaction>> {
        self.client.get(&format!("/tx/{}", transaction_id)).await
    }

    async fn get_info(&self) -> RpcResult<RpcNodeInfo> {
        self.client.get("/").await?.ok_or_else(|| "node returned no status document".into())
    }

    async fn get_block_hash(&self, height: u32) -> RpcResult<Hash> {
        self.client.call(RpcApiOps::GetBlockHash, json!([height])).await
    }

    async fn sign_raw_transaction(
        &self,
        tx_hex: String,
        inputs: Vec<RpcSignInput>,
        keys: Vec<String>,
    ) -> RpcResult<RpcSignedTransaction> {
        self.client.call(RpcApiOps::SignRawTransaction, json!([tx_hex, inputs, keys])).await
    }

    async fn send_raw_transaction(&self, tx_hex: String) -> RpcResult<TransactionId> {
        self.client.call(RpcApiOps::SendRawTransaction, json!([tx_hex])).await
    }

    async fn get_raw_mempool(&self) -> RpcResult<Vec<TransactionId>> {
        self.client.call(RpcApiOps::GetRawMempool, json!([])).await
    }
}
