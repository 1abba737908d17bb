use crate::client::HttpClient;
use async_trait::async_trait;
use hns_addresses::Address;
use hns_rpc_core::{api::ops::RpcApiOps, api::rpc::WalletRpcApi, model::RpcUnspent, RpcResult};
use serde_json::{json, Value};

/// Wallet client: JSON-RPC on the wallet server.
#[derive(Debug)]
pub struct WalletHttpClient {
    client: HttpClient,
}

impl WalletHttpClient {
    pub fn new(url: &str, api_key: Option<String>) -> RpcResult<Self> {
        Ok(Self { client: HttpClient::new(url, api_key)? })
    }

    pub fn url(&self) -> &str {
        self.client.url()
    }
}

#[async_trait]
impl WalletRpcApi for WalletHttpClient {
    async fn select_wallet(&self, wallet_id: &str) -> RpcResult<()> {
        self.client.call::<Value>(RpcApiOps::SelectWallet, json!([wallet_id])).await?;
        Ok(())
    }

    async fn get_new_address(&self) -> RpcResult<Address> {
        self.client.call(RpcApiOps::GetNewAddress, json!([])).await
    }

    async fn list_unspent(&self) -> RpcResult<Vec<RpcUnspent>> {
        self.client.call(RpcApiOps::ListUnspent, json!([])).await
    }

    async fn get_raw_change_address(&self) -> RpcResult<Address> {
        self.client.call(RpcApiOps::GetRawChangeAddress, json!([])).await
    }

    async fn dump_priv_key(&self, address: &Address) -> RpcResult<String> {
        self.client.call(RpcApiOps::DumpPrivKey, json!([address])).await
    }

    async fn wallet_passphrase(&self, passphrase: &str, timeout: u64) -> RpcResult<()> {
        self.client.call::<Value>(RpcApiOps::WalletPassphrase, json!([passphrase, timeout])).await?;
        Ok(())
    }
}
