use hns_rpc_core::RpcError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("can not create the {endpoint} client for {url}: {source}")]
    Client { endpoint: &'static str, url: String, source: RpcError },

    #[error(transparent)]
    Wallet(#[from] hns_wallet_core::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
