//!
//! HTTP transport for the Handshake node and wallet servers, implementing
//! [`NodeRpcApi`](hns_rpc_core::api::rpc::NodeRpcApi) and
//! [`WalletRpcApi`](hns_rpc_core::api::rpc::WalletRpcApi).
//!
//! Both servers authenticate with HTTP basic auth, user `x` and the API key.
//!

pub mod client;
pub mod node;
pub mod wallet;

pub use client::{HttpClient, API_USER};
pub use node::NodeHttpClient;
pub use wallet::WalletHttpClient;
