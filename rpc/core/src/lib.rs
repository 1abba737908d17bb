//! # RPC Core
//!
//! This crate provides the primitives used to talk to a Handshake full node and
//! its wallet: the [`NodeRpcApi`](api::rpc::NodeRpcApi) and
//! [`WalletRpcApi`](api::rpc::WalletRpcApi) traits, the [`RpcApiOps`](api::ops::RpcApiOps)
//! enum naming every call, and the data structures carried by those calls.
//!
//! Transports (see `hns-http-client`) implement the traits; transaction
//! builders only depend on the traits.
//!

pub mod api;
pub mod convert;
pub mod error;
pub mod model;

pub mod prelude {
    //! Re-exports of the most commonly used types and traits in this crate.
    pub use super::api::ops::*;
    pub use super::api::rpc::*;
    pub use super::model::*;
}

pub use convert::*;
pub use error::*;
pub use model::*;
