//!
//! Assembly of Handshake name transactions that an external wallet funds and
//! an external node signs.
//!
//! A builder ([`RenewalBuilder`](tx::RenewalBuilder) or
//! [`FinalizeBuilder`](tx::FinalizeBuilder)) produces a skeleton spending the
//! name's coin into its successor covenant. The [`Funder`](tx::Funder) then
//! attaches a wallet coin paying the fee, prices the transaction by virtual
//! size and has the node sign it.
//!

extern crate self as hns_wallet_core;

pub mod error;
mod imports;
pub mod resolver;
pub mod result;
pub mod rpc;
pub mod tx;

#[cfg(any(test, feature = "test-utils"))]
pub mod tests;

pub use error::Error;
pub use result::Result;
pub use rpc::Rpc;
