//!
//! API module for the RPC traits and method identifiers.
//!

pub mod ops;
pub mod rpc;
