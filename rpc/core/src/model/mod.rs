//! This module contains RPC-specific data structures
//! used in RPC methods.

mod chain;
mod name;
mod tx;
mod wallet;

pub use chain::*;
pub use name::*;
pub use tx::*;
pub use wallet::*;
