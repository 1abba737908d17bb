//!
//! Handshake consensus types used when assembling transactions: covenants, the
//! transaction model, its wire encoding, network parameters and relay policy.
//!

pub mod config;
pub mod covenant;
pub mod name;
pub mod network;
pub mod policy;
pub mod tx;
pub mod wire;

pub use config::constants::COIN;
pub use config::params::Params;
pub use network::NetworkType;
