use crate::config::params::Params;
use hns_addresses::Prefix;
use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Display, Formatter};
use std::str::FromStr;

#[derive(thiserror::Error, PartialEq, Eq, Debug, Clone)]
pub enum NetworkTypeError {
    #[error("Invalid network type: {0}")]
    InvalidNetworkType(String),
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum NetworkType {
    #[default]
    #[serde(alias = "mainnet")]
    Main,
    Testnet,
    Regtest,
    Simnet,
}

impl NetworkType {
    pub fn params(&self) -> &'static Params {
        Params::of(*self)
    }

    pub fn default_rpc_port(&self) -> u16 {
        self.params().rpc_port
    }

    pub fn default_wallet_port(&self) -> u16 {
        self.params().wallet_port
    }

    pub fn iter() -> impl Iterator<Item = Self> {
        static NETWORK_TYPES: [NetworkType; 4] = [NetworkType::Main, NetworkType::Testnet, NetworkType::Regtest, NetworkType::Simnet];
        NETWORK_TYPES.iter().copied()
    }
}

impl From<NetworkType> for Prefix {
    fn from(network_type: NetworkType) -> Self {
        match network_type {
            NetworkType::Main => Prefix::Mainnet,
            NetworkType::Testnet => Prefix::Testnet,
            NetworkType::Regtest => Prefix::Regtest,
            NetworkType::Simnet => Prefix::Simnet,
        }
    }
}

impl From<Prefix> for NetworkType {
    fn from(prefix: Prefix) -> Self {
        match prefix {
            Prefix::Mainnet => NetworkType::Main,
            Prefix::Testnet => NetworkType::Testnet,
            Prefix::Regtest => NetworkType::Regtest,
            Prefix::Simnet => NetworkType::Simnet,
        }
    }
}

impl FromStr for NetworkType {
    type Err = NetworkTypeError;
    fn from_str(network_type: &str) -> Result<Self, Self::Err> {
        match network_type.to_lowercase().as_str() {
            "main" | "mainnet" => Ok(NetworkType::Main),
            "testnet" => Ok(NetworkType::Testnet),
            "regtest" => Ok(NetworkType::Regtest),
            "simnet" => Ok(NetworkType::Simnet),
            _ => Err(NetworkTypeError::InvalidNetworkType(network_type.to_string())),
        }
    }
}

impl Display for NetworkType {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            NetworkType::Main => "main",
            NetworkType::Testnet => "testnet",
            NetworkType::Regtest => "regtest",
            NetworkType::Simnet => "simnet",
        };
        f.write_str(s)
    }
}
