//!
//! Handshake addresses: a witness version and a program hash, rendered as
//! BIP173 bech32 under a network-specific human readable prefix.
//!

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use smallvec::SmallVec;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use thiserror::Error;

mod bech32;

#[derive(Error, PartialEq, Eq, Debug, Clone)]
pub enum AddressError {
    #[error("Invalid prefix {0}")]
    InvalidPrefix(String),

    #[error("Prefix is missing")]
    MissingPrefix,

    #[error("Invalid version {0}")]
    InvalidVersion(u8),

    #[error("Invalid hash length {0} for version {1}")]
    InvalidHashLength(usize, u8),

    #[error("Invalid character {0}")]
    DecodingError(char),

    #[error("Invalid address length {0}")]
    InvalidLength(usize),

    #[error("Address mixes upper and lower case")]
    MixedCase,

    #[error("Invalid padding")]
    InvalidPadding,

    #[error("Checksum is invalid")]
    BadChecksum,

    #[error("Address network {0} does not match expected {1}")]
    WrongNetwork(Prefix, Prefix),
}

#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Debug, Hash, Serialize, Deserialize)]
pub enum Prefix {
    #[serde(rename = "hs")]
    Mainnet,
    #[serde(rename = "ts")]
    Testnet,
    #[serde(rename = "rs")]
    Regtest,
    #[serde(rename = "ss")]
    Simnet,
}

impl Prefix {
    pub fn as_str(&self) -> &'static str {
        match self {
            Prefix::Mainnet => "hs",
            Prefix::Testnet => "ts",
            Prefix::Regtest => "rs",
            Prefix::Simnet => "ss",
        }
    }
}

impl Display for Prefix {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Prefix {
    type Error = AddressError;

    fn try_from(prefix: &str) -> Result<Self, Self::Error> {
        match prefix {
            "hs" => Ok(Prefix::Mainnet),
            "ts" => Ok(Prefix::Testnet),
            "rs" => Ok(Prefix::Regtest),
            "ss" => Ok(Prefix::Simnet),
            _ => Err(AddressError::InvalidPrefix(prefix.to_string())),
        }
    }
}

pub const MAX_VERSION: u8 = 31;
pub const MIN_HASH_LENGTH: usize = 2;
pub const MAX_HASH_LENGTH: usize = 40;

/// Hash length of a version 0 pubkey-hash address (BLAKE2b-160).
pub const PUBKEY_HASH_LENGTH: usize = 20;
/// Hash length of a version 0 script-hash address (SHA3-256).
pub const SCRIPT_HASH_LENGTH: usize = 32;

/// Used as the underlying type for address hashes, sized for the largest allowed program.
pub type PayloadVec = SmallVec<[u8; MAX_HASH_LENGTH]>;

/// A Handshake address. Outputs carry only `version` and `hash`; the prefix
/// selects the network when rendering to and parsing from a string such as
/// `hs1qu3nr...8kc`.
#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Debug, Hash)]
pub struct Address {
    pub prefix: Prefix,
    pub version: u8,
    pub hash: PayloadVec,
}

impl Address {
    pub fn new(prefix: Prefix, version: u8, hash: &[u8]) -> Result<Self, AddressError> {
        validate(version, hash)?;
        Ok(Self { prefix, version, hash: PayloadVec::from_slice(hash) })
    }

    pub fn from_pubkey_hash(prefix: Prefix, hash: &[u8; PUBKEY_HASH_LENGTH]) -> Self {
        Self { prefix, version: 0, hash: PayloadVec::from_slice(hash) }
    }

    pub fn from_script_hash(prefix: Prefix, hash: &[u8; SCRIPT_HASH_LENGTH]) -> Self {
        Self { prefix, version: 0, hash: PayloadVec::from_slice(hash) }
    }

    pub fn is_pubkey_hash(&self) -> bool {
        self.version == 0 && self.hash.len() == PUBKEY_HASH_LENGTH
    }

    pub fn is_script_hash(&self) -> bool {
        self.version == 0 && self.hash.len() == SCRIPT_HASH_LENGTH
    }

    /// Parses an address and requires it to belong to `prefix`'s network.
    pub fn parse_for(address: &str, prefix: Prefix) -> Result<Self, AddressError> {
        let parsed = Self::from_str(address)?;
        if parsed.prefix != prefix {
            return Err(AddressError::WrongNetwork(parsed.prefix, prefix));
        }
        Ok(parsed)
    }
}

fn validate(version: u8, hash: &[u8]) -> Result<(), AddressError> {
    if version > MAX_VERSION {
        return Err(AddressError::InvalidVersion(version));
    }
    let valid_length = match version {
        0 => hash.len() == PUBKEY_HASH_LENGTH || hash.len() == SCRIPT_HASH_LENGTH,
        _ => (MIN_HASH_LENGTH..=MAX_HASH_LENGTH).contains(&hash.len()),
    };
    if !valid_length {
        return Err(AddressError::InvalidHashLength(hash.len(), version));
    }
    Ok(())
}

impl Display for Address {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&bech32::encode(self.prefix.as_str(), self.version, &self.hash))
    }
}

impl From<&Address> for String {
    fn from(address: &Address) -> Self {
        address.to_string()
    }
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(address: &str) -> Result<Self, Self::Err> {
        let (hrp, version, hash) = bech32::decode(address)?;
        let prefix = Prefix::try_from(hrp.as_str())?;
        validate(version, &hash)?;
        Ok(Self { prefix, version, hash })
    }
}

impl TryFrom<&str> for Address {
    type Error = AddressError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = <std::borrow::Cow<'de, str>>::deserialize(deserializer)?;
        Address::from_str(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use crate::*;

    const ANYONE_CAN_RENEW_HASH: &str = "e466310e566f8f14ac36f7eb7607a5d77a2351ad6bb5aba20a17396c5b18b8c1";

    fn cases() -> Vec<(Prefix, &'static str)> {
        // cspell:disable
        vec![
            (Prefix::Mainnet, "hs1qu3nrzrjkd783ftpk7l4hvpa96aazx5dddw66hgs2zuukckcchrqsw3f8kc"),
            (Prefix::Testnet, "ts1qu3nrzrjkd783ftpk7l4hvpa96aazx5dddw66hgs2zuukckcchrqsj8gmfv"),
            (Prefix::Regtest, "rs1qu3nrzrjkd783ftpk7l4hvpa96aazx5dddw66hgs2zuukckcchrqs570axm"),
            (Prefix::Simnet, "ss1qu3nrzrjkd783ftpk7l4hvpa96aazx5dddw66hgs2zuukckcchrqs4kzusf"),
        ]
        // cspell:enable
    }

    #[test]
    fn test_anyone_can_renew_addresses() {
        let hash: [u8; 32] = hex::decode(ANYONE_CAN_RENEW_HASH).unwrap().try_into().unwrap();
        for (prefix, expected) in cases() {
            let address = Address::from_script_hash(prefix, &hash);
            assert!(address.is_script_hash());
            assert_eq!(address.to_string(), expected);
            let decoded: Address = expected.parse().unwrap();
            assert_eq!(decoded, address);
        }
    }

    #[test]
    fn test_pubkey_hash_address() {
        let address = Address::from_pubkey_hash(Prefix::Mainnet, &[0x11; 20]);
        assert_eq!(address.to_string(), "hs1qzyg3zyg3zyg3zyg3zyg3zyg3zyg3zyg33hngca");
        assert!(address.is_pubkey_hash());
        assert!(!address.is_script_hash());
    }

    #[test]
    fn test_parse_for_network() {
        let address = "rs1qxvenxvenxvenxvenxvenxvenxvenxven0wls92";
        assert_eq!(Address::parse_for(address, Prefix::Regtest).unwrap().hash.as_slice(), &[0x33; 20]);
        assert_eq!(Address::parse_for(address, Prefix::Mainnet), Err(AddressError::WrongNetwork(Prefix::Regtest, Prefix::Mainnet)));
    }

    #[test]
    fn test_invalid_addresses() {
        assert_eq!(Address::new(Prefix::Mainnet, 32, &[0; 20]), Err(AddressError::InvalidVersion(32)));
        assert_eq!(Address::new(Prefix::Mainnet, 0, &[0; 21]), Err(AddressError::InvalidHashLength(21, 0)));
        assert_eq!(Address::new(Prefix::Mainnet, 1, &[0; 1]), Err(AddressError::InvalidHashLength(1, 1)));
        assert!(Address::new(Prefix::Mainnet, 1, &[0; 40]).is_ok());
        assert_eq!("bc1qxvenxvenxvenxvenxvenxvenxvenxven0wls92".parse::<Address>(), Err(AddressError::BadChecksum));
        assert_eq!("qxvenxvenx".parse::<Address>(), Err(AddressError::MissingPrefix));
    }

    #[test]
    fn test_serde() {
        let (_, s) = cases()[0];
        let address: Address = serde_json::from_str(&format!("\"{s}\"")).unwrap();
        assert_eq!(serde_json::to_string(&address).unwrap(), format!("\"{s}\""));
        assert!(serde_json::from_str::<Address>("\"hs1qqqq\"").is_err());
    }
}
