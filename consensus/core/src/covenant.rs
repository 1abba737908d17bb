use hns_hashes::{Hash, HASH_SIZE};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, PartialEq, Eq, Debug, Clone)]
pub enum CovenantError {
    #[error("unknown covenant type {0}")]
    UnknownType(u8),

    #[error("unknown covenant action {0}")]
    UnknownAction(String),

    #[error("covenant has no item at index {0}")]
    MissingItem(usize),

    #[error("covenant item {index} has length {actual}, expected {expected}")]
    InvalidItemLength { index: usize, expected: usize, actual: usize },
}

/// Covenant discriminants, in wire order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
#[repr(u8)]
pub enum CovenantType {
    None = 0,
    Claim = 1,
    Open = 2,
    Bid = 3,
    Reveal = 4,
    Redeem = 5,
    Register = 6,
    Update = 7,
    Renew = 8,
    Transfer = 9,
    Finalize = 10,
    Revoke = 11,
}

impl CovenantType {
    pub const ALL: [CovenantType; 12] = [
        CovenantType::None,
        CovenantType::Claim,
        CovenantType::Open,
        CovenantType::Bid,
        CovenantType::Reveal,
        CovenantType::Redeem,
        CovenantType::Register,
        CovenantType::Update,
        CovenantType::Renew,
        CovenantType::Transfer,
        CovenantType::Finalize,
        CovenantType::Revoke,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CovenantType::None => "NONE",
            CovenantType::Claim => "CLAIM",
            CovenantType::Open => "OPEN",
            CovenantType::Bid => "BID",
            CovenantType::Reveal => "REVEAL",
            CovenantType::Redeem => "REDEEM",
            CovenantType::Register => "REGISTER",
            CovenantType::Update => "UPDATE",
            CovenantType::Renew => "RENEW",
            CovenantType::Transfer => "TRANSFER",
            CovenantType::Finalize => "FINALIZE",
            CovenantType::Revoke => "REVOKE",
        }
    }

    /// Coins locked into a name's lifecycle and unusable as plain funds.
    /// OPEN carries no value and a REDEEM output is a refunded bid, so both
    /// spend like NONE.
    pub fn is_nonspendable(&self) -> bool {
        !matches!(self, CovenantType::None | CovenantType::Open | CovenantType::Redeem)
    }
}

impl TryFrom<u8> for CovenantType {
    type Error = CovenantError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::ALL.get(value as usize).copied().ok_or(CovenantError::UnknownType(value))
    }
}

impl FromStr for CovenantType {
    type Err = CovenantError;

    fn from_str(action: &str) -> Result<Self, Self::Err> {
        let upper = action.to_ascii_uppercase();
        Self::ALL.iter().copied().find(|t| t.as_str() == upper).ok_or_else(|| CovenantError::UnknownAction(action.to_string()))
    }
}

impl Display for CovenantType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A covenant: a type plus an ordered list of opaque items. Items are written
/// with the exact widths they are pushed with.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Covenant {
    pub covenant_type: CovenantType,
    pub items: Vec<Vec<u8>>,
}

impl Default for Covenant {
    fn default() -> Self {
        Self::new(CovenantType::None)
    }
}

impl Covenant {
    pub fn new(covenant_type: CovenantType) -> Self {
        Self { covenant_type, items: vec![] }
    }

    pub fn with_items(covenant_type: CovenantType, items: Vec<Vec<u8>>) -> Self {
        Self { covenant_type, items }
    }

    pub fn push(&mut self, item: &[u8]) -> &mut Self {
        self.items.push(item.to_vec());
        self
    }

    pub fn push_u8(&mut self, value: u8) -> &mut Self {
        self.items.push(vec![value]);
        self
    }

    pub fn push_u32(&mut self, value: u32) -> &mut Self {
        self.items.push(value.to_le_bytes().to_vec());
        self
    }

    pub fn push_hash(&mut self, hash: &Hash) -> &mut Self {
        self.items.push(hash.as_bytes().to_vec());
        self
    }

    pub fn is_none(&self) -> bool {
        self.covenant_type == CovenantType::None
    }

    pub fn is_nonspendable(&self) -> bool {
        self.covenant_type.is_nonspendable()
    }

    pub fn item(&self, index: usize) -> Result<&[u8], CovenantError> {
        self.items.get(index).map(Vec::as_slice).ok_or(CovenantError::MissingItem(index))
    }

    fn sized_item(&self, index: usize, expected: usize) -> Result<&[u8], CovenantError> {
        let item = self.item(index)?;
        if item.len() != expected {
            return Err(CovenantError::InvalidItemLength { index, expected, actual: item.len() });
        }
        Ok(item)
    }

    pub fn get_u8(&self, index: usize) -> Result<u8, CovenantError> {
        Ok(self.sized_item(index, 1)?[0])
    }

    pub fn get_u32(&self, index: usize) -> Result<u32, CovenantError> {
        let item = self.sized_item(index, 4)?;
        Ok(u32::from_le_bytes([item[0], item[1], item[2], item[3]]))
    }

    pub fn get_hash(&self, index: usize) -> Result<Hash, CovenantError> {
        Ok(Hash::from_slice(self.sized_item(index, HASH_SIZE)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_covenant_type_codes() {
        for (code, t) in CovenantType::ALL.iter().enumerate() {
            assert_eq!(*t as u8, code as u8);
            assert_eq!(CovenantType::try_from(code as u8).unwrap(), *t);
            assert_eq!(t.as_str().parse::<CovenantType>().unwrap(), *t);
        }
        assert_eq!(CovenantType::try_from(12), Err(CovenantError::UnknownType(12)));
        assert_eq!("renew".parse::<CovenantType>().unwrap(), CovenantType::Renew);
        assert_eq!(serde_json::to_string(&CovenantType::Finalize).unwrap(), "\"FINALIZE\"");
    }

    #[test]
    fn test_spendable_covenants() {
        let spendable = [CovenantType::None, CovenantType::Open, CovenantType::Redeem];
        for t in CovenantType::ALL {
            assert_eq!(t.is_nonspendable(), !spendable.contains(&t), "{t}");
        }
    }

    #[test]
    fn test_items() {
        let mut covenant = Covenant::new(CovenantType::Finalize);
        covenant.push(b"name").push_u8(1).push_u32(0x01020304).push_hash(&Hash::from_bytes([7; 32]));
        assert_eq!(covenant.items[2], vec![0x04, 0x03, 0x02, 0x01]);
        assert_eq!(covenant.get_u8(1).unwrap(), 1);
        assert_eq!(covenant.get_u32(2).unwrap(), 0x01020304);
        assert_eq!(covenant.get_hash(3).unwrap(), Hash::from_bytes([7; 32]));
        assert_eq!(covenant.get_u8(0), Err(CovenantError::InvalidItemLength { index: 0, expected: 1, actual: 4 }));
        assert_eq!(covenant.item(4), Err(CovenantError::MissingItem(4)));
    }
}
