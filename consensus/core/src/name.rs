use crate::config::constants::MAX_NAME_SIZE;
use hns_hashes::{sha3_256, Hash};
use std::fmt::{Display, Formatter};
use thiserror::Error;

#[derive(Error, PartialEq, Eq, Debug, Clone)]
pub enum NameError {
    #[error("name is empty")]
    Empty,

    #[error("name is {0} bytes, the maximum is {MAX_NAME_SIZE}")]
    TooLong(usize),

    #[error("name contains invalid character {0:?}")]
    InvalidCharacter(char),

    #[error("name may not start or end with {0:?}")]
    InvalidBoundary(char),
}

/// A syntactically valid name: 1 to 63 bytes of `[a-z0-9-_]`, not starting or
/// ending with `-` or `_`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Name(String);

impl Name {
    pub fn new(name: &str) -> Result<Self, NameError> {
        if name.is_empty() {
            return Err(NameError::Empty);
        }
        if name.len() > MAX_NAME_SIZE {
            return Err(NameError::TooLong(name.len()));
        }
        if let Some(c) = name.chars().find(|c| !matches!(c, 'a'..='z' | '0'..='9' | '-' | '_')) {
            return Err(NameError::InvalidCharacter(c));
        }
        for c in [name.as_bytes()[0], name.as_bytes()[name.len() - 1]] {
            if c == b'-' || c == b'_' {
                return Err(NameError::InvalidBoundary(c as char));
            }
        }
        Ok(Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// SHA3-256 of the raw name, as committed in name covenants.
    pub fn hash(&self) -> Hash {
        sha3_256(self.as_bytes())
    }
}

impl Display for Name {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for Name {
    type Err = NameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}
