use crate::Hash;
use sha3::Digest;

/// Incremental hashing with a fixed 32-byte output.
pub trait Hasher: Default {
    fn update<A: AsRef<[u8]>>(&mut self, data: A) -> &mut Self;
    fn finalize(self) -> Hash;

    fn hash<A: AsRef<[u8]>>(data: A) -> Hash {
        let mut hasher = Self::default();
        hasher.update(data);
        hasher.finalize()
    }
}

/// SHA3-256, used for name hashes and witness script hashes.
#[derive(Clone, Default)]
pub struct Sha3_256(sha3::Sha3_256);

impl Hasher for Sha3_256 {
    fn update<A: AsRef<[u8]>>(&mut self, data: A) -> &mut Self {
        self.0.update(data.as_ref());
        self
    }

    fn finalize(self) -> Hash {
        Hash::from_slice(self.0.finalize().as_slice())
    }
}

/// BLAKE2b with a 32-byte digest, used for transaction ids.
#[derive(Clone)]
pub struct Blake2b256(blake2b_simd::State);

impl Default for Blake2b256 {
    fn default() -> Self {
        Self(blake2b_simd::Params::new().hash_length(32).to_state())
    }
}

impl Hasher for Blake2b256 {
    fn update<A: AsRef<[u8]>>(&mut self, data: A) -> &mut Self {
        self.0.update(data.as_ref());
        self
    }

    fn finalize(self) -> Hash {
        Hash::from_slice(self.0.finalize().as_bytes())
    }
}

pub fn sha3_256(data: &[u8]) -> Hash {
    Sha3_256::hash(data)
}

pub fn blake2b_256(data: &[u8]) -> Hash {
    Blake2b256::hash(data)
}
