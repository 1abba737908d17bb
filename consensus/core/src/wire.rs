//! Handshake transaction serialization.
//!
//! ```text
//! version      u32 LE
//! inputs       varint count, then per input: prev hash (32), prev index u32 LE, sequence u32 LE
//! outputs      varint count, then per output: value u64 LE,
//!              address (version u8, hash length u8, hash),
//!              covenant (type u8, varint item count, varbytes items)
//! lock time    u32 LE
//! witnesses    per input: varint item count, varbytes items
//! ```
//!
//! Everything before the witnesses is the base encoding. The txid hashes the
//! base encoding only, and weight counts base bytes four times.

use crate::{
    covenant::{Covenant, CovenantError, CovenantType},
    tx::{Transaction, TransactionId, TransactionInput, TransactionOutpoint, TransactionOutput, Witness},
};
use hns_addresses::{Address, AddressError, Prefix};
use hns_hashes::{blake2b_256, Hash, HASH_SIZE};
use thiserror::Error;

/// Weight multiplier of base (non-witness) bytes.
pub const WITNESS_SCALE_FACTOR: u64 = 4;

#[derive(Error, PartialEq, Debug, Clone)]
pub enum WireError {
    #[error("unexpected end of data: needed {needed} bytes, {remaining} remaining")]
    UnexpectedEof { needed: usize, remaining: usize },

    #[error("non-canonical varint")]
    NonCanonicalVarint,

    #[error("length {0} exceeds the remaining data")]
    LengthTooLarge(u64),

    #[error("{0} trailing bytes after transaction")]
    TrailingBytes(usize),

    #[error(transparent)]
    Address(#[from] AddressError),

    #[error(transparent)]
    Covenant(#[from] CovenantError),

    #[error(transparent)]
    Hex(#[from] hex::FromHexError),
}

pub type WireResult<T> = std::result::Result<T, WireError>;

pub fn varint_size(n: u64) -> usize {
    match n {
        0x00..=0xfc => 1,
        0xfd..=0xffff => 3,
        0x1_0000..=0xffff_ffff => 5,
        _ => 9,
    }
}

pub fn write_varint(out: &mut Vec<u8>, n: u64) {
    match n {
        0x00..=0xfc => out.push(n as u8),
        0xfd..=0xffff => {
            out.push(0xfd);
            out.extend_from_slice(&(n as u16).to_le_bytes());
        }
        0x1_0000..=0xffff_ffff => {
            out.push(0xfe);
            out.extend_from_slice(&(n as u32).to_le_bytes());
        }
        _ => {
            out.push(0xff);
            out.extend_from_slice(&n.to_le_bytes());
        }
    }
}

pub fn varbytes_size(data: &[u8]) -> usize {
    varint_size(data.len() as u64) + data.len()
}

pub fn write_varbytes(out: &mut Vec<u8>, data: &[u8]) {
    write_varint(out, data.len() as u64);
    out.extend_from_slice(data);
}

/// Bounds-checked cursor over serialized data.
pub struct Reader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.pos
    }

    pub fn read_exact(&mut self, len: usize) -> WireResult<&'a [u8]> {
        if self.remaining() < len {
            return Err(WireError::UnexpectedEof { needed: len, remaining: self.remaining() });
        }
        let start = self.pos;
        self.pos += len;
        Ok(&self.bytes[start..start + len])
    }

    fn read_array<const N: usize>(&mut self) -> WireResult<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_exact(N)?);
        Ok(out)
    }

    pub fn read_u8(&mut self) -> WireResult<u8> {
        Ok(self.read_exact(1)?[0])
    }

    pub fn read_u16(&mut self) -> WireResult<u16> {
        Ok(u16::from_le_bytes(self.read_array()?))
    }

    pub fn read_u32(&mut self) -> WireResult<u32> {
        Ok(u32::from_le_bytes(self.read_array()?))
    }

    pub fn read_u64(&mut self) -> WireResult<u64> {
        Ok(u64::from_le_bytes(self.read_array()?))
    }

    pub fn read_hash(&mut self) -> WireResult<Hash> {
        Ok(Hash::from_bytes(self.read_array::<HASH_SIZE>()?))
    }

    pub fn read_varint(&mut self) -> WireResult<u64> {
        let (value, canonical) = match self.read_u8()? {
            tag @ 0x00..=0xfc => (tag as u64, true),
            0xfd => {
                let v = self.read_u16()? as u64;
                (v, v >= 0xfd)
            }
            0xfe => {
                let v = self.read_u32()? as u64;
                (v, v > 0xffff)
            }
            0xff => {
                let v = self.read_u64()?;
                (v, v > 0xffff_ffff)
            }
        };
        if !canonical {
            return Err(WireError::NonCanonicalVarint);
        }
        Ok(value)
    }

    /// Reads a varint count, bounded by the remaining data so a corrupt
    /// length cannot trigger a huge allocation.
    pub fn read_count(&mut self) -> WireResult<usize> {
        let count = self.read_varint()?;
        if count > self.remaining() as u64 {
            return Err(WireError::LengthTooLarge(count));
        }
        Ok(count as usize)
    }

    pub fn read_varbytes(&mut self) -> WireResult<&'a [u8]> {
        let len = self.read_count()?;
        self.read_exact(len)
    }
}

pub fn address_size(address: &Address) -> usize {
    2 + address.hash.len()
}

pub fn covenant_size(covenant: &Covenant) -> usize {
    1 + varint_size(covenant.items.len() as u64) + covenant.items.iter().map(|item| varbytes_size(item)).sum::<usize>()
}

pub fn output_size(output: &TransactionOutput) -> usize {
    8 + address_size(&output.address) + covenant_size(&output.covenant)
}

pub const INPUT_SIZE: usize = HASH_SIZE + 4 + 4;

pub fn witness_size(witness: &Witness) -> usize {
    varint_size(witness.items.len() as u64) + witness.items.iter().map(|item| varbytes_size(item)).sum::<usize>()
}

/// Size of the base (non-witness) encoding.
pub fn base_size(tx: &Transaction) -> usize {
    4 + varint_size(tx.inputs.len() as u64)
        + tx.inputs.len() * INPUT_SIZE
        + varint_size(tx.outputs.len() as u64)
        + tx.outputs.iter().map(output_size).sum::<usize>()
        + 4
}

/// Size of all witness data.
pub fn witnesses_size(tx: &Transaction) -> usize {
    tx.inputs.iter().map(|input| witness_size(&input.witness)).sum()
}

pub fn transaction_size(tx: &Transaction) -> usize {
    base_size(tx) + witnesses_size(tx)
}

pub fn transaction_weight(tx: &Transaction) -> u64 {
    base_size(tx) as u64 * WITNESS_SCALE_FACTOR + witnesses_size(tx) as u64
}

/// Virtual size of `weight` weight units, rounded up.
pub fn weight_to_vsize(weight: u64) -> u64 {
    weight.div_ceil(WITNESS_SCALE_FACTOR)
}

pub fn transaction_vsize(tx: &Transaction) -> u64 {
    weight_to_vsize(transaction_weight(tx))
}

fn write_output(out: &mut Vec<u8>, output: &TransactionOutput) {
    out.extend_from_slice(&output.value.to_le_bytes());
    out.push(output.address.version);
    out.push(output.address.hash.len() as u8);
    out.extend_from_slice(&output.address.hash);
    out.push(output.covenant.covenant_type as u8);
    write_varint(out, output.covenant.items.len() as u64);
    output.covenant.items.iter().for_each(|item| write_varbytes(out, item));
}

fn write_base(out: &mut Vec<u8>, tx: &Transaction) {
    out.extend_from_slice(&tx.version.to_le_bytes());
    write_varint(out, tx.inputs.len() as u64);
    for input in tx.inputs.iter() {
        out.extend_from_slice(input.previous_outpoint.transaction_id.as_ref());
        out.extend_from_slice(&input.previous_outpoint.index.to_le_bytes());
        out.extend_from_slice(&input.sequence.to_le_bytes());
    }
    write_varint(out, tx.outputs.len() as u64);
    tx.outputs.iter().for_each(|output| write_output(out, output));
    out.extend_from_slice(&tx.lock_time.to_le_bytes());
}

pub fn encode_base(tx: &Transaction) -> Vec<u8> {
    let mut out = Vec::with_capacity(base_size(tx));
    write_base(&mut out, tx);
    out
}

/// Full encoding including witnesses.
pub fn encode_transaction(tx: &Transaction) -> Vec<u8> {
    let mut out = Vec::with_capacity(transaction_size(tx));
    write_base(&mut out, tx);
    for input in tx.inputs.iter() {
        write_varint(&mut out, input.witness.items.len() as u64);
        input.witness.items.iter().for_each(|item| write_varbytes(&mut out, item));
    }
    out
}

pub fn transaction_id(tx: &Transaction) -> TransactionId {
    blake2b_256(&encode_base(tx))
}

fn read_output(reader: &mut Reader<'_>, prefix: Prefix) -> WireResult<TransactionOutput> {
    let value = reader.read_u64()?;
    let version = reader.read_u8()?;
    let hash_len = reader.read_u8()? as usize;
    let address = Address::new(prefix, version, reader.read_exact(hash_len)?)?;
    let covenant_type = CovenantType::try_from(reader.read_u8()?)?;
    let count = reader.read_count()?;
    let items = (0..count).map(|_| reader.read_varbytes().map(<[u8]>::to_vec)).collect::<WireResult<Vec<_>>>()?;
    Ok(TransactionOutput::new(value, address, Covenant::with_items(covenant_type, items)))
}

/// Decodes a full transaction. Addresses carry no network, so the caller
/// supplies the prefix they are rendered with.
pub fn decode_transaction(bytes: &[u8], prefix: Prefix) -> WireResult<Transaction> {
    let mut reader = Reader::new(bytes);
    let version = reader.read_u32()?;

    let input_count = reader.read_count()?;
    let mut inputs = Vec::with_capacity(input_count);
    for _ in 0..input_count {
        let transaction_id = reader.read_hash()?;
        let index = reader.read_u32()?;
        let sequence = reader.read_u32()?;
        let previous_outpoint = TransactionOutpoint::new(transaction_id, index);
        inputs.push(TransactionInput { previous_outpoint, sequence, witness: Witness::default() });
    }

    let output_count = reader.read_count()?;
    let outputs = (0..output_count).map(|_| read_output(&mut reader, prefix)).collect::<WireResult<Vec<_>>>()?;
    let lock_time = reader.read_u32()?;

    for input in inputs.iter_mut() {
        let count = reader.read_count()?;
        let items = (0..count).map(|_| reader.read_varbytes().map(<[u8]>::to_vec)).collect::<WireResult<Vec<_>>>()?;
        input.witness = Witness::new(items);
    }

    if reader.remaining() > 0 {
        return Err(WireError::TrailingBytes(reader.remaining()));
    }
    Ok(Transaction { version, inputs, outputs, lock_time })
}

pub fn decode_transaction_hex(hex_str: &str, prefix: Prefix) -> WireResult<Transaction> {
    decode_transaction(&hex::decode(hex_str)?, prefix)
}

impl Transaction {
    pub fn to_hex(&self) -> String {
        hex::encode(encode_transaction(self))
    }

    pub fn weight(&self) -> u64 {
        transaction_weight(self)
    }

    pub fn vsize(&self) -> u64 {
        transaction_vsize(self)
    }
}

impl TransactionOutput {
    pub fn size(&self) -> usize {
        output_size(self)
    }
}
