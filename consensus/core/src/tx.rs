use crate::covenant::Covenant;
use hns_addresses::Address;
use hns_hashes::{Hash, ZERO_HASH};
use std::fmt::{Display, Formatter};

/// Represents the ID of a Handshake transaction
pub type TransactionId = Hash;

/// Default input sequence (final).
pub const MAX_TX_IN_SEQUENCE_NUM: u32 = u32::MAX;

/// Represents a Handshake transaction outpoint
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TransactionOutpoint {
    pub transaction_id: TransactionId,
    pub index: u32,
}

impl TransactionOutpoint {
    pub const fn new(transaction_id: TransactionId, index: u32) -> Self {
        Self { transaction_id, index }
    }

    pub const fn null() -> Self {
        Self { transaction_id: ZERO_HASH, index: u32::MAX }
    }

    /// The node reports a missing owner as the null outpoint.
    pub fn is_null(&self) -> bool {
        self.transaction_id.is_zero() && self.index == u32::MAX
    }
}

impl Display for TransactionOutpoint {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.transaction_id, self.index)
    }
}

/// Witness stack of an input.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Witness {
    pub items: Vec<Vec<u8>>,
}

impl Witness {
    pub fn new(items: Vec<Vec<u8>>) -> Self {
        Self { items }
    }

    pub fn push(&mut self, item: Vec<u8>) {
        self.items.push(item);
    }

    pub fn get(&self, index: usize) -> Option<&[u8]> {
        self.items.get(index).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Represents a Handshake transaction input
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransactionInput {
    pub previous_outpoint: TransactionOutpoint,
    pub sequence: u32,
    pub witness: Witness,
}

impl TransactionInput {
    pub fn new(previous_outpoint: TransactionOutpoint) -> Self {
        Self { previous_outpoint, sequence: MAX_TX_IN_SEQUENCE_NUM, witness: Witness::default() }
    }
}

/// Represents a Handshake transaction output
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransactionOutput {
    pub value: u64,
    pub address: Address,
    pub covenant: Covenant,
}

impl TransactionOutput {
    pub fn new(value: u64, address: Address, covenant: Covenant) -> Self {
        Self { value, address, covenant }
    }
}

/// Represents a Handshake transaction
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transaction {
    pub version: u32,
    pub inputs: Vec<TransactionInput>,
    pub outputs: Vec<TransactionOutput>,
    pub lock_time: u32,
}

impl Default for Transaction {
    fn default() -> Self {
        Self { version: 0, inputs: vec![], outputs: vec![], lock_time: 0 }
    }
}

impl Transaction {
    pub fn new(version: u32, inputs: Vec<TransactionInput>, outputs: Vec<TransactionOutput>, lock_time: u32) -> Self {
        Self { version, inputs, outputs, lock_time }
    }

    /// Transaction id: BLAKE2b-256 of the encoding without witnesses.
    pub fn id(&self) -> TransactionId {
        crate::wire::transaction_id(self)
    }

    pub fn output_value(&self) -> u64 {
        self.outputs.iter().map(|o| o.value).sum()
    }
}

/// An unspent output together with the metadata the node keeps for it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Coin {
    pub outpoint: TransactionOutpoint,
    pub version: u32,
    /// `None` while the creating transaction is unconfirmed.
    pub height: Option<u32>,
    pub value: u64,
    pub address: Address,
    pub covenant: Covenant,
    pub coinbase: bool,
}

impl Coin {
    pub fn to_output(&self) -> TransactionOutput {
        TransactionOutput::new(self.value, self.address.clone(), self.covenant.clone())
    }
}

/// A transaction under construction, together with the coins its inputs spend
/// (`coins[i]` is spent by `tx.inputs[i]`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MutableTransaction {
    pub tx: Transaction,
    pub coins: Vec<Coin>,
}

impl Default for MutableTransaction {
    fn default() -> Self {
        Self::new()
    }
}

impl MutableTransaction {
    pub fn new() -> Self {
        Self { tx: Transaction::default(), coins: vec![] }
    }

    /// Adds an input spending `coin` and returns its index.
    pub fn add_coin(&mut self, coin: Coin) -> usize {
        self.tx.inputs.push(TransactionInput::new(coin.outpoint));
        self.coins.push(coin);
        self.tx.inputs.len() - 1
    }

    pub fn add_output(&mut self, output: TransactionOutput) -> usize {
        self.tx.outputs.push(output);
        self.tx.outputs.len() - 1
    }

    pub fn input_value(&self) -> u64 {
        self.coins.iter().map(|c| c.value).sum()
    }

    pub fn output_value(&self) -> u64 {
        self.tx.output_value()
    }

    /// Implied fee, `None` when outputs exceed inputs.
    pub fn fee(&self) -> Option<u64> {
        self.input_value().checked_sub(self.output_value())
    }

    pub fn id(&self) -> TransactionId {
        self.tx.id()
    }
}
