//!
//! Utilities and helpers for unit testing.
//!

mod rpc_core_mock;
pub use rpc_core_mock::*;

use crate::imports::*;
use hns_txscript::{encode_script, opcodes::codes::*, Opcode};

pub const PREFIX: Prefix = Prefix::Regtest;

/// Height recorded in the covenants of mock name coins.
pub const NAME_HEIGHT: u32 = 100;

pub fn anyone_can_renew_address() -> Address {
    hns_txscript::standard::anyone_can_renew_address(PREFIX)
}

pub fn owner_address(byte: u8) -> Address {
    Address::from_pubkey_hash(PREFIX, &[byte; 20])
}

/// HIP-1 transfer script committing to `pubkey`.
pub fn hip1_script(pubkey: &[u8]) -> Vec<u8> {
    let mut ops = vec![Opcode::from_op(OpType), Opcode::from_int(9), Opcode::from_op(OpEqual), Opcode::from_op(OpIf)];
    ops.push(Opcode::from_push(pubkey));
    ops.extend([OpCheckSig, OpElse, OpType].map(Opcode::from_op));
    ops.extend([Opcode::from_int(10), Opcode::from_op(OpEqual), Opcode::from_op(OpEndIf)]);
    encode_script(&ops)
}

/// Deterministic block hash of the mock chain.
pub fn block_hash(height: u32) -> Hash {
    let mut bytes = [0xbb; 32];
    bytes[..4].copy_from_slice(&height.to_le_bytes());
    Hash::from_bytes(bytes)
}

/// A covenant of `covenant_type` for `name`. TRANSFER covenants commit to
/// `owner_address(0x44)` as the recipient.
pub fn name_covenant(name: &Name, covenant_type: CovenantType) -> Covenant {
    let mut covenant = Covenant::new(covenant_type);
    covenant.push_hash(&name.hash()).push_u32(NAME_HEIGHT);
    match covenant_type {
        CovenantType::Transfer => covenant.push_u8(0).push(&[0x44; 20]),
        _ => covenant.push(&[]),
    };
    covenant
}

pub fn coin_with_covenant(covenant: Covenant) -> Coin {
    Coin {
        outpoint: TransactionOutpoint::new(Hash::from_bytes([0x11; 32]), 0),
        version: 0,
        height: Some(NAME_HEIGHT),
        value: 1_000_000,
        address: anyone_can_renew_address(),
        covenant,
        coinbase: false,
    }
}

pub fn name_state(name: &Name, owner: TransactionOutpoint) -> RpcNameState {
    RpcNameState {
        name: name.to_string(),
        name_hash: name.hash(),
        state: "CLOSED".to_string(),
        height: NAME_HEIGHT,
        renewal: NAME_HEIGHT,
        owner: Some(owner.into()),
        value: 1_000_000,
        highest: 1_000_000,
        transfer: 0,
        revoked: 0,
        claimed: 0,
        renewals: 0,
        registered: true,
        expired: false,
        weak: false,
    }
}
