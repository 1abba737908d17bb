//! Relay policy: minimum fees and dust.

use crate::{tx::TransactionOutput, wire::WITNESS_SCALE_FACTOR};

/// Estimated size of the input that will later spend an output: outpoint (36),
/// sequence (4), witness count (1) and a typical signature and pubkey
/// witness (107) scaled down to virtual bytes.
pub const SPEND_INPUT_SIZE: u64 = 32 + 4 + 1 + 107 / WITNESS_SCALE_FACTOR + 4;

/// Minimum fee for `size` virtual bytes at `rate` subunits per kilobyte.
/// Non-empty transactions at a non-zero rate pay at least `rate`.
pub fn get_min_fee(size: u64, rate: u64) -> u64 {
    if size == 0 {
        return 0;
    }
    let fee = rate * size / 1000;
    if fee == 0 && rate > 0 {
        return rate;
    }
    fee
}

/// Fee for a transaction of `vsize` virtual bytes at `rate` subunits per
/// kilobyte, truncated toward zero.
pub fn fee_for_vsize(rate: u64, vsize: u64) -> u64 {
    rate * vsize / 1000
}

/// Smallest value an output must carry to be worth spending: three times the
/// minimum fee of the output plus the input that spends it.
pub fn dust_threshold(output: &TransactionOutput, min_relay: u64) -> u64 {
    let size = output.size() as u64 + SPEND_INPUT_SIZE;
    3 * get_min_fee(size, min_relay)
}

pub fn is_dust(output: &TransactionOutput, min_relay: u64) -> bool {
    output.value < dust_threshold(output, min_relay)
}
