//! Conversions between RPC models and consensus types.

use crate::{
    model::{RpcCoin, RpcCovenant, RpcOutpoint, RpcSignInput, RpcTransaction, RpcTransactionInput, RpcTransactionOutput},
    RpcError, RpcResult,
};
use hns_consensus_core::{
    covenant::{Covenant, CovenantType},
    tx::{Coin, Transaction, TransactionInput, TransactionOutpoint, TransactionOutput, Witness},
    COIN,
};

/// Converts a whole-coin amount as reported by the wallet into subunits.
pub fn amount_to_subunits(amount: f64) -> RpcResult<u64> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(RpcError::InvalidAmount(amount));
    }
    let subunits = (amount * COIN as f64).round();
    if subunits > u64::MAX as f64 {
        return Err(RpcError::InvalidAmount(amount));
    }
    Ok(subunits as u64)
}

/// Converts subunits into the whole-coin amount the node expects.
pub fn subunits_to_amount(value: u64) -> f64 {
    value as f64 / COIN as f64
}

impl From<RpcOutpoint> for TransactionOutpoint {
    fn from(outpoint: RpcOutpoint) -> Self {
        TransactionOutpoint::new(outpoint.hash, outpoint.index)
    }
}

impl From<TransactionOutpoint> for RpcOutpoint {
    fn from(outpoint: TransactionOutpoint) -> Self {
        RpcOutpoint { hash: outpoint.transaction_id, index: outpoint.index }
    }
}

impl TryFrom<&RpcCovenant> for Covenant {
    type Error = RpcError;

    fn try_from(covenant: &RpcCovenant) -> RpcResult<Self> {
        let covenant_type = CovenantType::try_from(covenant.covenant_type)?;
        let items = covenant.items.iter().map(hex::decode).collect::<Result<Vec<_>, _>>()?;
        Ok(Covenant::with_items(covenant_type, items))
    }
}

impl From<&Covenant> for RpcCovenant {
    fn from(covenant: &Covenant) -> Self {
        RpcCovenant {
            covenant_type: covenant.covenant_type as u8,
            action: covenant.covenant_type.to_string(),
            items: covenant.items.iter().map(hex::encode).collect(),
        }
    }
}

impl TryFrom<RpcCoin> for Coin {
    type Error = RpcError;

    fn try_from(coin: RpcCoin) -> RpcResult<Self> {
        Ok(Coin {
            outpoint: TransactionOutpoint::new(coin.hash, coin.index),
            version: coin.version,
            height: u32::try_from(coin.height).ok(),
            value: coin.value,
            covenant: Covenant::try_from(&coin.covenant)?,
            address: coin.address,
            coinbase: coin.coinbase,
        })
    }
}

impl From<&Coin> for RpcCoin {
    fn from(coin: &Coin) -> Self {
        RpcCoin {
            version: coin.version,
            height: coin.height.map(i64::from).unwrap_or(-1),
            value: coin.value,
            address: coin.address.clone(),
            covenant: RpcCovenant::from(&coin.covenant),
            coinbase: coin.coinbase,
            hash: coin.outpoint.transaction_id,
            index: coin.outpoint.index,
        }
    }
}

impl From<&Coin> for RpcSignInput {
    fn from(coin: &Coin) -> Self {
        RpcSignInput {
            txid: coin.outpoint.transaction_id,
            vout: coin.outpoint.index,
            address: coin.address.clone(),
            amount: subunits_to_amount(coin.value),
        }
    }
}

impl TryFrom<&RpcTransactionInput> for TransactionInput {
    type Error = RpcError;

    fn try_from(input: &RpcTransactionInput) -> RpcResult<Self> {
        let items = input.witness.iter().map(hex::decode).collect::<Result<Vec<_>, _>>()?;
        Ok(TransactionInput { previous_outpoint: input.prevout.into(), sequence: input.sequence, witness: Witness::new(items) })
    }
}

impl TryFrom<&RpcTransactionOutput> for TransactionOutput {
    type Error = RpcError;

    fn try_from(output: &RpcTransactionOutput) -> RpcResult<Self> {
        Ok(TransactionOutput::new(output.value, output.address.clone(), Covenant::try_from(&output.covenant)?))
    }
}

impl TryFrom<&RpcTransaction> for Transaction {
    type Error = RpcError;

    fn try_from(tx: &RpcTransaction) -> RpcResult<Self> {
        Ok(Transaction::new(
            tx.version,
            tx.inputs.iter().map(TransactionInput::try_from).collect::<RpcResult<Vec<_>>>()?,
            tx.outputs.iter().map(TransactionOutput::try_from).collect::<RpcResult<Vec<_>>>()?,
            tx.locktime,
        ))
    }
}
