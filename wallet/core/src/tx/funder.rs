//!
//! Funding of name skeletons with a wallet coin.
//!
//! The funder picks the largest spendable wallet coin, adds it as a second
//! input with a change output carrying its full value, prices the result by
//! virtual size and lets the node sign both inputs.
//!

use crate::imports::*;
use hns_consensus_core::{
    policy::{fee_for_vsize, is_dust},
    wire::{decode_transaction_hex, weight_to_vsize},
};
use hns_rpc_core::{convert::amount_to_subunits, RpcError};
use itertools::Itertools;
use std::cmp::Ordering;

/// Witness weight the funding input gains once signed: signature length,
/// signature with sighash type, pubkey length, compressed pubkey. The item
/// count is already part of the unsigned weight.
pub const FUNDING_WITNESS_WEIGHT: u64 = 1 + 65 + 1 + 33;

/// Seconds the wallet stays unlocked for key export.
pub const UNLOCK_TIMEOUT: u64 = 10;

/// Orders wallet coins for selection: confirmed coins first, then by value, largest first.
pub fn compare_unspent(a: &RpcUnspent, b: &RpcUnspent) -> Ordering {
    (a.confirmations == 0).cmp(&(b.confirmations == 0)).then_with(|| b.amount.total_cmp(&a.amount))
}

pub struct Funder {
    rpc: Rpc,
    params: &'static Params,
    rate: u64,
}

impl Funder {
    /// `rate` is in subunits per kilobyte; `None` uses the network default.
    pub fn new(rpc: Rpc, params: &'static Params, rate: Option<u64>) -> Self {
        Self { rpc, params, rate: rate.unwrap_or(params.fee_rate) }
    }

    pub fn rate(&self) -> u64 {
        self.rate
    }

    /// Virtual size of `mtx` once its last input is signed.
    pub fn estimate_vsize(&self, mtx: &MutableTransaction) -> u64 {
        weight_to_vsize(mtx.tx.weight() + FUNDING_WITNESS_WEIGHT)
    }

    pub fn estimate_fee(&self, mtx: &MutableTransaction) -> u64 {
        fee_for_vsize(self.rate, self.estimate_vsize(mtx))
    }

    /// First coin, in [`compare_unspent`] order, that is not bound to a name and,
    /// for coinbase outputs, has matured.
    pub async fn select_coin(&self) -> Result<Coin> {
        let unspent = self.rpc.wallet.list_unspent().await.call(RpcApiOps::ListUnspent)?;
        trace!("wallet reports {} unspent coins", unspent.len());

        for entry in unspent.into_iter().sorted_by(compare_unspent) {
            let outpoint = TransactionOutpoint::new(entry.txid, entry.vout);
            let Some(coin) = self.rpc.node.get_coin(outpoint).await.call(RpcApiOps::GetCoin)? else {
                warn!("wallet coin {} is unknown to the node", outpoint);
                continue;
            };
            let coin = Coin::try_from(coin).call(RpcApiOps::GetCoin)?;
            if amount_to_subunits(entry.amount).ok() != Some(coin.value) {
                warn!("wallet reports {} HNS for {} but the node holds {}", entry.amount, outpoint, coin.value);
            }

            if coin.covenant.is_nonspendable() {
                trace!("skipping {} with {} covenant", outpoint, coin.covenant.covenant_type);
                continue;
            }
            if coin.coinbase && entry.confirmations <= self.params.coinbase_maturity {
                trace!("skipping immature coinbase {} ({} confirmations)", outpoint, entry.confirmations);
                continue;
            }

            debug!("selected {} worth {} with {} confirmations", outpoint, coin.value, entry.confirmations);
            return Ok(coin);
        }
        Err(Error::NoSpendableCoins)
    }

    /// Adds `coin` and a change output to `mtx` and deducts the fee from the
    /// change, dropping it when only dust remains. Returns the priced fee.
    /// On error `mtx` is left untouched.
    pub fn attach(&self, mtx: &mut MutableTransaction, coin: Coin, change: Address) -> Result<u64> {
        let mut draft = mtx.clone();
        let available = coin.value;
        draft.add_coin(coin);
        let index = draft.add_output(TransactionOutput::new(available, change, Covenant::default()));

        let fee = self.estimate_fee(&draft);
        if fee > available {
            return Err(Error::InsufficientFunds { available, required: fee });
        }
        draft.tx.outputs[index].value -= fee;

        if is_dust(&draft.tx.outputs[index], self.params.min_relay) {
            debug!("dropping dust change of {}", draft.tx.outputs[index].value);
            draft.tx.outputs.remove(index);
        }

        *mtx = draft;
        Ok(fee)
    }

    /// Funds and signs a single-input, single-output skeleton.
    pub async fn fund(&self, mtx: &mut MutableTransaction, passphrase: Option<&str>) -> Result<Transaction> {
        if mtx.tx.inputs.len() != 1 || mtx.tx.outputs.len() != 1 {
            return Err(Error::UnexpectedSkeleton { inputs: mtx.tx.inputs.len(), outputs: mtx.tx.outputs.len() });
        }

        let coin = self.select_coin().await?;
        let address = coin.address.clone();
        let change = self.rpc.wallet.get_raw_change_address().await.call(RpcApiOps::GetRawChangeAddress)?;
        let fee = self.attach(mtx, coin, change)?;
        info!("funded {} with fee {} at rate {}", mtx.id(), fee, self.rate);

        if let Some(passphrase) = passphrase {
            self.rpc.wallet.wallet_passphrase(passphrase, UNLOCK_TIMEOUT).await.call(RpcApiOps::WalletPassphrase)?;
        }
        let key = self.rpc.wallet.dump_priv_key(&address).await.call(RpcApiOps::DumpPrivKey)?;

        self.sign(mtx, vec![key]).await
    }

    /// Has the node sign `mtx`, passing the previous output of every input.
    pub async fn sign(&self, mtx: &MutableTransaction, keys: Vec<String>) -> Result<Transaction> {
        let inputs = mtx.coins.iter().map(RpcSignInput::from).collect();
        let signed =
            self.rpc.node.sign_raw_transaction(mtx.tx.to_hex(), inputs, keys).await.call(RpcApiOps::SignRawTransaction)?;
        if !signed.complete {
            warn!("node reports {} as not completely signed", mtx.id());
        }
        decode_transaction_hex(&signed.hex, self.params.prefix).map_err(RpcError::from).call(RpcApiOps::SignRawTransaction)
    }
}
