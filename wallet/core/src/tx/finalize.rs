use crate::imports::*;
use crate::resolver::{resolve_name_coin, resolve_renewal_block, NameCoin};
use hns_consensus_core::tx::TransactionInput;
use hns_txscript::{
    disassemble,
    standard::{hip1_template, HIP1_PUBKEY_POSITION},
};

/// Builds the unsigned skeleton finalizing a transfer out of a HIP-1 script
/// address. The finalize branch of the script needs no signature, so the
/// input's witness is the script itself.
pub struct FinalizeBuilder {
    rpc: Rpc,
    params: &'static Params,
    name: Name,
}

impl FinalizeBuilder {
    pub fn new(rpc: Rpc, params: &'static Params, name: Name) -> Self {
        Self { rpc, params, name }
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    pub async fn build(&self) -> Result<MutableTransaction> {
        let NameCoin { coin, state } =
            resolve_name_coin(&self.rpc, &self.name).await?.ok_or_else(|| Error::NameNotFound(self.name.to_string()))?;
        if coin.covenant.covenant_type != CovenantType::Transfer {
            warn!("coin {} of {} carries a {} covenant, expected TRANSFER", coin.outpoint, self.name, coin.covenant.covenant_type);
        }

        let script = self.transfer_script(&coin).await?;
        if let Err(err) = verify_transfer_script(&script) {
            warn!("transfer script of {} is not HIP-1: {}", self.name, disassemble(&script));
            return Err(err);
        }

        let anchor = resolve_renewal_block(&self.rpc, self.params).await?;
        let output = finalize_output(&coin, &self.name, &state, &anchor, self.params.prefix)?;

        let mut mtx = MutableTransaction::new();
        let index = mtx.add_coin(coin);
        mtx.tx.inputs[index].witness.push(script);
        mtx.add_output(output);
        info!("finalize of {} prepared, new owner {}", self.name, mtx.tx.outputs[0].address);
        Ok(mtx)
    }

    /// The witness script revealed by the TRANSFER: item 1 of the parent's
    /// input at the coin's output index.
    async fn transfer_script(&self, coin: &Coin) -> Result<Vec<u8>> {
        let parent_id = coin.outpoint.transaction_id;
        let parent = self
            .rpc
            .node
            .get_transaction(parent_id)
            .await
            .call(RpcApiOps::GetTransaction)?
            .ok_or(Error::NoParentTransaction(parent_id))?;

        let input = parent.inputs.get(coin.outpoint.index as usize).ok_or(Error::NoTransferInput(coin.outpoint))?;
        let input = TransactionInput::try_from(input).call(RpcApiOps::GetTransaction)?;
        input.witness.get(1).map(<[u8]>::to_vec).ok_or(Error::NoTransferInput(coin.outpoint))
    }
}

/// Checks `script` against the HIP-1 template; only the pubkey push may vary.
pub fn verify_transfer_script(script: &[u8]) -> Result<()> {
    let ops = hip1_template().verify_script(script).map_err(Error::NotHIP1Script)?;
    if let Some(owner) = ops.get(HIP1_PUBKEY_POSITION) {
        debug!("HIP-1 script with owner key {}", owner);
    }
    Ok(())
}

/// FINALIZE output for `coin`, paying the recipient committed by the TRANSFER
/// covenant (address version in item 2, hash in item 3). Items: name hash,
/// height, raw name, flags, claimed, renewals, anchor.
pub fn finalize_output(coin: &Coin, name: &Name, state: &RpcNameState, anchor: &Hash, prefix: Prefix) -> Result<TransactionOutput> {
    let address = Address::new(prefix, coin.covenant.get_u8(2)?, coin.covenant.item(3)?)?;

    let mut covenant = Covenant::new(CovenantType::Finalize);
    covenant
        .push(coin.covenant.item(0)?)
        .push(coin.covenant.item(1)?)
        .push(name.as_bytes())
        .push_u8(state.flags())
        .push_u32(state.claimed)
        .push_u32(state.renewals)
        .push_hash(anchor);
    Ok(TransactionOutput::new(coin.value, address, covenant))
}
