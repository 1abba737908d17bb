use crate::imports::*;
use crate::resolver::{resolve_name_coin, resolve_renewal_block, NameCoin};
use hns_txscript::standard::{is_anyone_can_renew_address, ANYONE_CAN_RENEW_SCRIPT};

/// Builds the unsigned skeleton renewing a name held by the anyone-can-renew
/// address. The input needs no signature: its witness is the script itself.
pub struct RenewalBuilder {
    rpc: Rpc,
    params: &'static Params,
    name: Name,
}

impl RenewalBuilder {
    pub fn new(rpc: Rpc, params: &'static Params, name: Name) -> Self {
        Self { rpc, params, name }
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    pub async fn build(&self) -> Result<MutableTransaction> {
        let NameCoin { coin, .. } =
            resolve_name_coin(&self.rpc, &self.name).await?.ok_or_else(|| Error::NameNotFound(self.name.to_string()))?;

        if !is_anyone_can_renew_address(&coin.address) {
            return Err(Error::WrongLockScript(coin.address));
        }

        let anchor = resolve_renewal_block(&self.rpc, self.params).await?;
        let output = renewal_output(&coin, &anchor)?;

        let mut mtx = MutableTransaction::new();
        let index = mtx.add_coin(coin);
        mtx.tx.inputs[index].witness.push(ANYONE_CAN_RENEW_SCRIPT.to_vec());
        mtx.add_output(output);
        info!("renewal of {} prepared, spending {}", self.name, mtx.tx.inputs[index].previous_outpoint);
        Ok(mtx)
    }
}

/// RENEW output for `coin`: same address and value, with the name hash and
/// height copied from the current covenant followed by the anchor.
pub fn renewal_output(coin: &Coin, anchor: &Hash) -> Result<TransactionOutput> {
    let mut covenant = Covenant::new(CovenantType::Renew);
    covenant.push(coin.covenant.item(0)?).push(coin.covenant.item(1)?).push_hash(anchor);
    Ok(TransactionOutput::new(coin.value, coin.address.clone(), covenant))
}
