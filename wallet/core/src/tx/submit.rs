use crate::imports::*;

/// Broadcasts a signed transaction and returns the id reported by the node.
pub async fn broadcast(rpc: &Rpc, tx: &Transaction) -> Result<TransactionId> {
    let id = rpc.node.send_raw_transaction(tx.to_hex()).await.call(RpcApiOps::SendRawTransaction)?;
    if id != tx.id() {
        warn!("node accepted {} as {}", tx.id(), id);
    }
    info!("broadcast {}", id);
    Ok(id)
}

/// Tells whether the node's mempool holds `id`.
pub async fn in_mempool(rpc: &Rpc, id: &TransactionId) -> Result<bool> {
    let mempool = rpc.node.get_raw_mempool().await.call(RpcApiOps::GetRawMempool)?;
    Ok(mempool.contains(id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::*;
    use crate::tx::{Funder, RenewalBuilder};
    use hns_consensus_core::NetworkType;

    #[tokio::test]
    async fn test_broadcast_renewal() {
        let mock = RpcCoreMock::new();
        let params = Params::of(NetworkType::Regtest);
        let name = Name::new("example").unwrap();
        mock.add_name(&name, anyone_can_renew_address(), 1_000_000, CovenantType::Register);
        mock.add_wallet_coin(5_000_000, 10, false, CovenantType::None);

        let mut mtx = RenewalBuilder::new(mock.rpc(), params, name).build().await.unwrap();
        let tx = Funder::new(mock.rpc(), params, Some(1000)).fund(&mut mtx, None).await.unwrap();
        assert!(!in_mempool(&mock.rpc(), &tx.id()).await.unwrap());

        let id = broadcast(&mock.rpc(), &tx).await.unwrap();
        assert_eq!(id, tx.id());
        assert!(in_mempool(&mock.rpc(), &id).await.unwrap());
    }
}
