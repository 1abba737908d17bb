//!
//! Chain lookups shared by the builders: the coin currently holding a name and
//! the block hash anchoring renewal-type covenants.
//!

use crate::imports::*;

/// A name's current coin together with the node's record of the name.
#[derive(Clone, Debug)]
pub struct NameCoin {
    pub coin: Coin,
    pub state: RpcNameState,
}

/// Returns the unspent output currently holding `name`, or `None` when the
/// name has no owner or the node no longer knows the owner coin.
pub async fn resolve_name_coin(rpc: &Rpc, name: &Name) -> Result<Option<NameCoin>> {
    let info = rpc.node.get_name_info(name.as_str()).await.call(RpcApiOps::GetNameInfo)?;
    let Some(state) = info.info else {
        debug!("name {} has no record", name);
        return Ok(None);
    };
    let Some(outpoint) = state.owner_outpoint() else {
        debug!("name {} has no owner", name);
        return Ok(None);
    };

    let Some(coin) = rpc.node.get_coin(outpoint).await.call(RpcApiOps::GetCoin)? else {
        debug!("owner coin {} of {} not found", outpoint, name);
        return Ok(None);
    };
    let coin = Coin::try_from(coin).call(RpcApiOps::GetCoin)?;
    trace!("name {} is held by {} ({} {})", name, coin.outpoint, coin.covenant.covenant_type, coin.value);
    Ok(Some(NameCoin { coin, state }))
}

/// Hash of the block `2 * renewal_maturity` below the tip.
pub async fn resolve_renewal_block(rpc: &Rpc, params: &Params) -> Result<Hash> {
    let info = rpc.node.get_info().await.call(RpcApiOps::GetInfo)?;
    let height = params.renewal_height(info.chain.height);
    let hash = rpc.node.get_block_hash(height).await.call(RpcApiOps::GetBlockHash)?;
    debug!("renewal block at height {} (tip {}): {}", height, info.chain.height, hash);
    Ok(hash)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::*;

    #[tokio::test]
    async fn test_resolve_name_coin() {
        let mock = RpcCoreMock::new();
        let name = Name::new("example").unwrap();
        assert!(resolve_name_coin(&mock.rpc(), &name).await.unwrap().is_none());

        let coin = mock.add_name(&name, anyone_can_renew_address(), 1_000_000, CovenantType::Register);
        let resolved = resolve_name_coin(&mock.rpc(), &name).await.unwrap().unwrap();
        assert_eq!(resolved.coin, coin);
        assert_eq!(resolved.state.name, "example");

        mock.remove_coin(&coin.outpoint);
        assert!(resolve_name_coin(&mock.rpc(), &name).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_resolve_null_owner() {
        let mock = RpcCoreMock::new();
        let name = Name::new("example").unwrap();
        mock.add_name(&name, anyone_can_renew_address(), 1_000_000, CovenantType::Register);
        mock.set_owner(&name, None);
        assert!(resolve_name_coin(&mock.rpc(), &name).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_rpc_failure_names_call() {
        let mock = RpcCoreMock::new();
        mock.fail_on(RpcApiOps::GetNameInfo);
        let err = resolve_name_coin(&mock.rpc(), &Name::new("example").unwrap()).await.unwrap_err();
        assert!(matches!(err, Error::RpcFailure { call: RpcApiOps::GetNameInfo, .. }));
    }

    #[tokio::test]
    async fn test_resolve_renewal_block() {
        let mock = RpcCoreMock::new();
        let params = Params::of(hns_consensus_core::NetworkType::Regtest);
        mock.set_height(300);
        assert_eq!(resolve_renewal_block(&mock.rpc(), params).await.unwrap(), block_hash(200));

        // short chains anchor at genesis
        mock.set_height(60);
        assert_eq!(resolve_renewal_block(&mock.rpc(), params).await.unwrap(), block_hash(0));
    }
}
