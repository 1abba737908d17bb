use crate::{
    args::{Action, Args},
    error::{Error, Result},
};
use hns_consensus_core::{name::Name, tx::TransactionId, Params};
use hns_core::{info, warn};
use hns_http_client::{NodeHttpClient, WalletHttpClient};
use hns_rpc_core::api::ops::RpcApiOps;
use hns_wallet_core::{
    rpc::RpcCall,
    tx::{broadcast, in_mempool, FinalizeBuilder, Funder, RenewalBuilder},
    Error as WalletError, Rpc,
};
use std::sync::Arc;

/// Outcome of one run, printed by the binary.
#[derive(Debug, Clone)]
pub struct Report {
    pub hex: String,
    pub txid: TransactionId,
    pub fee: Option<u64>,
    /// Set when the transaction was broadcast: whether the mempool lists it.
    pub in_mempool: Option<bool>,
}

impl Report {
    /// Process exit code: 2 when a broadcast transaction is missing from the mempool.
    pub fn exit_code(&self) -> i32 {
        match self.in_mempool {
            Some(false) => 2,
            _ => 0,
        }
    }
}

pub struct Renewer {
    rpc: Rpc,
    params: &'static Params,
    args: Args,
}

impl Renewer {
    /// Connects the HTTP clients described by `args`.
    pub fn try_new(args: Args) -> Result<Self> {
        let node_url = args.node_url();
        let node = NodeHttpClient::new(&node_url, args.api_key.clone())
            .map_err(|source| Error::Client { endpoint: "node", url: node_url, source })?;
        let wallet_url = args.wallet_url();
        let wallet = WalletHttpClient::new(&wallet_url, args.api_key.clone())
            .map_err(|source| Error::Client { endpoint: "wallet", url: wallet_url, source })?;
        info!("using node {} and wallet {} on {}", node.url(), wallet.url(), args.network());
        Ok(Self::with_rpc(Rpc::new(Arc::new(node), Arc::new(wallet)), args))
    }

    pub fn with_rpc(rpc: Rpc, args: Args) -> Self {
        Self { rpc, params: args.params(), args }
    }

    pub async fn run(&self, action: &Action) -> Result<Report> {
        if let Some(wallet_id) = &self.args.wallet_id {
            self.rpc.wallet.select_wallet(wallet_id).await.call(RpcApiOps::SelectWallet)?;
        }

        let name = Name::new(action.name()).map_err(WalletError::from)?;
        let mut mtx = match action {
            Action::Renew(_) => RenewalBuilder::new(self.rpc.clone(), self.params, name).build().await?,
            Action::Finalize(_) => FinalizeBuilder::new(self.rpc.clone(), self.params, name).build().await?,
        };

        let funder = Funder::new(self.rpc.clone(), self.params, self.args.rate);
        let tx = funder.fund(&mut mtx, self.args.passphrase.as_deref()).await?;
        let mut report = Report { hex: tx.to_hex(), txid: tx.id(), fee: mtx.fee(), in_mempool: None };

        if self.args.broadcast {
            let id = broadcast(&self.rpc, &tx).await?;
            let listed = in_mempool(&self.rpc, &id).await?;
            if !listed {
                warn!("{} is not in the mempool", id);
            }
            report.txid = id;
            report.in_mempool = Some(listed);
        }
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hns_consensus_core::{covenant::CovenantType, wire::decode_transaction_hex};
    use hns_wallet_core::tests::{anyone_can_renew_address, hip1_script, owner_address, RpcCoreMock, PREFIX};

    fn setup(mock: &Arc<RpcCoreMock>, argv: &[&str]) -> (Renewer, Action) {
        let mut args = Args::parse(["renewer", "--regtest", "--rate=1000"].iter().chain(argv).copied()).unwrap();
        let action = args.action.take().unwrap();
        (Renewer::with_rpc(mock.rpc(), args), action)
    }

    fn registered(mock: &Arc<RpcCoreMock>) {
        let name = Name::new("example").unwrap();
        mock.add_name(&name, anyone_can_renew_address(), 1_000_000, CovenantType::Register);
        mock.add_wallet_coin(5_000_000, 10, false, CovenantType::None);
    }

    #[tokio::test]
    async fn test_renew_and_broadcast() {
        let mock = RpcCoreMock::new();
        registered(&mock);
        let (renewer, action) = setup(&mock, &["--broadcast", "--walletid=hot", "renew", "example"]);

        let report = renewer.run(&action).await.unwrap();
        assert_eq!(mock.calls()[0], RpcApiOps::SelectWallet);
        assert_eq!(mock.wallet_id().as_deref(), Some("hot"));
        assert_eq!(report.fee, Some(264));
        assert_eq!(report.in_mempool, Some(true));
        assert_eq!(report.exit_code(), 0);

        let tx = decode_transaction_hex(&report.hex, PREFIX).unwrap();
        assert_eq!(tx.id(), report.txid);
        assert_eq!(tx.outputs[0].covenant.covenant_type, CovenantType::Renew);
    }

    #[tokio::test]
    async fn test_broadcast_missing_from_mempool() {
        let mock = RpcCoreMock::new();
        registered(&mock);
        mock.drop_broadcasts();
        let (renewer, action) = setup(&mock, &["--broadcast", "renew", "example"]);

        let report = renewer.run(&action).await.unwrap();
        assert_eq!(report.in_mempool, Some(false));
        assert_eq!(report.exit_code(), 2);
    }

    #[tokio::test]
    async fn test_without_broadcast() {
        let mock = RpcCoreMock::new();
        registered(&mock);
        let (renewer, action) = setup(&mock, &["renew", "example"]);

        let report = renewer.run(&action).await.unwrap();
        assert_eq!(report.in_mempool, None);
        assert_eq!(report.exit_code(), 0);
        assert!(!mock.calls().contains(&RpcApiOps::SelectWallet));
        assert!(!mock.calls().contains(&RpcApiOps::SendRawTransaction));
    }

    #[tokio::test]
    async fn test_finalize() {
        let mock = RpcCoreMock::new();
        let name = Name::new("example").unwrap();
        let coin = mock.add_name(&name, owner_address(0x22), 1_000_000, CovenantType::Transfer);
        mock.add_transfer_parent(&coin, hip1_script(&[0x02; 33]));
        mock.add_wallet_coin(5_000_000, 10, false, CovenantType::None);
        let (renewer, action) = setup(&mock, &["finalize", "example"]);

        let report = renewer.run(&action).await.unwrap();
        let tx = decode_transaction_hex(&report.hex, PREFIX).unwrap();
        assert_eq!(tx.inputs[0].previous_outpoint, coin.outpoint);
        assert_eq!(tx.outputs[0].covenant.covenant_type, CovenantType::Finalize);
        assert_eq!(tx.outputs[0].address, owner_address(0x44));
    }

    #[tokio::test]
    async fn test_run_errors() {
        let mock = RpcCoreMock::new();
        let (renewer, action) = setup(&mock, &["renew", "example"]);
        assert!(matches!(renewer.run(&action).await, Err(Error::Wallet(WalletError::NameNotFound(_)))));

        let (renewer, action) = setup(&mock, &["renew", "not a name"]);
        assert!(matches!(renewer.run(&action).await, Err(Error::Wallet(WalletError::Name(_)))));

        registered(&mock);
        mock.fail_on(RpcApiOps::SignRawTransaction);
        let (renewer, action) = setup(&mock, &["renew", "example"]);
        let err = renewer.run(&action).await.unwrap_err();
        assert!(matches!(err, Error::Wallet(WalletError::RpcFailure { call: RpcApiOps::SignRawTransaction, .. })));
    }

    #[test]
    fn test_client_errors_keep_the_rpc_error() {
        let args = Args::parse(["renewer", "--walleturl=not a url", "renew", "example"]).unwrap();
        match Renewer::try_new(args) {
            Err(Error::Client { endpoint, url, source }) => {
                assert_eq!(endpoint, "wallet");
                assert_eq!(url, "not a url");
                assert!(matches!(source, hns_rpc_core::RpcError::InvalidUrl { .. }));
            }
            Err(err) => panic!("unexpected error {err}"),
            Ok(_) => panic!("invalid wallet url accepted"),
        }
        assert!(Renewer::try_new(Args::parse(["renewer", "renew", "example"]).unwrap()).is_ok());
    }
}
