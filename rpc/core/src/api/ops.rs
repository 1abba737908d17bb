use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Calls made against the node and wallet services.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u32)]
pub enum RpcApiOps {
    // Node
    GetNameInfo = 0,
    GetCoin,
    GetTransaction,
    GetInfo,
    GetBlockHash,
    SignRawTransaction,
    SendRawTransaction,
    GetRawMempool,

    // Wallet
    SelectWallet,
    GetNewAddress,
    ListUnspent,
    GetRawChangeAddress,
    DumpPrivKey,
    WalletPassphrase,
}

impl RpcApiOps {
    /// JSON-RPC method name, or `None` for calls served by the REST interface.
    pub fn method(&self) -> Option<&'static str> {
        let method = match self {
            RpcApiOps::GetNameInfo => "getnameinfo",
            RpcApiOps::GetBlockHash => "getblockhash",
            RpcApiOps::SignRawTransaction => "signrawtransaction",
            RpcApiOps::SendRawTransaction => "sendrawtransaction",
            RpcApiOps::GetRawMempool => "getrawmempool",
            RpcApiOps::SelectWallet => "selectwallet",
            RpcApiOps::GetNewAddress => "getnewaddress",
            RpcApiOps::ListUnspent => "listunspent",
            RpcApiOps::GetRawChangeAddress => "getrawchangeaddress",
            RpcApiOps::DumpPrivKey => "dumpprivkey",
            RpcApiOps::WalletPassphrase => "walletpassphrase",
            RpcApiOps::GetCoin | RpcApiOps::GetTransaction | RpcApiOps::GetInfo => return None,
        };
        Some(method)
    }

    pub fn is_wallet(&self) -> bool {
        matches!(
            self,
            RpcApiOps::SelectWallet
                | RpcApiOps::GetNewAddress
                | RpcApiOps::ListUnspent
                | RpcApiOps::GetRawChangeAddress
                | RpcApiOps::DumpPrivKey
                | RpcApiOps::WalletPassphrase
        )
    }
}

impl Display for RpcApiOps {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            RpcApiOps::GetCoin => f.write_str("GET /coin"),
            RpcApiOps::GetTransaction => f.write_str("GET /tx"),
            RpcApiOps::GetInfo => f.write_str("GET /"),
            op => f.write_str(op.method().unwrap_or_default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ops_display() {
        assert_eq!(RpcApiOps::GetNameInfo.to_string(), "getnameinfo");
        assert_eq!(RpcApiOps::GetCoin.to_string(), "GET /coin");
        assert_eq!(RpcApiOps::GetCoin.method(), None);
        assert!(RpcApiOps::DumpPrivKey.is_wallet());
        assert!(!RpcApiOps::SignRawTransaction.is_wallet());
    }
}
