use super::constants::MIN_RELAY;
use crate::network::NetworkType;
use hns_addresses::Prefix;

/// Per-network constants, resolved once from a [`NetworkType`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Params {
    pub net: NetworkType,
    pub prefix: Prefix,
    /// Blocks a renewal anchor must be buried by, and the unit of renewal-block lookback.
    pub renewal_maturity: u32,
    /// Confirmations before a coinbase output may be spent.
    pub coinbase_maturity: u32,
    /// Default fee rate in subunits per kilobyte of virtual size.
    pub fee_rate: u64,
    /// Minimum relay rate, used for the dust threshold.
    pub min_relay: u64,
    pub rpc_port: u16,
    pub wallet_port: u16,
}

impl Params {
    pub fn of(net: NetworkType) -> &'static Params {
        match net {
            NetworkType::Main => &MAINNET_PARAMS,
            NetworkType::Testnet => &TESTNET_PARAMS,
            NetworkType::Regtest => &REGTEST_PARAMS,
            NetworkType::Simnet => &SIMNET_PARAMS,
        }
    }

    /// Height whose block hash anchors a renewal: two renewal maturities below
    /// the tip, clamped to genesis on short chains.
    pub fn renewal_height(&self, chain_height: u32) -> u32 {
        chain_height.saturating_sub(2 * self.renewal_maturity)
    }
}

impl From<NetworkType> for &'static Params {
    fn from(net: NetworkType) -> Self {
        Params::of(net)
    }
}

pub const MAINNET_PARAMS: Params = Params {
    net: NetworkType::Main,
    prefix: Prefix::Mainnet,
    // 30 days of 10 minute blocks
    renewal_maturity: 4_320,
    coinbase_maturity: 100,
    fee_rate: 100_000,
    min_relay: MIN_RELAY,
    rpc_port: 12037,
    wallet_port: 12039,
};

pub const TESTNET_PARAMS: Params = Params {
    net: NetworkType::Testnet,
    prefix: Prefix::Testnet,
    renewal_maturity: 4_320,
    coinbase_maturity: 100,
    fee_rate: 20_000,
    min_relay: MIN_RELAY,
    rpc_port: 13037,
    wallet_port: 13039,
};

pub const REGTEST_PARAMS: Params = Params {
    net: NetworkType::Regtest,
    prefix: Prefix::Regtest,
    renewal_maturity: 50,
    coinbase_maturity: 2,
    fee_rate: 20_000,
    min_relay: MIN_RELAY,
    rpc_port: 14037,
    wallet_port: 14039,
};

pub const SIMNET_PARAMS: Params = Params {
    net: NetworkType::Simnet,
    prefix: Prefix::Simnet,
    renewal_maturity: 50,
    coinbase_maturity: 6,
    fee_rate: 20_000,
    min_relay: MIN_RELAY,
    rpc_port: 15037,
    wallet_port: 15039,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_params_resolve_by_network() {
        for net in NetworkType::iter() {
            let params: &'static Params = net.into();
            assert_eq!(params.net, net);
            assert_eq!(params.prefix, Prefix::from(net));
            assert_eq!(params.min_relay, 1_000);
        }
        assert_eq!(Params::of(NetworkType::Main).renewal_maturity, 4_320);
        assert_eq!(Params::of(NetworkType::Regtest).coinbase_maturity, 2);
    }

    #[test]
    fn test_renewal_height() {
        assert_eq!(MAINNET_PARAMS.renewal_height(100_000), 100_000 - 8_640);
        assert_eq!(REGTEST_PARAMS.renewal_height(150), 50);
        assert_eq!(REGTEST_PARAMS.renewal_height(100), 0);
        assert_eq!(REGTEST_PARAMS.renewal_height(20), 0);
    }
}
