use super::*;
use crate::imports::*;

use async_trait::async_trait;
use hns_consensus_core::{
    tx::Witness,
    wire::{decode_transaction_hex, WireError},
};
use hns_rpc_core::{
    api::rpc::{NodeRpcApi, WalletRpcApi},
    convert::subunits_to_amount,
    RpcError, RpcResult,
};
use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard};

impl From<Arc<RpcCoreMock>> for Rpc {
    fn from(rpc_mock: Arc<RpcCoreMock>) -> Self {
        Self::new(rpc_mock.clone(), rpc_mock)
    }
}

#[derive(Default)]
struct MockState {
    names: HashMap<String, RpcNameState>,
    coins: HashMap<TransactionOutpoint, RpcCoin>,
    transactions: HashMap<TransactionId, RpcTransaction>,
    height: u32,
    unspent: Vec<RpcUnspent>,
    keys: HashMap<Address, String>,
    passphrase: Option<String>,
    unlocked: bool,
    wallet_id: Option<String>,
    mempool: Vec<TransactionId>,
    signed_inputs: Vec<RpcSignInput>,
    calls: Vec<RpcApiOps>,
    failing: HashSet<RpcApiOps>,
    corrupt_signed_hex: bool,
    drop_broadcasts: bool,
    next_id: u32,
}

impl MockState {
    fn next_txid(&mut self) -> TransactionId {
        self.next_id += 1;
        let mut bytes = [0xc0; 32];
        bytes[..4].copy_from_slice(&self.next_id.to_le_bytes());
        Hash::from_bytes(bytes)
    }
}

/// In-memory node and wallet. Name coins sit at output 1 of their creating
/// transaction so that parent lookups exercise the index.
pub struct RpcCoreMock {
    state: Mutex<MockState>,
}

impl RpcCoreMock {
    pub fn new() -> Arc<Self> {
        Arc::new(Self { state: Mutex::new(MockState { height: 300, ..Default::default() }) })
    }

    pub fn rpc(self: &Arc<Self>) -> Rpc {
        Rpc::from(self.clone())
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap()
    }

    /// Logs the call and fails it when requested through [`RpcCoreMock::fail_on`].
    fn enter(&self, op: RpcApiOps) -> RpcResult<MutexGuard<'_, MockState>> {
        let mut state = self.state();
        state.calls.push(op);
        if state.failing.contains(&op) {
            return Err(RpcError::Remote { code: -1, message: format!("{op} failed") });
        }
        Ok(state)
    }

    // ---

    pub fn add_name(&self, name: &Name, address: Address, value: u64, covenant_type: CovenantType) -> Coin {
        let mut state = self.state();
        let coin = Coin {
            outpoint: TransactionOutpoint::new(state.next_txid(), 1),
            version: 0,
            height: Some(NAME_HEIGHT),
            value,
            address,
            covenant: name_covenant(name, covenant_type),
            coinbase: false,
        };
        state.coins.insert(coin.outpoint, RpcCoin::from(&coin));
        state.names.insert(name.to_string(), name_state(name, coin.outpoint));
        coin
    }

    pub fn update_name(&self, name: &Name, update: impl FnOnce(&mut RpcNameState)) {
        if let Some(record) = self.state().names.get_mut(name.as_str()) {
            update(record);
        }
    }

    pub fn set_owner(&self, name: &Name, owner: Option<TransactionOutpoint>) {
        let owner = owner.unwrap_or_else(TransactionOutpoint::null);
        self.update_name(name, |record| record.owner = Some(owner.into()));
    }

    pub fn remove_coin(&self, outpoint: &TransactionOutpoint) {
        self.state().coins.remove(outpoint);
    }

    /// Stores the transaction that created `coin`; its input at the coin's
    /// index reveals `script` as witness item 1.
    pub fn add_transfer_parent(&self, coin: &Coin, script: Vec<u8>) {
        let index = coin.outpoint.index;
        let inputs = (0..=index)
            .map(|i| RpcTransactionInput {
                prevout: RpcOutpoint { hash: Hash::from_bytes([0x99; 32]), index: i },
                witness: vec![hex::encode([0x30; 65]), if i == index { hex::encode(&script) } else { hex::encode([0x02; 33]) }],
                sequence: u32::MAX,
            })
            .collect();
        let outputs = (0..=index)
            .map(|i| RpcTransactionOutput {
                value: coin.value,
                address: if i == index { coin.address.clone() } else { owner_address(0x77) },
                covenant: if i == index { RpcCovenant::from(&coin.covenant) } else { RpcCovenant::from(&Covenant::default()) },
            })
            .collect();
        let tx = RpcTransaction {
            hash: coin.outpoint.transaction_id,
            version: 0,
            inputs,
            outputs,
            locktime: 0,
            height: NAME_HEIGHT as i64,
        };
        self.state().transactions.insert(tx.hash, tx);
    }

    pub fn truncate_parent_witness(&self, id: &TransactionId, input: usize, len: usize) {
        if let Some(tx) = self.state().transactions.get_mut(id) {
            tx.inputs[input].witness.truncate(len);
        }
    }

    /// Adds a coin owned by the wallet. A non-NONE `covenant_type` makes it a name coin.
    pub fn add_wallet_coin(&self, value: u64, confirmations: u32, coinbase: bool, covenant_type: CovenantType) -> Coin {
        let mut state = self.state();
        let txid = state.next_txid();
        let address = owner_address(state.next_id as u8);
        let covenant = match covenant_type {
            CovenantType::None => Covenant::default(),
            _ => name_covenant(&Name::new("reserved").unwrap(), covenant_type),
        };
        let height = confirmations.checked_sub(1).map(|depth| state.height - depth);
        let coin = Coin { outpoint: TransactionOutpoint::new(txid, 0), version: 0, height, value, address, covenant, coinbase };

        state.coins.insert(coin.outpoint, RpcCoin::from(&coin));
        state.keys.insert(coin.address.clone(), format!("key-{}", txid));
        state.unspent.push(RpcUnspent {
            txid,
            vout: 0,
            address: coin.address.clone(),
            account: "default".to_string(),
            amount: subunits_to_amount(value),
            confirmations,
            spendable: true,
        });
        coin
    }

    pub fn spend_wallet_coin(&self, outpoint: &TransactionOutpoint) {
        let mut state = self.state();
        state.unspent.retain(|entry| entry.txid != outpoint.transaction_id || entry.vout != outpoint.index);
        state.coins.remove(outpoint);
    }

    /// Encrypts the wallet: key export then requires `walletpassphrase`.
    pub fn set_passphrase(&self, passphrase: &str) {
        let mut state = self.state();
        state.passphrase = Some(passphrase.to_string());
        state.unlocked = false;
    }

    pub fn set_height(&self, height: u32) {
        self.state().height = height;
    }

    pub fn fail_on(&self, op: RpcApiOps) {
        self.state().failing.insert(op);
    }

    /// `signrawtransaction` answers with hex that does not decode.
    pub fn corrupt_signed_hex(&self) {
        self.state().corrupt_signed_hex = true;
    }

    /// Broadcasts are accepted but never show up in the mempool.
    pub fn drop_broadcasts(&self) {
        self.state().drop_broadcasts = true;
    }

    pub fn calls(&self) -> Vec<RpcApiOps> {
        self.state().calls.clone()
    }

    pub fn signed_inputs(&self) -> Vec<RpcSignInput> {
        self.state().signed_inputs.clone()
    }

    pub fn wallet_id(&self) -> Option<String> {
        self.state().wallet_id.clone()
    }
}

#[async_trait]
impl NodeRpcApi for RpcCoreMock {
    async fn get_name_info(&self, name: &str) -> RpcResult<RpcNameInfo> {
        let state = self.enter(RpcApiOps::GetNameInfo)?;
        Ok(RpcNameInfo { info: state.names.get(name).cloned() })
    }

    async fn get_coin(&self, outpoint: TransactionOutpoint) -> RpcResult<Option<RpcCoin>> {
        let state = self.enter(RpcApiOps::GetCoin)?;
        Ok(state.coins.get(&outpoint).cloned())
    }

    async fn get_transaction(&self, transaction_id: TransactionId) -> RpcResult<Option<RpcTransaction>> {
        let state = self.enter(RpcApiOps::GetTransaction)?;
        Ok(state.transactions.get(&transaction_id).cloned())
    }

    async fn get_info(&self) -> RpcResult<RpcNodeInfo> {
        let state = self.enter(RpcApiOps::GetInfo)?;
        Ok(RpcNodeInfo {
            version: "mock".to_string(),
            network: "regtest".to_string(),
            chain: RpcChainInfo { height: state.height, tip: Some(block_hash(state.height)), progress: 1.0 },
        })
    }

    async fn get_block_hash(&self, height: u32) -> RpcResult<Hash> {
        let state = self.enter(RpcApiOps::GetBlockHash)?;
        if height > state.height {
            return Err(RpcError::Remote { code: -8, message: "Block height out of range.".to_string() });
        }
        Ok(block_hash(height))
    }

    async fn sign_raw_transaction(
        &self,
        tx_hex: String,
        inputs: Vec<RpcSignInput>,
        keys: Vec<String>,
    ) -> RpcResult<RpcSignedTransaction> {
        let mut state = self.enter(RpcApiOps::SignRawTransaction)?;
        let mut tx = decode_transaction_hex(&tx_hex, PREFIX)?;
        for input in tx.inputs.iter_mut() {
            let outpoint = input.previous_outpoint;
            let context = inputs
                .iter()
                .find(|context| context.txid == outpoint.transaction_id && context.vout == outpoint.index)
                .ok_or_else(|| RpcError::from(format!("missing context for {outpoint}")))?;
            if input.witness.is_empty() {
                let key = state.keys.get(&context.address).ok_or_else(|| RpcError::from(format!("no key for {}", context.address)))?;
                if !keys.contains(key) {
                    return Err(format!("key for {} not supplied", context.address).into());
                }
                input.witness = Witness::new(vec![vec![0x30; 65], vec![0x02; 33]]);
            }
        }
        state.signed_inputs = inputs;
        let hex = if state.corrupt_signed_hex { "zz".to_string() } else { tx.to_hex() };
        Ok(RpcSignedTransaction { hex, complete: true })
    }

    async fn send_raw_transaction(&self, tx_hex: String) -> RpcResult<TransactionId> {
        let mut state = self.enter(RpcApiOps::SendRawTransaction)?;
        let tx = decode_transaction_hex(&tx_hex, PREFIX).map_err(|err: WireError| RpcError::Remote { code: -22, message: err.to_string() })?;
        let id = tx.id();
        if !state.drop_broadcasts {
            state.mempool.push(id);
        }
        Ok(id)
    }

    async fn get_raw_mempool(&self) -> RpcResult<Vec<TransactionId>> {
        let state = self.enter(RpcApiOps::GetRawMempool)?;
        Ok(state.mempool.clone())
    }
}

#[async_trait]
impl WalletRpcApi for RpcCoreMock {
    async fn select_wallet(&self, wallet_id: &str) -> RpcResult<()> {
        let mut state = self.enter(RpcApiOps::SelectWallet)?;
        state.wallet_id = Some(wallet_id.to_string());
        Ok(())
    }

    async fn get_new_address(&self) -> RpcResult<Address> {
        let _state = self.enter(RpcApiOps::GetNewAddress)?;
        Ok(owner_address(0x65))
    }

    async fn list_unspent(&self) -> RpcResult<Vec<RpcUnspent>> {
        let state = self.enter(RpcApiOps::ListUnspent)?;
        Ok(state.unspent.clone())
    }

    async fn get_raw_change_address(&self) -> RpcResult<Address> {
        let _state = self.enter(RpcApiOps::GetRawChangeAddress)?;
        Ok(owner_address(0x66))
    }

    async fn dump_priv_key(&self, address: &Address) -> RpcResult<String> {
        let state = self.enter(RpcApiOps::DumpPrivKey)?;
        if state.passphrase.is_some() && !state.unlocked {
            return Err(RpcError::Remote { code: -13, message: "Wallet is locked.".to_string() });
        }
        state.keys.get(address).cloned().ok_or_else(|| RpcError::Remote { code: -4, message: format!("Key not found for {address}.") })
    }

    async fn wallet_passphrase(&self, passphrase: &str, _timeout: u64) -> RpcResult<()> {
        let mut state = self.enter(RpcApiOps::WalletPassphrase)?;
        if state.passphrase.as_deref().is_some_and(|expected| expected != passphrase) {
            return Err(RpcError::Remote { code: -14, message: "Error: The wallet passphrase entered was incorrect.".to_string() });
        }
        state.unlocked = true;
        Ok(())
    }
}
