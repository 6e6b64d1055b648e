//! Fixtures and mock port implementations shared by unit tests.

use crate::core::{MessageReader, MutableData, P2wdbPin, P2wdbWrite, Signer, WalletApi};
use crate::domain::model::{
    EntryHash, MessageSignal, RestInterface, RestServer, Wallet, WalletInfo, WriteResult,
};
use crate::utils::error::{CliError, Result};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Mutex;

pub fn wallet() -> Wallet {
    Wallet {
        name: "test123".to_string(),
        info: wallet_info(),
    }
}

pub fn wallet_info() -> WalletInfo {
    WalletInfo {
        cash_address: "bitcoincash:qqfake".to_string(),
        private_key: "L1fakeWif".to_string(),
        mnemonic: None,
        slp_address: None,
        legacy_address: None,
        public_key: None,
        hd_path: None,
    }
}

pub fn wallet_json() -> String {
    json!({
        "wallet": {
            "cashAddress": "bitcoincash:qqfake",
            "privateKey": "L1fakeWif",
            "mnemonic": "one two three four five six seven eight nine ten eleven twelve"
        }
    })
    .to_string()
}

pub fn rest() -> RestServer {
    RestServer {
        rest_url: "https://free-bch.fullstack.cash".to_string(),
        interface: RestInterface::ConsumerApi,
    }
}

pub fn message(sender: &str, txid: &str, subject: &str) -> MessageSignal {
    MessageSignal {
        sender: sender.to_string(),
        txid: txid.to_string(),
        subject: subject.to_string(),
        ipfs_hash: "bafymsg".to_string(),
        time: None,
    }
}

#[derive(Default)]
pub struct MockSigner {
    burns: Mutex<Vec<(String, f64)>>,
    signed: Mutex<Vec<String>>,
    op_returns: Mutex<Vec<String>>,
}

impl MockSigner {
    pub fn burns(&self) -> Vec<(String, f64)> {
        self.burns.lock().unwrap().clone()
    }

    pub fn signed_messages(&self) -> Vec<String> {
        self.signed.lock().unwrap().clone()
    }

    pub fn op_returns(&self) -> Vec<String> {
        self.op_returns.lock().unwrap().clone()
    }
}

#[async_trait]
impl Signer for MockSigner {
    async fn sign_message(&self, _wallet: &Wallet, message: &str) -> Result<String> {
        self.signed.lock().unwrap().push(message.to_string());
        Ok("mock-signature".to_string())
    }

    async fn burn_tokens(
        &self,
        _wallet: &Wallet,
        _rest: &RestServer,
        token_id: &str,
        qty: f64,
    ) -> Result<String> {
        self.burns.lock().unwrap().push((token_id.to_string(), qty));
        Ok("mock-burn-hex".to_string())
    }

    async fn op_return(&self, _wallet: &Wallet, _rest: &RestServer, data: &str) -> Result<String> {
        self.op_returns.lock().unwrap().push(data.to_string());
        Ok("mock-op-return-hex".to_string())
    }
}

pub struct MockWalletApi {
    txid: String,
    broadcasts: Mutex<Vec<String>>,
}

impl MockWalletApi {
    pub fn with_txid(txid: &str) -> Self {
        Self {
            txid: txid.to_string(),
            broadcasts: Mutex::new(Vec::new()),
        }
    }

    pub fn broadcasts(&self) -> Vec<String> {
        self.broadcasts.lock().unwrap().clone()
    }
}

#[async_trait]
impl WalletApi for MockWalletApi {
    async fn get_balances(&self, addrs: &[String]) -> Result<Value> {
        Ok(json!({
            "success": true,
            "balances": [{
                "address": addrs[0],
                "balance": { "confirmed": 1500, "unconfirmed": 0 }
            }]
        }))
    }

    async fn get_utxos(&self, addr: &str) -> Result<Value> {
        Ok(json!([{ "address": addr, "bchUtxos": [{ "value": 1000 }, { "value": 500 }] }]))
    }

    async fn send_tx(&self, hex: &str) -> Result<String> {
        self.broadcasts.lock().unwrap().push(hex.to_string());
        Ok(self.txid.clone())
    }

    async fn get_pub_key(&self, _bch_address: &str) -> Result<Value> {
        Ok(json!({ "success": true, "pubkey": { "publicKey": "02abc" } }))
    }
}

pub struct MockMessageReader {
    pub messages: Vec<MessageSignal>,
}

#[async_trait]
impl MessageReader for MockMessageReader {
    async fn read_msg_signal(&self, _bch_address: &str) -> Result<Vec<MessageSignal>> {
        Ok(self.messages.clone())
    }
}

#[derive(Default)]
pub struct MockWrite {
    entries: Mutex<Vec<(Value, String)>>,
}

impl MockWrite {
    pub fn entries(&self) -> Vec<(Value, String)> {
        self.entries.lock().unwrap().clone()
    }
}

#[async_trait]
impl P2wdbWrite for MockWrite {
    async fn post_entry(&self, data: Value, app_id: &str) -> Result<WriteResult> {
        self.entries.lock().unwrap().push((data, app_id.to_string()));
        Ok(WriteResult {
            success: Some(true),
            hash: EntryHash::Plain("hash1".to_string()),
        })
    }
}

/// Pin mock; `nested` makes `cid()` answer with the PSF-paid hash shape.
#[derive(Default)]
pub struct MockPin {
    nested: bool,
    fail: bool,
    pinned: Mutex<Vec<String>>,
}

impl MockPin {
    pub fn nested() -> Self {
        Self {
            nested: true,
            ..Self::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn pinned(&self) -> Vec<String> {
        self.pinned.lock().unwrap().clone()
    }
}

#[async_trait]
impl P2wdbPin for MockPin {
    async fn json(&self, _zcid: &str) -> Result<String> {
        Ok("fake-cid".to_string())
    }

    async fn cid(&self, cid: &str) -> Result<WriteResult> {
        if self.fail {
            return Err(CliError::service("P2WDB", "pin rejected"));
        }
        self.pinned.lock().unwrap().push(cid.to_string());
        let hash = if self.nested {
            EntryHash::Nested {
                hash: "fake-hash".to_string(),
            }
        } else {
            EntryHash::Plain("fake-hash".to_string())
        };
        Ok(WriteResult {
            success: Some(true),
            hash,
        })
    }
}

#[derive(Default)]
pub struct MockMutableData {
    written: Mutex<Vec<String>>,
}

impl MockMutableData {
    pub fn written(&self) -> Vec<String> {
        self.written.lock().unwrap().clone()
    }
}

#[async_trait]
impl MutableData for MockMutableData {
    async fn write_cid_to_op_return(&self, cid: &str) -> Result<String> {
        self.written.lock().unwrap().push(cid.to_string());
        Ok("fake-hex".to_string())
    }
}
