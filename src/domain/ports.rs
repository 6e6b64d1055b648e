use crate::domain::model::{MessageSignal, RestServer, Wallet, WriteResult};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn wallet_service_url(&self) -> &str;
    fn selected_service(&self) -> Option<&str>;
    fn p2wdb_server_url(&self) -> &str;
    fn rest_server(&self) -> RestServer;
    fn signer_url(&self) -> &str;
    fn p2wdb_entry_url(&self) -> &str;
    fn transaction_url(&self) -> &str;
}

/// The ipfs-bch-wallet-consumer REST API.
#[async_trait]
pub trait WalletApi: Send + Sync {
    async fn get_balances(&self, addrs: &[String]) -> Result<serde_json::Value>;
    async fn get_utxos(&self, addr: &str) -> Result<serde_json::Value>;
    /// Broadcasts a signed transaction, returning its TXID.
    async fn send_tx(&self, hex: &str) -> Result<String>;
    async fn get_pub_key(&self, bch_address: &str) -> Result<serde_json::Value>;
}

#[async_trait]
pub trait MessageReader: Send + Sync {
    async fn read_msg_signal(&self, bch_address: &str) -> Result<Vec<MessageSignal>>;
}

#[async_trait]
pub trait P2wdbWrite: Send + Sync {
    async fn post_entry(&self, data: serde_json::Value, app_id: &str) -> Result<WriteResult>;
}

#[async_trait]
pub trait P2wdbPin: Send + Sync {
    /// Asks the pinning service to extract the JSON in a P2WDB entry and pin it
    /// as its own IPFS object. Returns the new CID.
    async fn json(&self, zcid: &str) -> Result<String>;
    /// Pins a CID across the pinning cluster by writing a pin request entry.
    async fn cid(&self, cid: &str) -> Result<WriteResult>;
}

#[async_trait]
pub trait MutableData: Send + Sync {
    /// Builds (without broadcasting) a transaction writing `cid` to an OP_RETURN.
    async fn write_cid_to_op_return(&self, cid: &str) -> Result<String>;
}

/// Key-bound operations the local CLI delegates to the wallet signer.
#[async_trait]
pub trait Signer: Send + Sync {
    async fn sign_message(&self, wallet: &Wallet, message: &str) -> Result<String>;
    async fn burn_tokens(
        &self,
        wallet: &Wallet,
        rest: &RestServer,
        token_id: &str,
        qty: f64,
    ) -> Result<String>;
    async fn op_return(&self, wallet: &Wallet, rest: &RestServer, data: &str) -> Result<String>;
}
