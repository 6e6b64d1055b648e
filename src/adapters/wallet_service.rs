//! Client for the ipfs-bch-wallet-consumer REST API.
//!
//! The wallet consumer proxies balance, UTXO and broadcast calls to a BCH
//! wallet service over IPFS. RPC lookups (public keys) are addressed to the
//! service selected in the configuration.

use crate::adapters::http::{join_url, post_json};
use crate::core::{ConfigProvider, WalletApi};
use crate::utils::error::{CliError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::cmp::Reverse;

const SERVICE: &str = "wallet service";

/// Upper bound on addresses or TXIDs per request.
pub const MAX_BATCH: usize = 20;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TxHistoryEntry {
    pub tx_hash: String,
    #[serde(default)]
    pub height: i64,
}

#[derive(Debug, Clone, Deserialize)]
struct TxHistoryResponse {
    #[serde(default, alias = "txs")]
    transactions: Vec<TxHistoryEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TxDetails {
    pub txid: String,
    #[serde(default)]
    pub vin: Vec<TxInput>,
    #[serde(default)]
    pub vout: Vec<TxOutput>,
    #[serde(default)]
    pub time: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TxInput {
    #[serde(default)]
    pub address: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TxOutput {
    #[serde(rename = "scriptPubKey")]
    pub script_pub_key: ScriptPubKey,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptPubKey {
    pub hex: String,
}

#[derive(Debug, Clone)]
pub struct WalletServiceClient {
    client: Client,
    base_url: String,
    selected_service: Option<String>,
}

impl WalletServiceClient {
    pub fn new(base_url: String, selected_service: Option<String>) -> Self {
        Self {
            client: Client::new(),
            base_url,
            selected_service,
        }
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Self {
        Self::new(
            config.wallet_service_url().to_string(),
            config.selected_service().map(str::to_string),
        )
    }

    pub fn check_service_id(&self) -> Result<&str> {
        self.selected_service
            .as_deref()
            .ok_or_else(|| CliError::ConfigError {
                message: "Wallet service ID does not exist in config.".to_string(),
            })
    }

    /// Transaction history of an address, newest first.
    pub async fn get_tx_history(&self, addr: &str) -> Result<Vec<TxHistoryEntry>> {
        let result = async {
            if addr.is_empty() {
                return Err(CliError::validation(
                    "getTxHistory() input address must be a string.",
                ));
            }

            let url = join_url(&self.base_url, "txHistory");
            let response: TxHistoryResponse =
                post_json(&self.client, SERVICE, &url, &json!({ "address": addr })).await?;

            let mut transactions = response.transactions;
            sort_newest_first(&mut transactions);
            Ok(transactions)
        }
        .await;

        result.inspect_err(|_| tracing::error!("Error in get_tx_history()"))
    }

    /// Hydrated transaction data, fetched in batches of [`MAX_BATCH`].
    pub async fn get_tx_data(&self, txids: &[String]) -> Result<Vec<TxDetails>> {
        let url = join_url(&self.base_url, "txData");
        let mut details = Vec::with_capacity(txids.len());

        for chunk in txids.chunks(MAX_BATCH) {
            let batch: Vec<TxDetails> =
                post_json(&self.client, SERVICE, &url, &json!({ "txids": chunk }))
                    .await
                    .inspect_err(|_| tracing::error!("Error in get_tx_data()"))?;
            details.extend(batch);
        }

        Ok(details)
    }
}

#[async_trait]
impl WalletApi for WalletServiceClient {
    async fn get_balances(&self, addrs: &[String]) -> Result<Value> {
        let result = async {
            if addrs.is_empty() || addrs.len() > MAX_BATCH {
                return Err(CliError::validation(
                    "addrs input to getBalance() must be an array, of up to 20 addresses.",
                ));
            }

            let url = join_url(&self.base_url, "balance");
            post_json(&self.client, SERVICE, &url, &json!({ "addresses": addrs })).await
        }
        .await;

        result.inspect_err(|_| tracing::error!("Error in get_balances()"))
    }

    async fn get_utxos(&self, addr: &str) -> Result<Value> {
        let result = async {
            if addr.is_empty() {
                return Err(CliError::validation(
                    "getUtxos() input address must be a string.",
                ));
            }

            let url = join_url(&self.base_url, "utxos");
            post_json(&self.client, SERVICE, &url, &json!({ "address": addr })).await
        }
        .await;

        result.inspect_err(|_| tracing::error!("Error in get_utxos()"))
    }

    async fn send_tx(&self, hex: &str) -> Result<String> {
        let result = async {
            if hex.is_empty() {
                return Err(CliError::validation("sendTx() input hex must be a string."));
            }

            let url = join_url(&self.base_url, "broadcast");
            let data: Value = post_json(&self.client, SERVICE, &url, &json!({ "hex": hex })).await?;
            txid_from_broadcast(data)
        }
        .await;

        result.inspect_err(|_| tracing::error!("Error in send_tx()"))
    }

    async fn get_pub_key(&self, bch_address: &str) -> Result<Value> {
        let result = async {
            if bch_address.is_empty() {
                return Err(CliError::validation(
                    "getPubKey() input bchAddress must be a string.",
                ));
            }
            let service_id = self.check_service_id()?;
            tracing::debug!("serviceId: {}", service_id);

            let body = json!({
                "sendTo": service_id,
                "rpcData": {
                    "endpoint": "pubkey",
                    "address": bch_address,
                }
            });
            let data: Value = post_json(&self.client, SERVICE, &self.base_url, &body).await?;

            if data.get("success") == Some(&Value::Bool(false)) {
                let message = data
                    .get("message")
                    .and_then(Value::as_str)
                    .unwrap_or("pubkey lookup failed");
                return Err(CliError::service(SERVICE, message));
            }
            Ok(data)
        }
        .await;

        result.inspect_err(|_| tracing::error!("Error in get_pub_key()"))
    }
}

/// The broadcast endpoint answers with a bare TXID string or an object
/// carrying `txid`.
/// Orders history by block height, newest first. Unconfirmed transactions
/// (height 0 or -1) rank above every confirmed one.
fn sort_newest_first(transactions: &mut [TxHistoryEntry]) {
    transactions.sort_by_key(|tx| {
        let rank = if tx.height <= 0 { i64::MAX } else { tx.height };
        Reverse(rank)
    });
}

fn txid_from_broadcast(data: Value) -> Result<String> {
    match data {
        Value::String(txid) => Ok(txid),
        Value::Object(map) => {
            if let Some(txid) = map.get("txid").and_then(Value::as_str) {
                return Ok(txid.to_string());
            }
            let message = map
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("broadcast response did not contain a txid");
            Err(CliError::service(SERVICE, message))
        }
        other => Err(CliError::service(
            SERVICE,
            format!("unexpected broadcast response: {}", other),
        )),
    }
}
