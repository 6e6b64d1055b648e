//! P2WDB write and pin client.
//!
//! A write is paid for by burning PSF tokens. The burn transaction is built by
//! the signer and broadcast through the wallet service; its TXID plus a signed
//! timestamp are the proof the P2WDB server checks before accepting the entry.

use crate::adapters::http::{get_json, join_url, post_json};
use crate::core::{P2wdbPin, P2wdbWrite, Signer, WalletApi};
use crate::domain::model::{RestServer, Wallet, WriteResult};
use crate::utils::error::{CliError, Result};
use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;

const SERVICE: &str = "P2WDB";

/// PSF token, burned to pay for P2WDB writes.
pub const PSF_TOKEN_ID: &str = "38e97c5d7d3585a2cbf3f9580c82ca33985f9cb0845d4dcce220cb709f9538b0";

/// App ID of the entries the pinning cluster watches for.
pub const PIN_APP_ID: &str = "p2wdb-pin-001";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WriteCostResponse {
    psf_cost: f64,
}

#[derive(Debug, Serialize)]
struct WriteRequest<'a> {
    txid: &'a str,
    signature: &'a str,
    message: &'a str,
    data: String,
}

#[derive(Debug, Deserialize)]
struct PinJsonResponse {
    cid: String,
}

#[derive(Clone)]
pub struct P2wdbClient {
    client: Client,
    server_url: String,
    wallet: Wallet,
    rest: RestServer,
    signer: Arc<dyn Signer>,
    wallet_api: Arc<dyn WalletApi>,
}

impl P2wdbClient {
    pub fn new(
        server_url: String,
        wallet: Wallet,
        rest: RestServer,
        signer: Arc<dyn Signer>,
        wallet_api: Arc<dyn WalletApi>,
    ) -> Self {
        Self {
            client: Client::new(),
            server_url,
            wallet,
            rest,
            signer,
            wallet_api,
        }
    }

    /// Current cost of a write, in PSF tokens.
    pub async fn get_write_cost_psf(&self) -> Result<f64> {
        let url = join_url(&self.server_url, "entry/cost/psf");
        let response: WriteCostResponse = get_json(&self.client, SERVICE, &url).await?;
        Ok(response.psf_cost)
    }

    /// Burns the write cost and returns the TXID of the burn transaction.
    async fn pay_for_write(&self) -> Result<String> {
        let cost = self.get_write_cost_psf().await?;
        tracing::debug!("💰 P2WDB write cost: {} PSF", cost);

        let hex = self
            .signer
            .burn_tokens(&self.wallet, &self.rest, PSF_TOKEN_ID, cost)
            .await?;
        self.wallet_api.send_tx(&hex).await
    }
}

#[async_trait]
impl P2wdbWrite for P2wdbClient {
    async fn post_entry(&self, data: Value, app_id: &str) -> Result<WriteResult> {
        let result = async {
            if app_id.is_empty() {
                return Err(CliError::validation("appId must be a non-empty string."));
            }

            let txid = self.pay_for_write().await?;
            tracing::info!("🔥 Burned PSF for P2WDB write, txid: {}", txid);

            let message = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
            let signature = self.signer.sign_message(&self.wallet, &message).await?;

            let payload = json!({ "appId": app_id, "data": data });
            let body = WriteRequest {
                txid: &txid,
                signature: &signature,
                message: &message,
                data: serde_json::to_string(&payload)?,
            };

            let url = join_url(&self.server_url, "entry/write");
            post_json(&self.client, SERVICE, &url, &body).await
        }
        .await;

        result.inspect_err(|_| tracing::error!("Error in post_entry()"))
    }
}

#[async_trait]
impl P2wdbPin for P2wdbClient {
    async fn json(&self, zcid: &str) -> Result<String> {
        if zcid.is_empty() {
            return Err(CliError::validation("zcid must be a non-empty string."));
        }

        let url = join_url(&self.server_url, "pin/json");
        let response: PinJsonResponse =
            post_json(&self.client, SERVICE, &url, &json!({ "zcid": zcid }))
                .await
                .inspect_err(|_| tracing::error!("Error in pin json()"))?;
        Ok(response.cid)
    }

    async fn cid(&self, cid: &str) -> Result<WriteResult> {
        if cid.is_empty() {
            return Err(CliError::validation("cid must be a non-empty string."));
        }

        self.post_entry(json!({ "cid": cid }), PIN_APP_ID).await
    }
}
