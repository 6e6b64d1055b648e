//! Client for the wallet signer, which holds no state of its own: it receives
//! the WIF with each request and returns a signature or an unbroadcast
//! transaction. UTXOs are looked up by the signer through `restURL`.

use crate::adapters::http::{join_url, post_json};
use crate::core::{ConfigProvider, Signer};
use crate::domain::model::{RestServer, Wallet};
use crate::utils::error::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

const SERVICE: &str = "signer";

#[derive(Debug, Serialize)]
struct SignRequest<'a> {
    wif: &'a str,
    message: &'a str,
}

#[derive(Debug, Deserialize)]
struct SignResponse {
    signature: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BurnRequest<'a> {
    wif: &'a str,
    address: &'a str,
    #[serde(rename = "restURL")]
    rest_url: &'a str,
    interface: &'a str,
    token_id: &'a str,
    qty: f64,
}

#[derive(Debug, Serialize)]
struct OpReturnRequest<'a> {
    wif: &'a str,
    address: &'a str,
    #[serde(rename = "restURL")]
    rest_url: &'a str,
    interface: &'a str,
    data: &'a str,
}

#[derive(Debug, Deserialize)]
struct TxHexResponse {
    hex: String,
}

#[derive(Debug, Clone)]
pub struct SignerClient {
    client: Client,
    base_url: String,
}

impl SignerClient {
    pub fn new(base_url: String) -> Self {
        Self {
            client: Client::new(),
            base_url,
        }
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Self {
        Self::new(config.signer_url().to_string())
    }
}

#[async_trait]
impl Signer for SignerClient {
    async fn sign_message(&self, wallet: &Wallet, message: &str) -> Result<String> {
        let url = join_url(&self.base_url, "message/sign");
        let body = SignRequest {
            wif: wallet.wif(),
            message,
        };
        let response: SignResponse = post_json(&self.client, SERVICE, &url, &body)
            .await
            .inspect_err(|_| tracing::error!("Error in sign_message()"))?;
        Ok(response.signature)
    }

    async fn burn_tokens(
        &self,
        wallet: &Wallet,
        rest: &RestServer,
        token_id: &str,
        qty: f64,
    ) -> Result<String> {
        let url = join_url(&self.base_url, "tx/burn");
        let body = BurnRequest {
            wif: wallet.wif(),
            address: wallet.cash_address(),
            rest_url: &rest.rest_url,
            interface: rest.interface.as_str(),
            token_id,
            qty,
        };
        let response: TxHexResponse = post_json(&self.client, SERVICE, &url, &body)
            .await
            .inspect_err(|_| tracing::error!("Error in burn_tokens()"))?;
        Ok(response.hex)
    }

    async fn op_return(&self, wallet: &Wallet, rest: &RestServer, data: &str) -> Result<String> {
        let url = join_url(&self.base_url, "tx/op-return");
        let body = OpReturnRequest {
            wif: wallet.wif(),
            address: wallet.cash_address(),
            rest_url: &rest.rest_url,
            interface: rest.interface.as_str(),
            data,
        };
        let response: TxHexResponse = post_json(&self.client, SERVICE, &url, &body)
            .await
            .inspect_err(|_| tracing::error!("Error in op_return()"))?;
        Ok(response.hex)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{rest, wallet};
    use httpmock::prelude::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_sign_message() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST).path("/message/sign").json_body(json!({
                    "wif": "L1fakeWif",
                    "message": "2026-10-15T00:00:00.000Z"
                }));
                then.status(200).json_body(json!({ "signature": "H1fakeSig=" }));
            })
            .await;

        let signer = SignerClient::new(server.base_url());
        let signature = signer
            .sign_message(&wallet(), "2026-10-15T00:00:00.000Z")
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(signature, "H1fakeSig=");
    }

    #[tokio::test]
    async fn test_burn_tokens() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST).path("/tx/burn").json_body(json!({
                    "wif": "L1fakeWif",
                    "address": "bitcoincash:qqfake",
                    "restURL": "https://free-bch.fullstack.cash",
                    "interface": "consumer-api",
                    "tokenId": "token-id",
                    "qty": 0.05
                }));
                then.status(200).json_body(json!({ "hex": "0200burn" }));
            })
            .await;

        let signer = SignerClient::new(server.base_url());
        let hex = signer
            .burn_tokens(&wallet(), &rest(), "token-id", 0.05)
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(hex, "0200burn");
    }

    #[tokio::test]
    async fn test_op_return() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/tx/op-return")
                    .json_body_partial(r#"{"data": "ipfs://bafyfake"}"#);
                then.status(200).json_body(json!({ "hex": "0200opreturn" }));
            })
            .await;

        let signer = SignerClient::new(server.base_url());
        let hex = signer
            .op_return(&wallet(), &rest(), "ipfs://bafyfake")
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(hex, "0200opreturn");
    }

    #[tokio::test]
    async fn test_signer_error_status() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/tx/op-return");
                then.status(422).body("Insufficient balance");
            })
            .await;

        let signer = SignerClient::new(server.base_url());
        let err = signer
            .op_return(&wallet(), &rest(), "ipfs://bafyfake")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Insufficient balance"));
    }
}
