//! SLP mutable data (PS002): token data updates are CIDs written to an
//! OP_RETURN in a transaction paid by the wallet controlling the token's MDA.

use crate::core::{MutableData, Signer};
use crate::domain::model::{RestServer, Wallet};
use crate::utils::error::{CliError, Result};
use async_trait::async_trait;
use std::sync::Arc;

pub struct SlpMutableData {
    wallet: Wallet,
    rest: RestServer,
    signer: Arc<dyn Signer>,
}

impl SlpMutableData {
    pub fn new(wallet: Wallet, rest: RestServer, signer: Arc<dyn Signer>) -> Self {
        Self {
            wallet,
            rest,
            signer,
        }
    }
}

#[async_trait]
impl MutableData for SlpMutableData {
    async fn write_cid_to_op_return(&self, cid: &str) -> Result<String> {
        if cid.is_empty() {
            return Err(CliError::validation("CID must be a non-empty string."));
        }

        tracing::debug!(
            "🧾 Building OP_RETURN tx for {} from {}",
            cid,
            self.wallet.cash_address()
        );
        self.signer.op_return(&self.wallet, &self.rest, cid).await
    }
}
