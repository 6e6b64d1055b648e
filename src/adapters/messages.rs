use crate::adapters::wallet_service::{TxDetails, WalletServiceClient};
use crate::core::memo::parse_msg_signal;
use crate::core::MessageReader;
use crate::domain::model::MessageSignal;
use crate::utils::error::{CliError, Result};
use async_trait::async_trait;
use std::collections::HashMap;

/// Reads message signals from an address's transaction history through the
/// wallet service.
pub struct MemoMessageReader {
    wallet_service: WalletServiceClient,
}

impl MemoMessageReader {
    pub fn new(wallet_service: WalletServiceClient) -> Self {
        Self { wallet_service }
    }

    fn signals_in(tx: &TxDetails) -> Vec<MessageSignal> {
        let sender = tx
            .vin
            .first()
            .and_then(|input| input.address.clone())
            .unwrap_or_default();

        let mut signals = Vec::new();
        for output in &tx.vout {
            let payload = match parse_msg_signal(&output.script_pub_key.hex) {
                Ok(Some(payload)) => payload,
                Ok(None) => continue,
                Err(e) => {
                    tracing::debug!("Skipping unreadable output in {}: {}", tx.txid, e);
                    continue;
                }
            };
            signals.push(MessageSignal {
                sender: sender.clone(),
                txid: tx.txid.clone(),
                subject: payload.subject,
                ipfs_hash: payload.ipfs_hash,
                time: tx.time,
            });
        }
        signals
    }
}

#[async_trait]
impl MessageReader for MemoMessageReader {
    async fn read_msg_signal(&self, bch_address: &str) -> Result<Vec<MessageSignal>> {
        if bch_address.is_empty() {
            return Err(CliError::validation("bchAddress must be a string."));
        }

        let history = self.wallet_service.get_tx_history(bch_address).await?;
        let txids: Vec<String> = history.into_iter().map(|entry| entry.tx_hash).collect();
        tracing::debug!("✉️ Scanning {} transactions for message signals", txids.len());

        let mut details = self.wallet_service.get_tx_data(&txids).await?;

        // txData does not promise history order.
        let position: HashMap<&str, usize> = txids
            .iter()
            .enumerate()
            .map(|(i, txid)| (txid.as_str(), i))
            .collect();
        details.sort_by_key(|tx| position.get(tx.txid.as_str()).copied().unwrap_or(usize::MAX));

        Ok(details.iter().flat_map(Self::signals_in).collect())
    }
}
