//! `wallet-balance`: balance and UTXO count of a local wallet.

use crate::app::commands::{report_failure, WALLET_FLAG_MESSAGE};
use crate::config::WalletFlags;
use crate::core::wallet_util::WalletUtil;
use crate::core::{ConfigProvider, RunOutcome, Storage};
use crate::utils::error::Result;
use crate::utils::validation::require_flag;
use serde_json::Value;

pub const NAME: &str = "wallet-balance";

pub struct WalletBalanceCommand<S: Storage, C: ConfigProvider> {
    wallet_util: WalletUtil<S, C>,
}

impl<S: Storage, C: ConfigProvider> WalletBalanceCommand<S, C> {
    pub fn new(wallet_util: WalletUtil<S, C>) -> Self {
        Self { wallet_util }
    }

    pub async fn run(&self, flags: &WalletFlags) -> RunOutcome<Value> {
        let result = async {
            let name = require_flag(&flags.name, WALLET_FLAG_MESSAGE)?;
            self.balance(name).await
        }
        .await;

        match result {
            Ok(balances) => RunOutcome::Done(balances),
            Err(e) => report_failure(NAME, e),
        }
    }

    /// Prints the balance and UTXO count of wallet `name`, returning the
    /// balance response.
    pub async fn balance(&self, name: &str) -> Result<Value> {
        let wallet = self.wallet_util.instance_wallet(name).await?;
        let address = wallet.cash_address().to_string();
        let wallet_api = self.wallet_util.wallet_api();

        let balances = wallet_api.get_balances(&[address.clone()]).await?;
        let utxos = wallet_api.get_utxos(&address).await?;

        println!("Wallet: {} ({})", wallet.name, address);
        println!("Balance: {}", serde_json::to_string_pretty(&balances)?);
        println!("UTXOs: {}", count_utxos(&utxos));

        Ok(balances)
    }
}

/// Counts BCH UTXOs in a `/utxos` response. Responses without `bchUtxos`
/// lists are counted as a flat array.
pub fn count_utxos(utxos: &Value) -> usize {
    let Some(entries) = utxos.as_array() else {
        return 0;
    };

    let nested: Option<usize> = entries
        .iter()
        .map(|entry| entry.get("bchUtxos").and_then(Value::as_array).map(Vec::len))
        .sum();

    nested.unwrap_or(entries.len())
}
