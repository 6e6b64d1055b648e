//! `p2wdb-json`: write a JSON object to the P2WDB and pin it to IPFS.

use crate::adapters::P2wdbClient;
use crate::app::commands::{explorer_link, report_failure, WALLET_FLAG_MESSAGE};
use crate::config::JsonFlags;
use crate::core::wallet_util::WalletUtil;
use crate::core::{ConfigProvider, P2wdbPin, P2wdbWrite, RunOutcome, Storage, Wallet};
use crate::utils::error::{CliError, Result};
use crate::utils::validation::require_flag;
use serde_json::Value;
use std::sync::Arc;

pub const NAME: &str = "p2wdb-json";
pub const TOKEN_DATA_APP_ID: &str = "token-data-001";
pub const JSON_FLAG_MESSAGE: &str = "You must specify a JSON string with the -j flag.";

pub struct P2wdbJsonCommand<S: Storage, C: ConfigProvider> {
    wallet_util: WalletUtil<S, C>,
    wallet: Option<Wallet>,
    write: Option<Arc<dyn P2wdbWrite>>,
    pin: Option<Arc<dyn P2wdbPin>>,
}

impl<S: Storage, C: ConfigProvider> P2wdbJsonCommand<S, C> {
    pub fn new(wallet_util: WalletUtil<S, C>) -> Self {
        Self {
            wallet_util,
            wallet: None,
            write: None,
            pin: None,
        }
    }

    pub fn with_write(mut self, write: Arc<dyn P2wdbWrite>) -> Self {
        self.write = Some(write);
        self
    }

    pub fn with_pin(mut self, pin: Arc<dyn P2wdbPin>) -> Self {
        self.pin = Some(pin);
        self
    }

    pub async fn run(&mut self, flags: &JsonFlags) -> RunOutcome<String> {
        let result = async {
            Self::validate_flags(flags)?;

            if self.write.is_none() {
                self.instantiate_write(flags).await?;
            }
            if self.pin.is_none() {
                self.instantiate_pin(flags).await?;
            }

            let cid = self.pin_json(flags).await?;
            println!("JSON data pinned to IPFS with this CID: {}", cid);
            Ok(cid)
        }
        .await;

        match result {
            Ok(cid) => RunOutcome::Done(cid),
            Err(e) => report_failure(NAME, e),
        }
    }

    async fn load_wallet(&mut self, flags: &JsonFlags) -> Result<Wallet> {
        if let Some(wallet) = &self.wallet {
            return Ok(wallet.clone());
        }

        let name = flags.name.as_deref().unwrap_or_default();
        let wallet = self.wallet_util.instance_wallet(name).await?;
        self.wallet = Some(wallet.clone());
        Ok(wallet)
    }

    fn client_for(&self, wallet: Wallet) -> P2wdbClient {
        P2wdbClient::new(
            self.wallet_util.get_p2wdb_server(),
            wallet,
            self.wallet_util.get_rest_server(),
            self.wallet_util.signer(),
            self.wallet_util.wallet_api(),
        )
    }

    /// Builds the P2WDB write client for the wallet named in `flags`.
    pub async fn instantiate_write(&mut self, flags: &JsonFlags) -> Result<()> {
        let wallet = self.load_wallet(flags).await?;
        self.write = Some(Arc::new(self.client_for(wallet)));
        tracing::debug!("✍️ P2WDB write client ready");
        Ok(())
    }

    /// Builds the pinning client; pin requests are paid by the same wallet.
    pub async fn instantiate_pin(&mut self, flags: &JsonFlags) -> Result<()> {
        let wallet = self.load_wallet(flags).await?;
        self.pin = Some(Arc::new(self.client_for(wallet)));
        tracing::debug!("📌 P2WDB pin client ready");
        Ok(())
    }

    /// Writes the JSON to the P2WDB, converts the entry into an IPFS CID and
    /// pins that CID across the cluster. Returns the CID.
    pub async fn pin_json(&self, flags: &JsonFlags) -> Result<String> {
        let result = async {
            let json_str = require_flag(&flags.json, JSON_FLAG_MESSAGE)?;
            let data: Value = serde_json::from_str(json_str)?;

            let (write, pin) = match (&self.write, &self.pin) {
                (Some(write), Some(pin)) => (write, pin),
                _ => {
                    return Err(CliError::validation(
                        "P2WDB clients must be instantiated before pinning.",
                    ))
                }
            };
            let entry_url = self.wallet_util.config().p2wdb_entry_url();

            let entry = write.post_entry(data, TOKEN_DATA_APP_ID).await?;
            let zcid = entry.hash.into_string();
            println!("Data added to P2WDB with this zcid: {}", zcid);
            println!("{}\n", explorer_link(entry_url, &zcid));

            let cid = pin.json(&zcid).await?;
            println!("JSON CID: {}", cid);

            let pinned = pin.cid(&cid).await?;
            println!("Data pinned across the P2WDB Pinning Cluster.");
            println!("{}\n", explorer_link(entry_url, pinned.hash.as_str()));

            Ok(cid)
        }
        .await;

        result.inspect_err(|e| tracing::error!("Error in pin_json(): {}", e))
    }

    pub fn validate_flags(flags: &JsonFlags) -> Result<()> {
        require_flag(&flags.name, WALLET_FLAG_MESSAGE)?;
        require_flag(&flags.json, JSON_FLAG_MESSAGE)?;
        Ok(())
    }
}
