//! `token-update`: point a token's mutable data address at a new CID.

use crate::adapters::SlpMutableData;
use crate::app::commands::{explorer_link, report_failure, WALLET_FLAG_MESSAGE};
use crate::config::CidFlags;
use crate::core::cid::to_ipfs_uri;
use crate::core::wallet_util::WalletUtil;
use crate::core::{ConfigProvider, MutableData, RunOutcome, Storage, Wallet};
use crate::utils::error::{CliError, Result};
use crate::utils::validation::require_flag;
use std::sync::Arc;

pub const NAME: &str = "token-update";
pub const CID_FLAG_MESSAGE: &str = "You must specify a CID with the -c flag.";

pub struct TokenUpdateCommand<S: Storage, C: ConfigProvider> {
    wallet_util: WalletUtil<S, C>,
    wallet: Option<Wallet>,
    slp_mutable_data: Option<Arc<dyn MutableData>>,
}

impl<S: Storage, C: ConfigProvider> TokenUpdateCommand<S, C> {
    pub fn new(wallet_util: WalletUtil<S, C>) -> Self {
        Self {
            wallet_util,
            wallet: None,
            slp_mutable_data: None,
        }
    }

    pub fn with_mutable_data(mut self, mutable_data: Arc<dyn MutableData>) -> Self {
        self.slp_mutable_data = Some(mutable_data);
        self
    }

    pub async fn run(&mut self, flags: &CidFlags) -> RunOutcome<String> {
        let result = async {
            Self::validate_flags(flags)?;
            self.instantiate_slp_data(flags).await?;

            let hex = self.update_mutable_data(flags).await?;
            let wallet = self
                .wallet
                .as_ref()
                .ok_or_else(|| CliError::validation("wallet not loaded"))?;
            let txid = self.wallet_util.broadcast_tx(wallet, &hex).await?;

            println!("Mutable data updated with TXID: {}", txid);
            println!(
                "{}",
                explorer_link(self.wallet_util.config().transaction_url(), &txid)
            );
            Ok(txid)
        }
        .await;

        match result {
            Ok(txid) => RunOutcome::Done(txid),
            Err(e) => report_failure(NAME, e),
        }
    }

    /// Loads the wallet and, unless one was injected, builds the mutable data
    /// client it pays with.
    pub async fn instantiate_slp_data(&mut self, flags: &CidFlags) -> Result<()> {
        let name = flags.name.as_deref().unwrap_or_default();
        let wallet = self.wallet_util.instance_wallet(name).await?;

        if self.slp_mutable_data.is_none() {
            self.slp_mutable_data = Some(Arc::new(SlpMutableData::new(
                wallet.clone(),
                self.wallet_util.get_rest_server(),
                self.wallet_util.signer(),
            )));
        }
        self.wallet = Some(wallet);
        Ok(())
    }

    /// Returns the hex of a transaction writing `ipfs://<cid>` to the MDA.
    pub async fn update_mutable_data(&self, flags: &CidFlags) -> Result<String> {
        let cid = require_flag(&flags.cid, CID_FLAG_MESSAGE)?;
        let mutable_data = self.slp_mutable_data.as_ref().ok_or_else(|| {
            CliError::validation("mutable data client must be instantiated first.")
        })?;

        let cid_str = to_ipfs_uri(cid);
        tracing::info!("📝 Writing {} to mutable data address", cid_str);

        mutable_data
            .write_cid_to_op_return(&cid_str)
            .await
            .inspect_err(|e| tracing::error!("Error in update_mutable_data(): {}", e))
    }

    pub fn validate_flags(flags: &CidFlags) -> Result<()> {
        require_flag(&flags.name, WALLET_FLAG_MESSAGE)?;
        require_flag(&flags.cid, CID_FLAG_MESSAGE)?;
        Ok(())
    }
}
