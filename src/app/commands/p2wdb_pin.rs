//! `p2wdb-pin`: pin an existing IPFS CID across the P2WDB pinning cluster.

use crate::adapters::P2wdbClient;
use crate::app::commands::{explorer_link, report_failure, WALLET_FLAG_MESSAGE};
use crate::config::CidFlags;
use crate::core::wallet_util::WalletUtil;
use crate::core::{ConfigProvider, P2wdbPin, RunOutcome, Storage};
use crate::utils::error::{CliError, Result};
use crate::utils::validation::require_flag;
use std::sync::Arc;

pub const NAME: &str = "p2wdb-pin";
pub const CID_FLAG_MESSAGE: &str = "You must specify an IPFS CID with the -c flag.";

pub struct P2wdbPinCommand<S: Storage, C: ConfigProvider> {
    wallet_util: WalletUtil<S, C>,
    pin: Option<Arc<dyn P2wdbPin>>,
}

impl<S: Storage, C: ConfigProvider> P2wdbPinCommand<S, C> {
    pub fn new(wallet_util: WalletUtil<S, C>) -> Self {
        Self {
            wallet_util,
            pin: None,
        }
    }

    pub fn with_pin(mut self, pin: Arc<dyn P2wdbPin>) -> Self {
        self.pin = Some(pin);
        self
    }

    pub async fn run(&mut self, flags: &CidFlags) -> RunOutcome<String> {
        let result = async {
            Self::validate_flags(flags)?;

            if self.pin.is_none() {
                self.instantiate_pin(flags).await?;
            }

            let hash = self.pin_cid(flags).await?;
            let entry_url = self.wallet_util.config().p2wdb_entry_url();
            println!("{}", explorer_link(entry_url, &hash));
            Ok(hash)
        }
        .await;

        match result {
            Ok(hash) => RunOutcome::Done(hash),
            Err(e) => report_failure(NAME, e),
        }
    }

    pub async fn instantiate_pin(&mut self, flags: &CidFlags) -> Result<()> {
        let name = flags.name.as_deref().unwrap_or_default();
        let wallet = self.wallet_util.instance_wallet(name).await?;

        self.pin = Some(Arc::new(P2wdbClient::new(
            self.wallet_util.get_p2wdb_server(),
            wallet,
            self.wallet_util.get_rest_server(),
            self.wallet_util.signer(),
            self.wallet_util.wallet_api(),
        )));
        Ok(())
    }

    /// Pins `flags.cid` and returns the P2WDB entry hash.
    pub async fn pin_cid(&self, flags: &CidFlags) -> Result<String> {
        let cid = require_flag(&flags.cid, CID_FLAG_MESSAGE)?;
        let pin = self
            .pin
            .as_ref()
            .ok_or_else(|| CliError::validation("P2WDB pin client must be instantiated first."))?;

        let result = pin.cid(cid).await?;
        tracing::debug!("📌 pin result: {:?}", result);

        Ok(result.hash.into_string())
    }

    pub fn validate_flags(flags: &CidFlags) -> Result<()> {
        require_flag(&flags.name, WALLET_FLAG_MESSAGE)?;
        require_flag(&flags.cid, CID_FLAG_MESSAGE)?;
        Ok(())
    }
}
