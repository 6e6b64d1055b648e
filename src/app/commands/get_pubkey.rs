//! `get-pubkey`: look up the public key behind a BCH address.

use crate::app::commands::report_failure;
use crate::config::AddressFlags;
use crate::core::wallet_util::WalletUtil;
use crate::core::{ConfigProvider, RunOutcome, Storage};
use crate::utils::error::Result;
use crate::utils::validation::require_flag;
use serde_json::Value;

pub const NAME: &str = "get-pubkey";
pub const ADDRESS_FLAG_MESSAGE: &str = "You must specify a BCH address with the -a flag.";

/// Looks up the public key the network has seen for an address.
pub struct GetPubkeyCommand<S: Storage, C: ConfigProvider> {
    wallet_util: WalletUtil<S, C>,
}

impl<S: Storage, C: ConfigProvider> GetPubkeyCommand<S, C> {
    pub fn new(wallet_util: WalletUtil<S, C>) -> Self {
        Self { wallet_util }
    }

    pub async fn run(&self, flags: &AddressFlags) -> RunOutcome<Value> {
        let result = async {
            let address = require_flag(&flags.address, ADDRESS_FLAG_MESSAGE)?;
            self.get_pubkey(address).await
        }
        .await;

        match result {
            Ok(pubkey) => RunOutcome::Done(pubkey),
            Err(e) => report_failure(NAME, e),
        }
    }

    pub async fn get_pubkey(&self, address: &str) -> Result<Value> {
        let pubkey = self.wallet_util.wallet_api().get_pub_key(address).await?;
        println!("{}", serde_json::to_string_pretty(&pubkey)?);
        Ok(pubkey)
    }
}
