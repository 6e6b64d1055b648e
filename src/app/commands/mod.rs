pub mod get_pubkey;
pub mod msg_check;
pub mod p2wdb_json;
pub mod p2wdb_pin;
pub mod token_update;
pub mod wallet_balance;

pub use get_pubkey::GetPubkeyCommand;
pub use msg_check::MsgCheckCommand;
pub use p2wdb_json::P2wdbJsonCommand;
pub use p2wdb_pin::P2wdbPinCommand;
pub use token_update::TokenUpdateCommand;
pub use wallet_balance::WalletBalanceCommand;

use crate::core::RunOutcome;
use crate::utils::error::CliError;

pub const WALLET_FLAG_MESSAGE: &str = "You must specify a wallet with the -n flag.";

/// Prints a command failure and converts it to the `0` sentinel.
pub(crate) fn report_failure<T>(command: &str, err: CliError) -> RunOutcome<T> {
    tracing::error!("❌ {} failed: {:?}", command, err);
    println!("Error in {}: {}", command, err);
    RunOutcome::Failed
}

/// Joins an explorer base URL and an entry hash or TXID.
pub(crate) fn explorer_link(base: &str, id: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), id)
}
