pub mod commands;

use crate::config::Command;
use crate::core::wallet_util::WalletUtil;
use crate::core::{ConfigProvider, Storage};
use commands::{
    GetPubkeyCommand, MsgCheckCommand, P2wdbJsonCommand, P2wdbPinCommand, TokenUpdateCommand,
    WalletBalanceCommand,
};

/// Runs one parsed subcommand and returns its printed result, `"0"` on
/// failure.
pub async fn dispatch<S: Storage, C: ConfigProvider>(
    command: &Command,
    wallet_util: WalletUtil<S, C>,
) -> String {
    tracing::debug!("▶️ Running {}", command.name());

    match command {
        Command::MsgCheck(flags) => MsgCheckCommand::new(wallet_util).run(flags).await.to_string(),
        Command::P2wdbJson(flags) => P2wdbJsonCommand::new(wallet_util)
            .run(flags)
            .await
            .to_string(),
        Command::P2wdbPin(flags) => P2wdbPinCommand::new(wallet_util)
            .run(flags)
            .await
            .to_string(),
        Command::TokenUpdate(flags) => TokenUpdateCommand::new(wallet_util)
            .run(flags)
            .await
            .to_string(),
        Command::WalletBalance(flags) => WalletBalanceCommand::new(wallet_util)
            .run(flags)
            .await
            .to_string(),
        Command::GetPubkey(flags) => GetPubkeyCommand::new(wallet_util)
            .run(flags)
            .await
            .to_string(),
    }
}
