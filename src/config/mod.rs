pub mod cli;
pub mod toml_config;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "p2wdb-cli")]
#[command(version, about = "BCH wallet, P2WDB and IPFS pinning tools")]
pub struct Cli {
    /// Path to a TOML configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding <name>.json wallet files (overrides the config file)
    #[arg(long, global = true)]
    pub wallet_dir: Option<String>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Check signed messages
    MsgCheck(WalletFlags),

    /// Upload JSON to IPFS
    ///
    /// Writes a JSON object to the P2WDB, has the pinning service extract it as
    /// its own IPFS object, then pins the resulting CID across the P2WDB
    /// pinning cluster.
    #[command(name = "p2wdb-json")]
    P2wdbJson(JsonFlags),

    /// Pin an IPFS CID using the P2WDB pinning service
    ///
    /// Note: currently only files 1MB or less are supported.
    #[command(name = "p2wdb-pin")]
    P2wdbPin(CidFlags),

    /// Update token mutable data
    ///
    /// Writes a new CID to an OP_RETURN in a transaction published to the
    /// Mutable Data Address (MDA), as described in PS002. The wallet paying for
    /// the transaction must control the MDA, otherwise the update is ignored.
    /// Use p2wdb-json to get a CID for the new mutable data; the JSON should
    /// follow the PS007 token data schema.
    TokenUpdate(CidFlags),

    /// Show the balance and UTXO count of a wallet
    WalletBalance(WalletFlags),

    /// Look up the public key of a BCH address
    #[command(name = "get-pubkey")]
    GetPubkey(AddressFlags),
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::MsgCheck(_) => "msg-check",
            Command::P2wdbJson(_) => "p2wdb-json",
            Command::P2wdbPin(_) => "p2wdb-pin",
            Command::TokenUpdate(_) => "token-update",
            Command::WalletBalance(_) => "wallet-balance",
            Command::GetPubkey(_) => "get-pubkey",
        }
    }
}

// Flags are optional at the clap level so each command can report its own
// validation message.

#[derive(Debug, Clone, Default, Args)]
pub struct WalletFlags {
    /// Name of wallet
    #[arg(short = 'n', long)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Args)]
pub struct JsonFlags {
    /// Name of wallet
    #[arg(short = 'n', long)]
    pub name: Option<String>,

    /// A JSON string. Encase this argument in single quotes.
    #[arg(short = 'j', long)]
    pub json: Option<String>,
}

#[derive(Debug, Clone, Default, Args)]
pub struct CidFlags {
    /// Name of wallet
    #[arg(short = 'n', long)]
    pub name: Option<String>,

    /// IPFS CID
    #[arg(short = 'c', long)]
    pub cid: Option<String>,
}

#[derive(Debug, Clone, Default, Args)]
pub struct AddressFlags {
    /// BCH address
    #[arg(short = 'a', long)]
    pub address: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_p2wdb_json() {
        let cli = Cli::parse_from([
            "p2wdb-cli",
            "p2wdb-json",
            "-n",
            "test123",
            "-j",
            r#"{"a":"b"}"#,
        ]);
        match cli.command {
            Command::P2wdbJson(flags) => {
                assert_eq!(flags.name.as_deref(), Some("test123"));
                assert_eq!(flags.json.as_deref(), Some(r#"{"a":"b"}"#));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_token_update_with_global_flags() {
        let cli = Cli::parse_from([
            "p2wdb-cli",
            "token-update",
            "--name",
            "test123",
            "--cid",
            "bafyfake",
            "--wallet-dir",
            "/tmp/wallets",
            "-v",
        ]);
        assert!(cli.verbose);
        assert_eq!(cli.wallet_dir.as_deref(), Some("/tmp/wallets"));
        assert_eq!(cli.command.name(), "token-update");
    }

    #[test]
    fn test_missing_flags_still_parse() {
        let cli = Cli::parse_from(["p2wdb-cli", "p2wdb-pin"]);
        match cli.command {
            Command::P2wdbPin(flags) => {
                assert!(flags.name.is_none());
                assert!(flags.cid.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_command_names() {
        let cli = Cli::parse_from(["p2wdb-cli", "msg-check", "-n", "w"]);
        assert_eq!(cli.command.name(), "msg-check");
        let cli = Cli::parse_from(["p2wdb-cli", "get-pubkey", "-a", "bitcoincash:qq"]);
        assert_eq!(cli.command.name(), "get-pubkey");
        let cli = Cli::parse_from(["p2wdb-cli", "wallet-balance"]);
        assert_eq!(cli.command.name(), "wallet-balance");
    }
}
