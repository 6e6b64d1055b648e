pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(test)]
pub(crate) mod test_support;

pub use config::toml_config::AppConfig;
pub use config::{cli::LocalStorage, Cli, Command};
pub use core::wallet_util::WalletUtil;
pub use utils::error::{CliError, Result};
