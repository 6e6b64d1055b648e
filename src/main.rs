use anyhow::Context;
use clap::Parser;
use p2wdb_cli::utils::{logger, validation::Validate};
use p2wdb_cli::{app, AppConfig, Cli, LocalStorage, WalletUtil};

fn load_config(cli: &Cli) -> anyhow::Result<AppConfig> {
    let config = match &cli.config {
        Some(path) => AppConfig::from_file(path)
            .with_context(|| format!("failed to load config file {}", path.display()))?,
        None => AppConfig::default(),
    };
    let config = config.with_wallet_dir(cli.wallet_dir.clone());

    config.validate().context("invalid configuration")?;
    Ok(config)
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if cli.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }
    tracing::debug!("CLI args: {:?}", cli);

    // Every failure is reported on stdout and the process still exits 0.
    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Configuration failed: {:#}", e);
            println!("Error in {}: {:#}", cli.command.name(), e);
            return;
        }
    };

    let storage = LocalStorage::new(config.wallet_dir().to_string());
    let wallet_util = WalletUtil::new(storage, config);

    let result = app::dispatch(&cli.command, wallet_util).await;
    tracing::debug!("{} returned {}", cli.command.name(), result);
}
