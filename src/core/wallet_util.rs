use crate::adapters::{SignerClient, WalletServiceClient};
use crate::core::{ConfigProvider, Signer, Storage, WalletApi};
use crate::domain::model::{RestServer, Wallet, WalletFile};
use crate::utils::error::{CliError, Result};
use std::sync::Arc;

/// Wallet file access plus the collaborator handles every command shares.
pub struct WalletUtil<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    wallet_api: Arc<dyn WalletApi>,
    signer: Arc<dyn Signer>,
}

impl<S: Storage, C: ConfigProvider> WalletUtil<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        let wallet_api = Arc::new(WalletServiceClient::from_config(&config));
        let signer = Arc::new(SignerClient::from_config(&config));
        Self::with_services(storage, config, wallet_api, signer)
    }

    pub fn with_services(
        storage: S,
        config: C,
        wallet_api: Arc<dyn WalletApi>,
        signer: Arc<dyn Signer>,
    ) -> Self {
        Self {
            storage,
            config,
            wallet_api,
            signer,
        }
    }

    pub fn config(&self) -> &C {
        &self.config
    }

    pub fn wallet_api(&self) -> Arc<dyn WalletApi> {
        self.wallet_api.clone()
    }

    pub fn signer(&self) -> Arc<dyn Signer> {
        self.signer.clone()
    }

    /// Loads `<name>.json` from the wallet directory.
    pub async fn instance_wallet(&self, name: &str) -> Result<Wallet> {
        if name.is_empty() {
            return Err(CliError::validation("filename is required."));
        }

        let filename = format!("{}.json", name);
        let data = self.storage.read_file(&filename).await.map_err(|e| match e {
            CliError::IoError(io) if io.kind() == std::io::ErrorKind::NotFound => {
                CliError::WalletError {
                    message: format!("wallet '{}' not found ({})", name, filename),
                }
            }
            other => other,
        })?;

        let file: WalletFile = serde_json::from_slice(&data).map_err(|e| CliError::WalletError {
            message: format!("could not parse wallet file {}: {}", filename, e),
        })?;

        tracing::debug!("👛 Loaded wallet '{}' ({})", name, file.wallet.cash_address);
        Ok(Wallet {
            name: name.to_string(),
            info: file.wallet,
        })
    }

    pub fn get_p2wdb_server(&self) -> String {
        self.config.p2wdb_server_url().to_string()
    }

    pub fn get_rest_server(&self) -> RestServer {
        self.config.rest_server()
    }

    /// Broadcasts a transaction built for `wallet`, returning the TXID.
    pub async fn broadcast_tx(&self, wallet: &Wallet, hex: &str) -> Result<String> {
        tracing::info!("📡 Broadcasting transaction for wallet '{}'", wallet.name);
        self.wallet_api.send_tx(hex).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::cli::LocalStorage;
    use crate::config::toml_config::AppConfig;
    use crate::test_support::{wallet, wallet_json, MockSigner, MockWalletApi};
    use tempfile::TempDir;

    fn util_in(dir: &TempDir) -> (WalletUtil<LocalStorage, AppConfig>, Arc<MockWalletApi>) {
        let storage = LocalStorage::new(dir.path().to_str().unwrap().to_string());
        let wallet_api = Arc::new(MockWalletApi::with_txid("fake-txid"));
        let util = WalletUtil::with_services(
            storage,
            AppConfig::default(),
            wallet_api.clone(),
            Arc::new(MockSigner::default()),
        );
        (util, wallet_api)
    }

    #[tokio::test]
    async fn test_instance_wallet() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("test123.json"), wallet_json()).unwrap();
        let (util, _) = util_in(&dir);

        let wallet = util.instance_wallet("test123").await.unwrap();

        assert_eq!(wallet.name, "test123");
        assert_eq!(wallet.cash_address(), "bitcoincash:qqfake");
        assert_eq!(wallet.wif(), "L1fakeWif");
    }

    #[tokio::test]
    async fn test_instance_wallet_missing_file() {
        let dir = TempDir::new().unwrap();
        let (util, _) = util_in(&dir);

        let err = util.instance_wallet("nope").await.unwrap_err();
        assert!(matches!(err, CliError::WalletError { .. }));
        assert!(err.to_string().contains("nope"));
    }

    #[tokio::test]
    async fn test_instance_wallet_malformed_file() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("broken.json"), "{ not json").unwrap();
        let (util, _) = util_in(&dir);

        let err = util.instance_wallet("broken").await.unwrap_err();
        assert!(err.to_string().contains("could not parse wallet file"));
    }

    #[tokio::test]
    async fn test_instance_wallet_requires_name() {
        let dir = TempDir::new().unwrap();
        let (util, _) = util_in(&dir);

        let err = util.instance_wallet("").await.unwrap_err();
        assert_eq!(err.to_string(), "filename is required.");
    }

    #[tokio::test]
    async fn test_servers_from_config() {
        let dir = TempDir::new().unwrap();
        let (util, _) = util_in(&dir);

        assert_eq!(util.get_p2wdb_server(), "https://p2wdb.fullstack.cash");
        assert_eq!(util.get_rest_server().rest_url, "https://free-bch.fullstack.cash");
    }

    #[tokio::test]
    async fn test_broadcast_tx() {
        let dir = TempDir::new().unwrap();
        let (util, wallet_api) = util_in(&dir);

        let txid = util.broadcast_tx(&wallet(), "0200fake").await.unwrap();

        assert_eq!(txid, "fake-txid");
        assert_eq!(wallet_api.broadcasts(), vec!["0200fake".to_string()]);
    }
}
