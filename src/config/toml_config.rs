use crate::core::ConfigProvider;
use crate::domain::model::{RestInterface, RestServer};
use crate::utils::error::{CliError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_WALLET_DIR: &str = ".wallets";
pub const DEFAULT_WALLET_SERVICE_URL: &str = "http://localhost:5001/bch";
pub const DEFAULT_P2WDB_SERVER_URL: &str = "https://p2wdb.fullstack.cash";
pub const DEFAULT_REST_URL: &str = "https://free-bch.fullstack.cash";
pub const DEFAULT_SIGNER_URL: &str = "http://localhost:5010";
pub const DEFAULT_P2WDB_ENTRY_URL: &str = "https://p2wdb.fullstack.cash/entry/hash";
pub const DEFAULT_TRANSACTION_URL: &str = "https://blockchair.com/bitcoin-cash/transaction";

const INTERFACES: [&str; 2] = ["rest-api", "consumer-api"];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub wallet: WalletConfig,
    pub services: ServicesConfig,
    pub explorer: ExplorerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WalletConfig {
    pub directory: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServicesConfig {
    pub wallet_service_url: String,
    /// IPFS ID of the wallet service that answers RPC lookups.
    pub selected_service: Option<String>,
    pub p2wdb_server_url: String,
    pub rest_url: String,
    pub interface: String,
    pub signer_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplorerConfig {
    pub p2wdb_entry_url: String,
    pub transaction_url: String,
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            directory: DEFAULT_WALLET_DIR.to_string(),
        }
    }
}

impl Default for ServicesConfig {
    fn default() -> Self {
        Self {
            wallet_service_url: DEFAULT_WALLET_SERVICE_URL.to_string(),
            selected_service: None,
            p2wdb_server_url: DEFAULT_P2WDB_SERVER_URL.to_string(),
            rest_url: DEFAULT_REST_URL.to_string(),
            interface: RestInterface::ConsumerApi.as_str().to_string(),
            signer_url: DEFAULT_SIGNER_URL.to_string(),
        }
    }
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            p2wdb_entry_url: DEFAULT_P2WDB_ENTRY_URL.to_string(),
            transaction_url: DEFAULT_TRANSACTION_URL.to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(CliError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string. Missing keys take defaults.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| CliError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replace `${VAR_NAME}` with the environment value. Unset variables are
    /// left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| CliError::ConfigError {
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn with_wallet_dir(mut self, directory: Option<String>) -> Self {
        if let Some(directory) = directory {
            self.wallet.directory = directory;
        }
        self
    }

    pub fn wallet_dir(&self) -> &str {
        &self.wallet.directory
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_path("wallet.directory", &self.wallet.directory)?;

        validation::validate_url("services.wallet_service_url", &self.services.wallet_service_url)?;
        validation::validate_url("services.p2wdb_server_url", &self.services.p2wdb_server_url)?;
        validation::validate_url("services.rest_url", &self.services.rest_url)?;
        validation::validate_url("services.signer_url", &self.services.signer_url)?;
        validation::validate_one_of("services.interface", &self.services.interface, &INTERFACES)?;

        if let Some(service) = &self.services.selected_service {
            validation::validate_non_empty_string("services.selected_service", service)?;
        }

        validation::validate_url("explorer.p2wdb_entry_url", &self.explorer.p2wdb_entry_url)?;
        validation::validate_url("explorer.transaction_url", &self.explorer.transaction_url)?;

        Ok(())
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

impl ConfigProvider for AppConfig {
    fn wallet_service_url(&self) -> &str {
        &self.services.wallet_service_url
    }

    fn selected_service(&self) -> Option<&str> {
        self.services.selected_service.as_deref()
    }

    fn p2wdb_server_url(&self) -> &str {
        &self.services.p2wdb_server_url
    }

    fn rest_server(&self) -> RestServer {
        RestServer {
            rest_url: self.services.rest_url.clone(),
            interface: RestInterface::parse(&self.services.interface)
                .unwrap_or(RestInterface::ConsumerApi),
        }
    }

    fn signer_url(&self) -> &str {
        &self.services.signer_url
    }

    fn p2wdb_entry_url(&self) -> &str {
        &self.explorer.p2wdb_entry_url
    }

    fn transaction_url(&self) -> &str {
        &self.explorer.transaction_url
    }
}
