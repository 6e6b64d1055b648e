use serde::{Deserialize, Serialize};

/// On-disk wallet file, `<wallet_dir>/<name>.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalletFile {
    pub wallet: WalletInfo,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletInfo {
    pub cash_address: String,
    /// WIF-encoded private key.
    pub private_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mnemonic: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slp_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legacy_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hd_path: Option<String>,
}

/// A wallet loaded by name.
#[derive(Debug, Clone)]
pub struct Wallet {
    pub name: String,
    pub info: WalletInfo,
}

impl Wallet {
    pub fn cash_address(&self) -> &str {
        &self.info.cash_address
    }

    pub fn wif(&self) -> &str {
        &self.info.private_key
    }
}

/// A message signal found on chain: a memo post announcing an encrypted
/// message stored on IPFS.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageSignal {
    pub sender: String,
    pub txid: String,
    pub subject: String,
    pub ipfs_hash: String,
    #[serde(default)]
    pub time: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RestInterface {
    #[serde(rename = "rest-api")]
    RestApi,
    #[serde(rename = "consumer-api")]
    ConsumerApi,
}

impl RestInterface {
    pub fn as_str(&self) -> &'static str {
        match self {
            RestInterface::RestApi => "rest-api",
            RestInterface::ConsumerApi => "consumer-api",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "rest-api" => Some(RestInterface::RestApi),
            "consumer-api" => Some(RestInterface::ConsumerApi),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestServer {
    #[serde(rename = "restURL")]
    pub rest_url: String,
    pub interface: RestInterface,
}

/// Entry hash returned by a P2WDB write. Writes paid in PSF come back with the
/// hash wrapped one level deeper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntryHash {
    Plain(String),
    Nested { hash: String },
}

impl EntryHash {
    pub fn as_str(&self) -> &str {
        match self {
            EntryHash::Plain(hash) => hash,
            EntryHash::Nested { hash } => hash,
        }
    }

    pub fn into_string(self) -> String {
        match self {
            EntryHash::Plain(hash) => hash,
            EntryHash::Nested { hash } => hash,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WriteResult {
    #[serde(default)]
    pub success: Option<bool>,
    pub hash: EntryHash,
}

/// Result of a command's `run()`. Failures have already been printed and map
/// to the `0` sentinel.
#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome<T> {
    Done(T),
    Failed,
}

impl<T> RunOutcome<T> {
    pub fn is_failed(&self) -> bool {
        matches!(self, RunOutcome::Failed)
    }

    pub fn done(self) -> Option<T> {
        match self {
            RunOutcome::Done(value) => Some(value),
            RunOutcome::Failed => None,
        }
    }
}

impl<T: std::fmt::Display> std::fmt::Display for RunOutcome<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunOutcome::Done(value) => write!(f, "{}", value),
            RunOutcome::Failed => write!(f, "0"),
        }
    }
}
