use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Hex decode error: {0}")]
    HexError(#[from] hex::FromHexError),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    /// Flag and input validation. Displays the bare message, which is what the
    /// user sees.
    #[error("{message}")]
    ValidationError { message: String },

    #[error("Wallet error: {message}")]
    WalletError { message: String },

    #[error("{service} error: {message}")]
    ServiceError { service: String, message: String },
}

impl CliError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError {
            message: message.into(),
        }
    }

    pub fn service(service: &str, message: impl Into<String>) -> Self {
        Self::ServiceError {
            service: service.to_string(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CliError>;
