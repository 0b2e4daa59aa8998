use thiserror::Error;

use crate::core::store::StoreError;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Invalid Smart Contract function name: {0}")]
    UnknownOperation(String),

    #[error("Incorrect number of arguments. Expecting {expected}, got {actual}")]
    ArgumentCount {
        expected: usize,
        actual: usize,
    },

    #[error("Could not locate asset: {0}")]
    NotFound(String),

    #[error("Failed to write asset {key}: {cause}")]
    Persistence {
        key: String,
        cause: String,
    },

    #[error("Range scan failed: {0}")]
    Scan(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Codec error: {0}")]
    Codec(String),

    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, LedgerError>;

impl From<StoreError> for LedgerError {
    fn from(err: StoreError) -> Self {
        LedgerError::Store(err.to_string())
    }
}

impl From<serde_json::Error> for LedgerError {
    fn from(err: serde_json::Error) -> Self {
        LedgerError::Codec(err.to_string())
    }
}

impl From<toml::de::Error> for LedgerError {
    fn from(err: toml::de::Error) -> Self {
        LedgerError::Config(err.to_string())
    }
}
