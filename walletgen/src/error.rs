//! Error types for the walletgen library

use thiserror::Error;

/// Custom error type for walletgen operations
#[derive(Error, Debug)]
pub enum Error {
    /// The phrase failed word-list or checksum validation
    #[error("Invalid mnemonic: {0}")]
    InvalidMnemonic(String),

    /// The derivation path is empty or contains a non-hardened or out-of-range index
    #[error("Invalid derivation path: {0}")]
    InvalidPath(String),

    #[error("Unsupported chain: {0}")]
    UnsupportedChain(String),

    /// The derived key material is not a valid private key for the target curve
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    /// The collection was restored from storage and needs its recovery phrase re-entered
    #[error("Recovery phrase required to continue deriving {0} wallets")]
    MnemonicRequired(String),

    #[error("Wallet index {index} out of range (collection holds {len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Balance lookup error: {0}")]
    Balance(String),
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Result type for walletgen operations
pub type Result<T> = std::result::Result<T, Error>;
