//! walletgen - deterministic multi-chain HD wallet generation
//!
//! This library derives ordered, reproducible Ethereum (secp256k1) and
//! Solana (Ed25519) accounts from a BIP-39 recovery phrase, using all-hardened
//! `m/44'/coin'/account'/0'` paths, and manages the resulting per-chain wallet
//! lists behind a pluggable persistence store.

pub mod error;
pub mod crypto;
pub mod account;
pub mod storage;
pub mod balance;

// Re-export commonly used types for convenience
pub use account::{ChainWallet, CollectionState, EthereumWallet, SolanaWallet, WalletCollection, WalletManager};
pub use crypto::keys::Chain;
pub use error::{Error, Result};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
