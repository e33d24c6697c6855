//! Key derivation and management
//!
//! This module provides functionality for deriving keys for the supported
//! chains and turning them into chain-native wallet records.

pub mod ethereum;
pub mod solana;
mod derivation;

use std::fmt;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub use derivation::*;
pub use ethereum::EthereumAdapter;
pub use solana::SolanaAdapter;

/// Supported chains
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Chain {
    /// Ethereum and EVM compatible chains (secp256k1)
    Ethereum,
    /// Solana (Ed25519)
    Solana,
}

impl Chain {
    pub const ALL: [Chain; 2] = [Chain::Ethereum, Chain::Solana];

    /// SLIP-44 coin type
    pub fn coin_type(&self) -> u32 {
        match self {
            Self::Ethereum => 60,
            Self::Solana => 501,
        }
    }

    /// Logical name of the persisted wallet list
    pub fn storage_key(&self) -> &'static str {
        match self {
            Self::Ethereum => "ethereumWallets",
            Self::Solana => "solanaWallets",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Ethereum => "ethereum",
            Self::Solana => "solana",
        }
    }

    /// Path of the wallet at position `index` of this chain's collection
    pub fn account_path(&self, index: u32) -> Result<DerivationPath> {
        DerivationPath::bip44_account(self.coin_type(), index)
    }
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Chain {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ethereum" | "eth" => Ok(Self::Ethereum),
            "solana" | "sol" => Ok(Self::Solana),
            other => Err(Error::UnsupportedChain(other.to_string())),
        }
    }
}

/// Turns derived key material into a chain-native wallet record
///
/// Implementations are pure: no I/O, same input always gives the same wallet.
pub trait ChainKeyAdapter {
    /// The exported wallet record for this chain
    type Wallet: Clone + fmt::Debug + PartialEq + Serialize + DeserializeOwned + Send;

    const CHAIN: Chain;

    /// Build the wallet for a 32-byte private key
    fn derive_wallet(key: &KeyMaterial) -> Result<Self::Wallet>;

    /// Identifier handed to balance lookups (address or public key)
    fn public_identifier(wallet: &Self::Wallet) -> &str;
}

/// Derive the wallet at account `index` for the adapter's chain
pub fn derive_account_wallet<A: ChainKeyAdapter>(seed: &[u8], index: u32) -> Result<A::Wallet> {
    let path = A::CHAIN.account_path(index)?;
    let key = derive_key_material(seed, &path)?;
    A::derive_wallet(&key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_constants() {
        assert_eq!(Chain::Ethereum.coin_type(), 60);
        assert_eq!(Chain::Solana.coin_type(), 501);
        assert_eq!(Chain::Ethereum.storage_key(), "ethereumWallets");
        assert_eq!(Chain::Solana.storage_key(), "solanaWallets");
    }

    #[test]
    fn test_chain_from_str() {
        assert_eq!("ETH".parse::<Chain>().unwrap(), Chain::Ethereum);
        assert_eq!("solana".parse::<Chain>().unwrap(), Chain::Solana);
        assert!(matches!(
            "bitcoin".parse::<Chain>(),
            Err(Error::UnsupportedChain(name)) if name == "bitcoin"
        ));
    }

    #[test]
    fn test_account_path() {
        assert_eq!(Chain::Ethereum.account_path(2).unwrap().to_string(), "m/44'/60'/2'/0'");
        assert_eq!(Chain::Solana.account_path(0).unwrap().to_string(), "m/44'/501'/0'/0'");
    }
}
