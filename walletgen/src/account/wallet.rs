//! Wallet records

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::crypto::keys::Chain;

/// An Ethereum account as exported to the user and persisted
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EthereumWallet {
    /// EIP-55 checksummed address
    pub address: String,
    /// `0x` followed by 64 lowercase hex digits
    pub private_key: String,
}

/// A Solana account as exported to the user and persisted
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolanaWallet {
    /// Base-58 public key
    pub public_key: String,
    /// Base-58 of the 64-byte secret and public key pair
    pub private_key: String,
}

impl fmt::Debug for EthereumWallet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EthereumWallet")
            .field("address", &self.address)
            .field("private_key", &"<redacted>")
            .finish()
    }
}

impl fmt::Debug for SolanaWallet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SolanaWallet")
            .field("public_key", &self.public_key)
            .field("private_key", &"<redacted>")
            .finish()
    }
}

/// A wallet of either chain
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ChainWallet {
    Ethereum(EthereumWallet),
    Solana(SolanaWallet),
}

impl ChainWallet {
    pub fn chain(&self) -> Chain {
        match self {
            Self::Ethereum(_) => Chain::Ethereum,
            Self::Solana(_) => Chain::Solana,
        }
    }

    /// Address or public key, whichever the chain uses to identify accounts
    pub fn public_identifier(&self) -> &str {
        match self {
            Self::Ethereum(wallet) => &wallet.address,
            Self::Solana(wallet) => &wallet.public_key,
        }
    }

    pub fn private_key(&self) -> &str {
        match self {
            Self::Ethereum(wallet) => &wallet.private_key,
            Self::Solana(wallet) => &wallet.private_key,
        }
    }
}

impl From<EthereumWallet> for ChainWallet {
    fn from(wallet: EthereumWallet) -> Self {
        Self::Ethereum(wallet)
    }
}

impl From<SolanaWallet> for ChainWallet {
    fn from(wallet: SolanaWallet) -> Self {
        Self::Solana(wallet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ethereum_wallet_json_shape() {
        let wallet = EthereumWallet {
            address: "0x2759A6Ad812b8A7B73A63a243816D66F5b72A0A7".to_string(),
            private_key: "0xbca4".to_string(),
        };
        let json = serde_json::to_value(&wallet).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "address": "0x2759A6Ad812b8A7B73A63a243816D66F5b72A0A7",
                "privateKey": "0xbca4",
            })
        );
    }

    #[test]
    fn test_solana_wallet_reads_stored_record() {
        let stored = r#"[{"publicKey":"HAgk14JpMQLgt6rVgv7cBQFJWFto5Dqxi472uT3DKpqk","privateKey":"27np"}]"#;
        let wallets: Vec<SolanaWallet> = serde_json::from_str(stored).unwrap();
        assert_eq!(wallets.len(), 1);
        assert_eq!(wallets[0].public_key, "HAgk14JpMQLgt6rVgv7cBQFJWFto5Dqxi472uT3DKpqk");
    }

    #[test]
    fn test_debug_redacts_private_key() {
        let wallet = SolanaWallet {
            public_key: "pub".to_string(),
            private_key: "very-secret".to_string(),
        };
        assert!(!format!("{:?}", wallet).contains("very-secret"));
        assert!(!format!("{:?}", ChainWallet::from(wallet)).contains("very-secret"));
    }
}
