//! CLI configuration

use std::path::PathBuf;
use std::time::Duration;

use walletgen::crypto::mnemonic::MnemonicStrength;
use walletgen::Chain;

/// Runtime configuration, read from the environment and overridden by flags
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding the per-chain wallet records
    pub data_dir: PathBuf,
    pub ethereum_rpc_url: String,
    pub solana_rpc_url: String,
    pub rpc_timeout_seconds: u64,
    /// Length of phrases generated for empty collections
    pub mnemonic_strength: MnemonicStrength,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
            ethereum_rpc_url: "https://cloudflare-eth.com".to_string(),
            solana_rpc_url: "https://api.mainnet-beta.solana.com".to_string(),
            rpc_timeout_seconds: 30,
            mnemonic_strength: MnemonicStrength::Words12,
        }
    }
}

impl Config {
    /// Create configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let rpc_timeout_seconds = lookup("WALLETGEN_RPC_TIMEOUT")
            .and_then(|value| value.parse().ok())
            .unwrap_or(defaults.rpc_timeout_seconds);

        let mnemonic_strength = lookup("WALLETGEN_WORDS")
            .and_then(|value| value.parse().ok())
            .and_then(MnemonicStrength::from_word_count)
            .unwrap_or(defaults.mnemonic_strength);

        Self {
            data_dir: lookup("WALLETGEN_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            ethereum_rpc_url: lookup("ETH_RPC_URL").unwrap_or(defaults.ethereum_rpc_url),
            solana_rpc_url: lookup("SOL_RPC_URL").unwrap_or(defaults.solana_rpc_url),
            rpc_timeout_seconds,
            mnemonic_strength,
        }
    }

    pub fn rpc_url(&self, chain: Chain) -> &str {
        match chain {
            Chain::Ethereum => &self.ethereum_rpc_url,
            Chain::Solana => &self.solana_rpc_url,
        }
    }

    pub fn rpc_timeout(&self) -> Duration {
        Duration::from_secs(self.rpc_timeout_seconds)
    }
}
