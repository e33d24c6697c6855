//! Account management functionality
//!
//! Wallet records, the per-chain wallet collection and the manager that
//! serializes access to both chains.

mod collection;
mod manager;
mod wallet;

pub use collection::*;
pub use manager::*;
pub use wallet::*;

use crate::crypto::keys::{derive_account_wallet, Chain, EthereumAdapter, SolanaAdapter};
use crate::crypto::mnemonic::RecoveryPhrase;
use crate::error::Result;

/// Derive the wallet at account `index` of `chain` for a recovery phrase
pub fn derive_wallet(chain: Chain, mnemonic: &RecoveryPhrase, index: u32) -> Result<ChainWallet> {
    let seed = mnemonic.to_seed("");
    match chain {
        Chain::Ethereum => derive_account_wallet::<EthereumAdapter>(seed.as_bytes(), index).map(Into::into),
        Chain::Solana => derive_account_wallet::<SolanaAdapter>(seed.as_bytes(), index).map(Into::into),
    }
}
