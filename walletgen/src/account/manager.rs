//! Both chains' collections behind per-chain locks

use std::sync::{Arc, Mutex, MutexGuard};

use super::collection::{CollectionState, WalletCollection};
use super::wallet::ChainWallet;
use crate::crypto::keys::{Chain, ChainKeyAdapter, EthereumAdapter, SolanaAdapter};
use crate::crypto::mnemonic::MnemonicStrength;
use crate::error::{Error, Result};
use crate::storage::WalletStore;

/// Chain-erased view of a [`WalletCollection`]
trait ManagedCollection: Send {
    fn generate_next(&mut self, input_phrase: Option<&str>) -> Result<ChainWallet>;
    fn delete_at(&mut self, index: usize) -> Result<ChainWallet>;
    fn delete_all(&mut self) -> Result<()>;
    fn wallets(&self) -> Vec<ChainWallet>;
    fn mnemonic(&self) -> Option<String>;
    fn state(&self) -> CollectionState;
}

impl<A> ManagedCollection for WalletCollection<A>
where
    A: ChainKeyAdapter,
    A::Wallet: Into<ChainWallet>,
{
    fn generate_next(&mut self, input_phrase: Option<&str>) -> Result<ChainWallet> {
        WalletCollection::generate_next(self, input_phrase).map(Into::into)
    }

    fn delete_at(&mut self, index: usize) -> Result<ChainWallet> {
        WalletCollection::delete_at(self, index).map(Into::into)
    }

    fn delete_all(&mut self) -> Result<()> {
        WalletCollection::delete_all(self)
    }

    fn wallets(&self) -> Vec<ChainWallet> {
        WalletCollection::wallets(self).iter().cloned().map(Into::into).collect()
    }

    fn mnemonic(&self) -> Option<String> {
        WalletCollection::mnemonic(self)
    }

    fn state(&self) -> CollectionState {
        WalletCollection::state(self)
    }
}

/// Owns one collection per chain
///
/// Each chain has its own mutex, so `generate_next`, `delete_at` and
/// `delete_all` on one chain are serialized while the other chain stays
/// available.
pub struct WalletManager {
    ethereum: Mutex<Box<dyn ManagedCollection>>,
    solana: Mutex<Box<dyn ManagedCollection>>,
}

impl WalletManager {
    /// Load both chains' collections from `store`
    pub fn open(store: Arc<dyn WalletStore>) -> Result<Self> {
        Self::open_with_strength(store, MnemonicStrength::default())
    }

    /// Like [`WalletManager::open`], choosing the length of generated phrases
    pub fn open_with_strength(store: Arc<dyn WalletStore>, strength: MnemonicStrength) -> Result<Self> {
        let ethereum = WalletCollection::<EthereumAdapter>::open(store.clone())?.with_strength(strength);
        let solana = WalletCollection::<SolanaAdapter>::open(store)?.with_strength(strength);

        Ok(Self {
            ethereum: Mutex::new(Box::new(ethereum)),
            solana: Mutex::new(Box::new(solana)),
        })
    }

    fn collection(&self, chain: Chain) -> Result<MutexGuard<'_, Box<dyn ManagedCollection>>> {
        let lock = match chain {
            Chain::Ethereum => &self.ethereum,
            Chain::Solana => &self.solana,
        };
        lock.lock()
            .map_err(|_| Error::Storage(format!("{} collection lock poisoned", chain)))
    }

    pub fn generate_next(&self, chain: Chain, input_phrase: Option<&str>) -> Result<ChainWallet> {
        self.collection(chain)?.generate_next(input_phrase)
    }

    pub fn delete_at(&self, chain: Chain, index: usize) -> Result<ChainWallet> {
        self.collection(chain)?.delete_at(index)
    }

    pub fn delete_all(&self, chain: Chain) -> Result<()> {
        self.collection(chain)?.delete_all()
    }

    pub fn wallets(&self, chain: Chain) -> Result<Vec<ChainWallet>> {
        Ok(self.collection(chain)?.wallets())
    }

    pub fn mnemonic(&self, chain: Chain) -> Result<Option<String>> {
        Ok(self.collection(chain)?.mnemonic())
    }

    pub fn state(&self, chain: Chain) -> Result<CollectionState> {
        Ok(self.collection(chain)?.state())
    }
}
