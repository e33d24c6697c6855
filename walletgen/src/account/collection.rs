//! Ordered, per-chain wallet collection
//!
//! A collection starts `Empty`, becomes `Seeded` when its first wallet is
//! generated and falls back to `Empty` when its last wallet is deleted.
//! Wallets loaded from storage in a fresh process put it in `Restored`: the
//! list is known but the recovery phrase is not, so one must be re-entered
//! before more wallets can be derived.
//!
//! The derivation index of a new wallet is the current length of the list.
//! Deleting wallets and generating again therefore reuses indices and
//! reproduces keys that were derived before.

use std::marker::PhantomData;
use std::sync::Arc;

use crate::crypto::keys::{derive_account_wallet, Chain, ChainKeyAdapter};
use crate::crypto::mnemonic::{generate_mnemonic, parse_mnemonic, MnemonicStrength, RecoveryPhrase};
use crate::error::{Error, Result};
use crate::storage::WalletStore;

/// Observable lifecycle state of a collection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionState {
    /// No wallets and no recovery phrase
    Empty,
    /// Wallets derived in this session from a known recovery phrase
    Seeded,
    /// Wallets loaded from storage, recovery phrase unknown
    Restored,
}

enum Phase {
    Empty,
    Seeded(RecoveryPhrase),
    Restored,
}

/// The wallets of one chain plus the phrase that seeded them
pub struct WalletCollection<A: ChainKeyAdapter> {
    store: Arc<dyn WalletStore>,
    phase: Phase,
    wallets: Vec<A::Wallet>,
    strength: MnemonicStrength,
    _adapter: PhantomData<fn() -> A>,
}

impl<A: ChainKeyAdapter> WalletCollection<A> {
    /// Load the chain's persisted list from `store`
    ///
    /// An absent record or an empty list opens an `Empty` collection.
    pub fn open(store: Arc<dyn WalletStore>) -> Result<Self> {
        let wallets: Vec<A::Wallet> = match store.load(A::CHAIN.storage_key())? {
            Some(bytes) => serde_json::from_slice(&bytes)?,
            None => Vec::new(),
        };

        let phase = if wallets.is_empty() { Phase::Empty } else { Phase::Restored };
        tracing::debug!(chain = %A::CHAIN, wallets = wallets.len(), "opened wallet collection");

        Ok(Self {
            store,
            phase,
            wallets,
            strength: MnemonicStrength::default(),
            _adapter: PhantomData,
        })
    }

    /// Strength of phrases generated for an empty collection
    pub fn with_strength(mut self, strength: MnemonicStrength) -> Self {
        self.strength = strength;
        self
    }

    pub fn chain(&self) -> Chain {
        A::CHAIN
    }

    pub fn wallets(&self) -> &[A::Wallet] {
        &self.wallets
    }

    pub fn len(&self) -> usize {
        self.wallets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.wallets.is_empty()
    }

    pub fn state(&self) -> CollectionState {
        match self.phase {
            Phase::Empty => CollectionState::Empty,
            Phase::Seeded(_) => CollectionState::Seeded,
            Phase::Restored => CollectionState::Restored,
        }
    }

    /// The recovery phrase of a seeded collection, for the user to back up
    pub fn mnemonic(&self) -> Option<String> {
        match &self.phase {
            Phase::Seeded(phrase) => Some(phrase.phrase()),
            _ => None,
        }
    }

    /// Derive the next wallet and append it
    ///
    /// `input_phrase` is only consulted when the collection has no phrase
    /// yet: blank means generate a fresh one. A seeded collection ignores it.
    ///
    /// # Errors
    /// [`Error::InvalidMnemonic`] for a rejected phrase,
    /// [`Error::MnemonicRequired`] for a restored collection without one,
    /// and any derivation or storage failure. Nothing changes on error.
    pub fn generate_next(&mut self, input_phrase: Option<&str>) -> Result<A::Wallet> {
        let input = input_phrase.map(str::trim).filter(|phrase| !phrase.is_empty());

        let phrase = match (&self.phase, input) {
            (Phase::Seeded(phrase), _) => phrase.clone(),
            (Phase::Empty, None) => generate_mnemonic(self.strength)?,
            (Phase::Empty | Phase::Restored, Some(candidate)) => parse_mnemonic(candidate)
                .inspect_err(|e| tracing::warn!(chain = %A::CHAIN, error = %e, "rejected recovery phrase"))?,
            (Phase::Restored, None) => {
                return Err(Error::MnemonicRequired(A::CHAIN.to_string()));
            }
        };

        let index = u32::try_from(self.wallets.len())
            .map_err(|_| Error::InvalidPath(format!("account index {} too large", self.wallets.len())))?;

        let seed = phrase.to_seed("");
        let wallet = derive_account_wallet::<A>(seed.as_bytes(), index).inspect_err(|e| {
            tracing::error!(chain = %A::CHAIN, index, error = %e, "wallet derivation failed")
        })?;

        let mut wallets = self.wallets.clone();
        wallets.push(wallet.clone());
        self.persist(&wallets)?;

        self.wallets = wallets;
        self.phase = Phase::Seeded(phrase);
        tracing::info!(chain = %A::CHAIN, index, "generated wallet");

        Ok(wallet)
    }

    /// Remove the wallet at `index`, shifting later wallets down
    ///
    /// Removing the last wallet returns the collection to `Empty` and forgets
    /// its recovery phrase.
    pub fn delete_at(&mut self, index: usize) -> Result<A::Wallet> {
        if index >= self.wallets.len() {
            return Err(Error::IndexOutOfRange {
                index,
                len: self.wallets.len(),
            });
        }

        let mut wallets = self.wallets.clone();
        let removed = wallets.remove(index);
        self.persist(&wallets)?;

        self.wallets = wallets;
        if self.wallets.is_empty() {
            self.phase = Phase::Empty;
        }
        tracing::info!(chain = %A::CHAIN, index, remaining = self.wallets.len(), "deleted wallet");

        Ok(removed)
    }

    /// Remove every wallet and the persisted record, forgetting the phrase
    pub fn delete_all(&mut self) -> Result<()> {
        self.store.remove(A::CHAIN.storage_key())?;

        let removed = self.wallets.len();
        self.wallets.clear();
        self.phase = Phase::Empty;
        tracing::info!(chain = %A::CHAIN, removed, "deleted all wallets");

        Ok(())
    }

    fn persist(&self, wallets: &[A::Wallet]) -> Result<()> {
        let bytes = serde_json::to_vec(wallets)?;
        self.store.save(A::CHAIN.storage_key(), &bytes)
    }
}
