//! Persistence for wallet lists
//!
//! The collection manager only sees [`WalletStore`], a small key-value
//! contract. Any backend that can load, save and remove byte records by key
//! satisfies it.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::error::Result;

/// Durable key-value storage for serialized wallet lists
pub trait WalletStore: Send + Sync {
    /// Read the record stored under `key`, `None` if absent
    fn load(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Replace the record stored under `key`
    fn save(&self, key: &str, bytes: &[u8]) -> Result<()>;

    /// Delete the record stored under `key`; absent keys are not an error
    fn remove(&self, key: &str) -> Result<()>;
}
