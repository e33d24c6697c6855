//! In-memory wallet store

use std::collections::HashMap;
use std::sync::RwLock;

use super::WalletStore;
use crate::error::{Error, Result};

/// Process-local store, mostly useful in tests and embedders
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a record exists under `key`
    pub fn contains(&self, key: &str) -> bool {
        self.records
            .read()
            .map(|records| records.contains_key(key))
            .unwrap_or(false)
    }
}

fn poisoned() -> Error {
    Error::Storage("memory store lock poisoned".to_string())
}

impl WalletStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let records = self.records.read().map_err(|_| poisoned())?;
        Ok(records.get(key).cloned())
    }

    fn save(&self, key: &str, bytes: &[u8]) -> Result<()> {
        let mut records = self.records.write().map_err(|_| poisoned())?;
        records.insert(key.to_string(), bytes.to_vec());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut records = self.records.write().map_err(|_| poisoned())?;
        records.remove(key);
        Ok(())
    }
}
