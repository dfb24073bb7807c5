use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::errors::CoreError;

use super::traits::ProfileStore;

/// Profile store backed by a map in memory. Useful for tests and for hosts
/// that persist the whole map themselves.
#[derive(Debug, Default)]
pub struct MemoryProfileStore {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> Result<MutexGuard<'_, BTreeMap<String, String>>, CoreError> {
        self.entries
            .lock()
            .map_err(|_| CoreError::Storage("memory profile store lock poisoned".into()))
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl ProfileStore for MemoryProfileStore {
    fn name(&self) -> &str {
        "MemoryProfileStore"
    }

    async fn load(&self, key: &str) -> Result<Option<String>, CoreError> {
        Ok(self.entries()?.get(key).cloned())
    }

    async fn save(&self, key: &str, json: &str) -> Result<(), CoreError> {
        self.entries()?.insert(key.to_string(), json.to_string());
        Ok(())
    }

    async fn list_keys(&self) -> Result<Vec<String>, CoreError> {
        Ok(self.entries()?.keys().cloned().collect())
    }

    async fn clear(&self) -> Result<(), CoreError> {
        self.entries()?.clear();
        Ok(())
    }
}
