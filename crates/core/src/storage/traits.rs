use async_trait::async_trait;

use crate::errors::CoreError;

/// Key-value store holding serialized household profiles.
///
/// The store only moves opaque JSON strings around; it never interprets them.
/// Browser local storage, a directory of files or an in-memory map all fit.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait ProfileStore: Send + Sync {
    /// Human-readable name of this store (for logs/errors).
    fn name(&self) -> &str;

    /// Stored value for `key`, or `None` when nothing is stored under it.
    async fn load(&self, key: &str) -> Result<Option<String>, CoreError>;

    /// Store `json` under `key`, replacing any previous value.
    async fn save(&self, key: &str, json: &str) -> Result<(), CoreError>;

    /// Every key currently stored, including non-profile keys.
    async fn list_keys(&self) -> Result<Vec<String>, CoreError>;

    /// Remove everything from the store.
    async fn clear(&self) -> Result<(), CoreError>;
}
