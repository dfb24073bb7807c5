use log::{debug, info};

use crate::errors::CoreError;
use crate::models::household::Household;

use super::traits::ProfileStore;

/// Keys the host application keeps in the same store that are not profiles.
pub const RESERVED_KEYS: [&str; 3] = ["CurrentProfileName", "i18nextLng", "EODHistoricalDataApiKey"];

/// High-level profile operations: save/load a household to/from a [`ProfileStore`].
pub struct ProfileManager;

impl ProfileManager {
    /// Serialize a household snapshot to pretty-printed JSON.
    pub fn to_json(household: &Household) -> Result<String, CoreError> {
        serde_json::to_string_pretty(household)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize household: {e}")))
    }

    /// Deserialize a household snapshot and restore derived state.
    ///
    /// Flow: JSON → Household → re-derive account owners → validate
    pub fn from_json(json: &str) -> Result<Household, CoreError> {
        let mut household: Household = serde_json::from_str(json)
            .map_err(|e| CoreError::Deserialization(format!("Failed to deserialize household: {e}")))?;
        household.assign_owners();
        household.validate()?;
        Ok(household)
    }

    /// Save a household under `key`.
    pub async fn save(
        store: &dyn ProfileStore,
        key: &str,
        household: &Household,
    ) -> Result<(), CoreError> {
        let json = Self::to_json(household)?;
        store.save(key, &json).await?;
        debug!("saved profile '{key}' to {}", store.name());
        Ok(())
    }

    /// Load the household stored under `key`.
    pub async fn load(store: &dyn ProfileStore, key: &str) -> Result<Household, CoreError> {
        let json = store
            .load(key)
            .await?
            .ok_or_else(|| CoreError::ProfileNotFound(key.to_string()))?;
        let household = Self::from_json(&json)?;
        debug!(
            "loaded profile '{key}' from {}: {} people, {} accounts",
            store.name(),
            household.people.len(),
            household.accounts.len()
        );
        Ok(household)
    }

    /// Names of every stored profile, skipping the host's reserved keys.
    pub async fn profile_names(store: &dyn ProfileStore) -> Result<Vec<String>, CoreError> {
        Ok(store
            .list_keys()
            .await?
            .into_iter()
            .filter(|k| !RESERVED_KEYS.contains(&k.as_str()))
            .collect())
    }

    /// Replace the profile under `key` with a fresh household and return it.
    pub async fn clear_profile(
        store: &dyn ProfileStore,
        key: &str,
    ) -> Result<Household, CoreError> {
        let household = Household::default();
        Self::save(store, key, &household).await?;
        info!("cleared profile '{key}'");
        Ok(household)
    }

    /// Remove every profile (and every reserved key) from the store.
    pub async fn clear_all(store: &dyn ProfileStore) -> Result<(), CoreError> {
        store.clear().await?;
        info!("cleared all profiles from {}", store.name());
        Ok(())
    }
}
