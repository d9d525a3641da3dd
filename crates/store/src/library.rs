//! The cinematic library: loaded cinematics plus their persisted blobs.

use std::collections::BTreeMap;

use camline_timeline::{Cinematic, JsonCinematic};
use tracing::{debug, info, warn};

use crate::blob::BlobStore;
use crate::error::{StoreError, StoreResult};

/// Key prefix cinematic blobs live under.
pub const KEY_PREFIX: &str = "cin:";

fn blob_key(id: &str) -> String {
    format!("{KEY_PREFIX}{id}")
}

/// In-memory registry of cinematics backed by a [`BlobStore`].
#[derive(Default)]
pub struct Library {
    cinematics: BTreeMap<String, Cinematic>,
}

impl Library {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every persisted cinematic. Malformed blobs are skipped with a
    /// warning so one bad entry cannot hide the rest.
    pub fn load_all(store: &dyn BlobStore) -> StoreResult<Self> {
        let mut lib = Library::new();
        for key in store.keys()? {
            let Some(id) = key.strip_prefix(KEY_PREFIX) else {
                continue;
            };
            match Self::load(store, id) {
                Ok(cin) => {
                    lib.cinematics.insert(id.to_string(), cin);
                }
                Err(err) => warn!(id, error = %err, "Skipping malformed cinematic blob"),
            }
        }
        info!(count = lib.cinematics.len(), "Cinematic library loaded");
        Ok(lib)
    }

    /// Load one cinematic strictly: missing or malformed data aborts with
    /// no partial mutation.
    pub fn load(store: &dyn BlobStore, id: &str) -> StoreResult<Cinematic> {
        let blob = store
            .get(&blob_key(id))?
            .ok_or_else(|| StoreError::NotFound { id: id.to_string() })?;
        let json: JsonCinematic = serde_json::from_str(&blob)?;
        Ok(Cinematic::from_json(id, &json)?)
    }

    /// Persist a cinematic under its id.
    pub fn save(store: &mut dyn BlobStore, cin: &Cinematic) -> StoreResult<()> {
        Self::save_with_suffix(store, cin, "")
    }

    /// Persist under `id + suffix` — used for autosave slots.
    pub fn save_with_suffix(
        store: &mut dyn BlobStore,
        cin: &Cinematic,
        suffix: &str,
    ) -> StoreResult<()> {
        let blob = serde_json::to_string(&cin.to_json())?;
        let key = format!("{KEY_PREFIX}{}{}", cin.id(), suffix);
        store.set(&key, &blob)?;
        debug!(id = %cin.id(), key, bytes = blob.len(), "Cinematic saved");
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&Cinematic> {
        self.cinematics.get(id)
    }

    /// Add or replace a cinematic in the registry (does not persist).
    pub fn insert(&mut self, cin: Cinematic) {
        self.cinematics.insert(cin.id().to_string(), cin);
    }

    /// Ids of loaded cinematics, sorted.
    pub fn ids(&self) -> Vec<String> {
        self.cinematics.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.cinematics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cinematics.is_empty()
    }

    /// Remove from the registry and delete the persisted blob.
    pub fn remove(&mut self, store: &mut dyn BlobStore, id: &str) -> StoreResult<()> {
        if self.cinematics.remove(id).is_none() {
            return Err(StoreError::NotFound { id: id.to_string() });
        }
        store.remove(&blob_key(id))?;
        info!(id, "Cinematic deleted");
        Ok(())
    }
}
