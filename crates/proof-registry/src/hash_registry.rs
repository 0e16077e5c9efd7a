//! Hash Registry: the remote list of previously seen fingerprints
use crate::store::BlobStore;
use proof_core::ProofError;
use serde::{Deserialize, Serialize};

/// Stored document shape: `{"hash_list": [..]}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HashListDocument {
    #[serde(default)]
    pub hash_list: Vec<String>,
}

/// Fetches and appends to the fingerprint list under one key.
///
/// `append` overwrites the stored list with `existing + [new]`. There is no
/// conditional put: two runs that fetch the same list can both append, and
/// the later write drops the earlier fingerprint. Each run believes it was
/// first.
pub struct HashRegistryClient<S: BlobStore> {
    store: S,
    key: String,
}

impl<S: BlobStore> HashRegistryClient<S> {
    pub fn new(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Empty when the key has never been written.
    pub fn fetch(&self) -> Result<Vec<String>, ProofError> {
        let body = match self.store.get(&self.key)? {
            Some(body) => body,
            None => {
                tracing::info!(key = %self.key, "hash registry not initialised; starting empty");
                return Ok(Vec::new());
            }
        };

        let doc: HashListDocument = serde_json::from_slice(&body).map_err(|e| {
            tracing::error!(key = %self.key, error = %e, "error fetching list of hashes");
            ProofError::RegistryError(format!("decode {}: {}", self.key, e))
        })?;
        tracing::debug!(key = %self.key, count = doc.hash_list.len(), "fetched hash registry");
        Ok(doc.hash_list)
    }

    pub fn append(&self, existing: &[String], new: &str) -> Result<(), ProofError> {
        let mut hash_list = existing.to_vec();
        hash_list.push(new.to_string());
        let doc = HashListDocument { hash_list };

        let body = serde_json::to_vec_pretty(&doc)
            .map_err(|e| ProofError::SerializeError(e.to_string()))?;
        self.store
            .put(&self.key, body, "application/json")
            .map_err(|e| {
                tracing::error!(key = %self.key, error = %e, "error updating hashes");
                e
            })?;

        tracing::info!(key = %self.key, count = doc.hash_list.len(), "hash registry updated");
        Ok(())
    }
}
