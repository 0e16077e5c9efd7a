//! Blob store seam
use proof_core::ProofError;
use std::collections::HashMap;
use std::sync::Mutex;

/// Opaque key/value object store.
pub trait BlobStore {
    /// `Ok(None)` when the key has never been written.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, ProofError>;

    /// Replace the object stored under `key`.
    fn put(&self, key: &str, body: Vec<u8>, content_type: &str) -> Result<(), ProofError>;
}

impl<S: BlobStore + ?Sized> BlobStore for &S {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, ProofError> {
        (**self).get(key)
    }

    fn put(&self, key: &str, body: Vec<u8>, content_type: &str) -> Result<(), ProofError> {
        (**self).put(key, body, content_type)
    }
}

impl<S: BlobStore + ?Sized> BlobStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, ProofError> {
        (**self).get(key)
    }

    fn put(&self, key: &str, body: Vec<u8>, content_type: &str) -> Result<(), ProofError> {
        (**self).put(key, body, content_type)
    }
}

/// In-process store for tests and offline runs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    objects: Mutex<HashMap<String, Vec<u8>>>,
    puts: Mutex<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an object, as if a previous run had written it.
    pub fn with_object(self, key: &str, body: impl Into<Vec<u8>>) -> Self {
        self.lock_objects().insert(key.to_string(), body.into());
        self
    }

    pub fn object(&self, key: &str) -> Option<Vec<u8>> {
        self.lock_objects().get(key).cloned()
    }

    /// Number of successful `put` calls.
    pub fn put_count(&self) -> usize {
        *self.puts.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn lock_objects(&self) -> std::sync::MutexGuard<'_, HashMap<String, Vec<u8>>> {
        self.objects.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl BlobStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, ProofError> {
        Ok(self.object(key))
    }

    fn put(&self, key: &str, body: Vec<u8>, _content_type: &str) -> Result<(), ProofError> {
        self.lock_objects().insert(key.to_string(), body);
        *self.puts.lock().unwrap_or_else(|e| e.into_inner()) += 1;
        Ok(())
    }
}
