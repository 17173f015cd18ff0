//! Storage backends holding one text document per collection

use std::collections::HashMap;
use std::sync::RwLock;

use super::{StoreError, StoreResult};

/// Somewhere a collection's JSON document can be read and written whole
pub trait StorageBackend: Send + Sync {
    /// Document contents, or `None` when the collection has never been written
    fn read(&self, collection: &str) -> StoreResult<Option<String>>;

    fn write(&self, collection: &str, contents: &str) -> StoreResult<()>;

    fn exists(&self, collection: &str) -> bool {
        matches!(self.read(collection), Ok(Some(_)))
    }

    /// Whether the backend can currently be written to
    fn is_available(&self) -> bool {
        true
    }
}

/// Process-local backend, used for tests and ephemeral runs
#[derive(Debug, Default)]
pub struct MemoryBackend {
    documents: RwLock<HashMap<String, String>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend pre-seeded with a raw document
    pub fn with_document(collection: &str, contents: &str) -> Self {
        let backend = Self::new();
        if let Ok(mut documents) = backend.documents.write() {
            documents.insert(collection.to_string(), contents.to_string());
        }
        backend
    }
}

impl StorageBackend for MemoryBackend {
    fn read(&self, collection: &str) -> StoreResult<Option<String>> {
        let documents = self
            .documents
            .read()
            .map_err(|_| StoreError::Backend("memory backend lock poisoned".to_string()))?;
        Ok(documents.get(collection).cloned())
    }

    fn write(&self, collection: &str, contents: &str) -> StoreResult<()> {
        let mut documents = self
            .documents
            .write()
            .map_err(|_| StoreError::Backend("memory backend lock poisoned".to_string()))?;
        documents.insert(collection.to_string(), contents.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_backend_roundtrip() {
        let backend = MemoryBackend::new();
        assert!(!backend.exists("farmers"));
        assert_eq!(backend.read("farmers").unwrap(), None);

        backend.write("farmers", "[]").unwrap();
        assert!(backend.exists("farmers"));
        assert_eq!(backend.read("farmers").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_seeded_document() {
        let backend = MemoryBackend::with_document("distributors", "not json");
        assert_eq!(backend.read("distributors").unwrap().as_deref(), Some("not json"));
    }
}
