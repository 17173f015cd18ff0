//! Flat record collections
//!
//! Each collection is a single JSON array document held by a
//! [`StorageBackend`]. Every mutation loads the whole array, changes it in
//! memory and rewrites the document. Mutations through clones of one store
//! run one at a time; separate stores over the same backend are not
//! coordinated and the last writer wins.

mod backend;
mod profiles;
mod records;

use std::marker::PhantomData;
use std::sync::{Arc, Mutex, MutexGuard};

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

pub use backend::{MemoryBackend, StorageBackend};
pub use profiles::{ExportSnapshot, ProfileStore};
pub use records::{DistributorFilter, FarmerFilter, ALL_CROPS, ALL_LOCATIONS, ALL_TYPES};

/// Storage error types
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("storage backend error: {0}")]
    Backend(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// A record kept in a named collection
pub trait Record: Serialize + DeserializeOwned + Clone {
    /// Collection (document) name, e.g. `farmers`
    const COLLECTION: &'static str;

    type Filter;

    fn id(&self) -> &str;

    /// Whether any identity field contains `needle`, which is lowercase
    fn name_contains(&self, needle: &str) -> bool;

    fn matches(&self, filter: &Self::Filter) -> bool;
}

/// CRUD over one collection
pub struct RecordStore<R> {
    backend: Arc<dyn StorageBackend>,
    mutation: Arc<Mutex<()>>,
    _record: PhantomData<fn() -> R>,
}

impl<R> Clone for RecordStore<R> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
            mutation: Arc::clone(&self.mutation),
            _record: PhantomData,
        }
    }
}

impl<R: Record> RecordStore<R> {
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self {
            backend,
            mutation: Arc::default(),
            _record: PhantomData,
        }
    }

    /// Write an empty document when none exists yet. Failures are logged
    /// and otherwise ignored.
    pub fn ensure_initialized(&self) {
        if self.backend.exists(R::COLLECTION) {
            return;
        }
        if let Err(e) = self.backend.write(R::COLLECTION, "[]") {
            tracing::warn!(collection = R::COLLECTION, error = %e, "failed to initialize collection");
        }
    }

    /// Insert, or replace the record with the same id in place
    pub fn save(&self, record: R) -> StoreResult<()> {
        let _guard = self.lock_mutations()?;
        let mut records = self.get_all();
        match records.iter().position(|r| r.id() == record.id()) {
            Some(index) => records[index] = record,
            None => records.push(record),
        }
        self.persist(&records)
    }

    /// All records; a missing or unreadable document counts as empty
    pub fn get_all(&self) -> Vec<R> {
        self.ensure_initialized();
        match self.load() {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!(collection = R::COLLECTION, error = %e, "failed to load collection, treating as empty");
                Vec::new()
            }
        }
    }

    pub fn get_by_id(&self, id: &str) -> Option<R> {
        self.get_all().into_iter().find(|r| r.id() == id)
    }

    /// First record whose identity fields contain `name`, ignoring case
    pub fn get_by_name(&self, name: &str) -> Option<R> {
        let needle = name.to_lowercase();
        self.get_all().into_iter().find(|r| r.name_contains(&needle))
    }

    /// Remove the record with `id`; returns whether anything was removed
    pub fn delete(&self, id: &str) -> StoreResult<bool> {
        let _guard = self.lock_mutations()?;
        let records = self.get_all();
        let before = records.len();
        let remaining: Vec<R> = records.into_iter().filter(|r| r.id() != id).collect();

        if remaining.len() == before {
            return Ok(false);
        }
        self.persist(&remaining)?;
        Ok(true)
    }

    /// Records matching every active filter field
    pub fn search(&self, filter: &R::Filter) -> Vec<R> {
        self.get_all()
            .into_iter()
            .filter(|r| r.matches(filter))
            .collect()
    }

    /// Pretty-printed JSON of the whole collection
    pub fn export_json(&self) -> StoreResult<String> {
        Ok(serde_json::to_string_pretty(&self.get_all())?)
    }

    /// Replace the collection with `json` when it is an array of records.
    /// Returns `Ok(false)` and leaves the collection untouched otherwise.
    pub fn import_json(&self, json: &str) -> StoreResult<bool> {
        match serde_json::from_str::<Vec<R>>(json) {
            Ok(records) => {
                let _guard = self.lock_mutations()?;
                self.persist(&records)?;
                Ok(true)
            }
            Err(e) => {
                tracing::warn!(collection = R::COLLECTION, error = %e, "rejected collection import");
                Ok(false)
            }
        }
    }

    fn lock_mutations(&self) -> StoreResult<MutexGuard<'_, ()>> {
        self.mutation
            .lock()
            .map_err(|_| StoreError::Backend(format!("{} store lock poisoned", R::COLLECTION)))
    }

    fn load(&self) -> StoreResult<Vec<R>> {
        match self.backend.read(R::COLLECTION)? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(Vec::new()),
        }
    }

    fn persist(&self, records: &[R]) -> StoreResult<()> {
        let raw = serde_json::to_string_pretty(records)?;
        self.backend.write(R::COLLECTION, &raw)
    }
}
