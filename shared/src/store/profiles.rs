//! The farmer and distributor collections together

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{MemoryBackend, RecordStore, StorageBackend};
use crate::models::{DistributorProfile, FarmerProfile};

/// Both profile collections over one backend
#[derive(Clone)]
pub struct ProfileStore {
    pub farmers: RecordStore<FarmerProfile>,
    pub distributors: RecordStore<DistributorProfile>,
    backend: Arc<dyn StorageBackend>,
}

/// Full dump of both collections
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportSnapshot {
    pub farmers: Vec<FarmerProfile>,
    pub distributors: Vec<DistributorProfile>,
    pub export_date: DateTime<Utc>,
    pub total_farmers: usize,
    pub total_distributors: usize,
}

impl ProfileStore {
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self {
            farmers: RecordStore::new(Arc::clone(&backend)),
            distributors: RecordStore::new(Arc::clone(&backend)),
            backend,
        }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryBackend::new()))
    }

    /// Create both documents if they are missing
    pub fn ensure_initialized(&self) {
        self.farmers.ensure_initialized();
        self.distributors.ensure_initialized();
    }

    pub fn is_available(&self) -> bool {
        self.backend.is_available()
    }

    pub fn export_all(&self, now: DateTime<Utc>) -> ExportSnapshot {
        let farmers = self.farmers.get_all();
        let distributors = self.distributors.get_all();
        ExportSnapshot {
            total_farmers: farmers.len(),
            total_distributors: distributors.len(),
            farmers,
            distributors,
            export_date: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DistributorRegistration, FarmerRegistration};

    #[test]
    fn test_initialize_creates_empty_documents() {
        let backend = Arc::new(MemoryBackend::new());
        let store = ProfileStore::new(backend.clone());
        store.ensure_initialized();
        assert_eq!(backend.read("farmers").unwrap().as_deref(), Some("[]"));
        assert_eq!(backend.read("distributors").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_export_counts() {
        let store = ProfileStore::in_memory();
        let now = Utc::now();
        store
            .farmers
            .save(FarmerProfile::register(
                FarmerRegistration {
                    name: Some("Ram".to_string()),
                    phone: "1".to_string(),
                    ..Default::default()
                },
                "f1".to_string(),
                now,
            ))
            .unwrap();
        store
            .distributors
            .save(DistributorProfile::register(
                DistributorRegistration::default(),
                "d1".to_string(),
                now,
            ))
            .unwrap();

        let snapshot = store.export_all(now);
        assert_eq!(snapshot.total_farmers, 1);
        assert_eq!(snapshot.total_distributors, 1);
        assert_eq!(snapshot.export_date, now);
    }
}
