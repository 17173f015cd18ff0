//! Browsing, lookup and export of stored profiles

use chrono::{DateTime, Utc};
use shared::models::{DistributorProfile, FarmerProfile};
use shared::store::{DistributorFilter, ExportSnapshot, FarmerFilter, ProfileStore};
use shared::types::Role;

use crate::error::{AppError, AppResult};
use crate::models::ProfileRecord;

/// Search criteria from the query string
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DirectoryQuery {
    pub crop_type: Option<String>,
    pub location: Option<String>,
    pub organic: Option<bool>,
    pub business_type: Option<String>,
}

/// What a user of a given role sees when browsing
#[derive(Debug, Clone, PartialEq)]
pub enum SearchResults {
    Farmers(Vec<FarmerProfile>),
    Distributors(Vec<DistributorProfile>),
}

impl SearchResults {
    pub fn len(&self) -> usize {
        match self {
            SearchResults::Farmers(results) => results.len(),
            SearchResults::Distributors(results) => results.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Clone)]
pub struct DirectoryService {
    store: ProfileStore,
}

impl DirectoryService {
    pub fn new(store: ProfileStore) -> Self {
        Self { store }
    }

    /// Farmers browse distributors and distributors browse farmers
    pub fn search(&self, viewer: Role, query: DirectoryQuery) -> SearchResults {
        match viewer.counterpart() {
            Role::Distributor => SearchResults::Distributors(self.store.distributors.search(
                &DistributorFilter {
                    crop_type: query.crop_type,
                    location: query.location,
                    business_type: query.business_type,
                },
            )),
            Role::Farmer => SearchResults::Farmers(self.store.farmers.search(&FarmerFilter {
                crop_type: query.crop_type,
                location: query.location,
                organic: query.organic,
            })),
        }
    }

    pub fn get(&self, role: Role, id: &str) -> AppResult<ProfileRecord> {
        let record = match role {
            Role::Farmer => self.store.farmers.get_by_id(id).map(ProfileRecord::Farmer),
            Role::Distributor => self
                .store
                .distributors
                .get_by_id(id)
                .map(ProfileRecord::Distributor),
        };

        record.ok_or_else(|| AppError::NotFound("User".to_string()))
    }

    pub fn delete(&self, role: Role, id: &str) -> AppResult<()> {
        let removed = match role {
            Role::Farmer => self.store.farmers.delete(id),
            Role::Distributor => self.store.distributors.delete(id),
        }
        .map_err(|source| AppError::Storage {
            action: "Delete",
            source,
        })?;

        if !removed {
            return Err(AppError::NotFound("User".to_string()));
        }
        tracing::info!(user_id = %id, role = %role, "deleted user");
        Ok(())
    }

    pub fn export(&self, now: DateTime<Utc>) -> ExportSnapshot {
        self.store.export_all(now)
    }
}
