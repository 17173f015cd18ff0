//! Collection bindings and search filters for the profile types

use serde::{Deserialize, Serialize};

use super::Record;
use crate::models::{DistributorProfile, FarmerProfile};

/// Crop filter value that disables crop filtering
pub const ALL_CROPS: &str = "all-crops";
/// Location filter value that disables location filtering
pub const ALL_LOCATIONS: &str = "all-locations";
/// Business type filter value that disables business type filtering
pub const ALL_TYPES: &str = "all-types";

/// Filters for browsing farmers
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FarmerFilter {
    pub crop_type: Option<String>,
    pub location: Option<String>,
    pub organic: Option<bool>,
}

/// Filters for browsing distributors
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistributorFilter {
    pub crop_type: Option<String>,
    pub location: Option<String>,
    pub business_type: Option<String>,
}

impl Record for FarmerProfile {
    const COLLECTION: &'static str = "farmers";

    type Filter = FarmerFilter;

    fn id(&self) -> &str {
        &self.id
    }

    fn name_contains(&self, needle: &str) -> bool {
        contains(&self.name, needle)
            || self
                .spoken_name
                .as_deref()
                .is_some_and(|spoken| contains(spoken, needle))
    }

    fn matches(&self, filter: &FarmerFilter) -> bool {
        if let Some(crop) = active(&filter.crop_type, ALL_CROPS) {
            if !self.crops.iter().any(|c| contains(c, &crop)) {
                return false;
            }
        }

        if let Some(location) = active(&filter.location, ALL_LOCATIONS) {
            let found = [
                &self.location,
                &self.extracted_state,
                &self.extracted_district,
            ]
            .into_iter()
            .flatten()
            .any(|field| contains(field, &location));
            if !found {
                return false;
            }
        }

        if let Some(organic) = filter.organic {
            if self.organic_certified != organic {
                return false;
            }
        }

        true
    }
}

impl Record for DistributorProfile {
    const COLLECTION: &'static str = "distributors";

    type Filter = DistributorFilter;

    fn id(&self) -> &str {
        &self.id
    }

    fn name_contains(&self, needle: &str) -> bool {
        contains(&self.owner_name, needle) || contains(&self.business_name, needle)
    }

    fn matches(&self, filter: &DistributorFilter) -> bool {
        if let Some(crop) = active(&filter.crop_type, ALL_CROPS) {
            if !self.crops_interested.iter().any(|c| contains(c, &crop)) {
                return false;
            }
        }

        if let Some(location) = active(&filter.location, ALL_LOCATIONS) {
            if !contains(&self.state, &location) && !contains(&self.district, &location) {
                return false;
            }
        }

        if let Some(business_type) = active(&filter.business_type, ALL_TYPES) {
            if !contains(&self.business_type, &business_type) {
                return false;
            }
        }

        true
    }
}

/// Lowercased filter value, or `None` when empty or set to its sentinel
fn active(value: &Option<String>, sentinel: &str) -> Option<String> {
    value
        .as_deref()
        .filter(|v| !v.is_empty() && *v != sentinel)
        .map(str::to_lowercase)
}

fn contains(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::Utc;

    use super::*;
    use crate::models::{DistributorRegistration, FarmerRegistration};
    use crate::store::{MemoryBackend, RecordStore};

    fn farmer(id: &str, name: &str, crops: &[&str], location: &str, organic: bool) -> FarmerProfile {
        FarmerProfile::register(
            FarmerRegistration {
                name: Some(name.to_string()),
                location: Some(location.to_string()),
                phone: "9999999999".to_string(),
                crops: crops.iter().map(|c| c.to_string()).collect(),
                farm_size: "5 acres".to_string(),
                experience: "10 years".to_string(),
                organic_certified: organic,
                ..Default::default()
            },
            id.to_string(),
            Utc::now(),
        )
    }

    fn distributor(id: &str, owner: &str, business: &str, kind: &str, state: &str) -> DistributorProfile {
        DistributorProfile::register(
            DistributorRegistration {
                business_name: business.to_string(),
                owner_name: owner.to_string(),
                business_type: kind.to_string(),
                state: state.to_string(),
                district: "Central".to_string(),
                phone: "8888888888".to_string(),
                email: "trade@example.com".to_string(),
                crops_interested: vec!["Rice".to_string(), "Pulses".to_string()],
                ..Default::default()
            },
            id.to_string(),
            Utc::now(),
        )
    }

    fn farmer_store() -> RecordStore<FarmerProfile> {
        RecordStore::new(Arc::new(MemoryBackend::new()))
    }

    #[test]
    fn test_save_then_get_by_id() {
        let store = farmer_store();
        let record = farmer("f1", "Ram Kumar", &["Rice"], "Sonipat, Haryana", false);
        store.save(record.clone()).unwrap();
        assert_eq!(store.get_by_id("f1"), Some(record));
        assert_eq!(store.get_by_id("missing"), None);
    }

    #[test]
    fn test_save_replaces_in_place() {
        let store = farmer_store();
        store.save(farmer("f1", "Ram", &["Rice"], "A", false)).unwrap();
        store.save(farmer("f2", "Shyam", &["Wheat"], "B", false)).unwrap();
        store.save(farmer("f1", "Ram Kumar", &["Rice"], "A", true)).unwrap();

        let all = store.get_all();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id, "f1");
        assert_eq!(all[0].name, "Ram Kumar");
        assert_eq!(all[1].id, "f2");
    }

    #[test]
    fn test_delete_missing_leaves_collection() {
        let store = farmer_store();
        store.save(farmer("f1", "Ram", &["Rice"], "A", false)).unwrap();
        assert!(!store.delete("nope").unwrap());
        assert_eq!(store.get_all().len(), 1);
        assert!(store.delete("f1").unwrap());
        assert!(store.get_all().is_empty());
    }

    #[test]
    fn test_name_lookup_is_case_insensitive_substring() {
        let store = farmer_store();
        let mut record = farmer("f1", "राम कुमार", &["Rice"], "A", false);
        record.spoken_name = Some("Ram Kumar Sharma".to_string());
        store.save(record).unwrap();

        assert_eq!(store.get_by_name("sharma").map(|f| f.id), Some("f1".to_string()));
        assert_eq!(store.get_by_name("राम").map(|f| f.id), Some("f1".to_string()));
        assert!(store.get_by_name("Sita").is_none());
    }

    #[test]
    fn test_name_lookup_returns_first_match() {
        let store = farmer_store();
        store.save(farmer("f1", "Ram Kumar", &["Rice"], "A", false)).unwrap();
        store.save(farmer("f2", "Ram Singh", &["Wheat"], "B", false)).unwrap();
        assert_eq!(store.get_by_name("ram").map(|f| f.id), Some("f1".to_string()));
    }

    #[test]
    fn test_unreadable_document_fails_open() {
        let store: RecordStore<FarmerProfile> =
            RecordStore::new(Arc::new(MemoryBackend::with_document("farmers", "{ broken")));
        assert!(store.get_all().is_empty());
        assert!(store.get_by_name("anyone").is_none());
    }

    #[test]
    fn test_farmer_search_filters() {
        let store = farmer_store();
        store.save(farmer("f1", "Ram", &["Rice", "Wheat"], "Sonipat, Haryana", true)).unwrap();
        store.save(farmer("f2", "Shyam", &["Cotton"], "Nagpur, Maharashtra", false)).unwrap();

        let all = store.search(&FarmerFilter {
            crop_type: Some(ALL_CROPS.to_string()),
            ..Default::default()
        });
        assert_eq!(all.len(), 2);

        let rice = store.search(&FarmerFilter {
            crop_type: Some("rice".to_string()),
            ..Default::default()
        });
        assert_eq!(rice.len(), 1);
        assert_eq!(rice[0].id, "f1");

        let organic_in_maharashtra = store.search(&FarmerFilter {
            location: Some("maharashtra".to_string()),
            organic: Some(true),
            ..Default::default()
        });
        assert!(organic_in_maharashtra.is_empty());

        let everywhere = store.search(&FarmerFilter {
            location: Some(ALL_LOCATIONS.to_string()),
            organic: Some(false),
            ..Default::default()
        });
        assert_eq!(everywhere.len(), 1);
        assert_eq!(everywhere[0].id, "f2");
    }

    #[test]
    fn test_farmer_location_matches_extracted_fields() {
        let store = farmer_store();
        let mut record = farmer("f1", "Ram", &["Rice"], "Rampur", false);
        record.extracted_district = Some("Sonipat".to_string());
        store.save(record).unwrap();

        let found = store.search(&FarmerFilter {
            location: Some("SONI".to_string()),
            ..Default::default()
        });
        assert_eq!(found.len(), 1);
    }

    #[test]
    fn test_distributor_search_filters() {
        let store: RecordStore<DistributorProfile> = RecordStore::new(Arc::new(MemoryBackend::new()));
        store.save(distributor("d1", "Amit", "Green Traders", "Wholesale", "Punjab")).unwrap();
        store.save(distributor("d2", "Priya", "Fresh Exports", "Export", "Gujarat")).unwrap();

        let wholesale = store.search(&DistributorFilter {
            business_type: Some("whole".to_string()),
            ..Default::default()
        });
        assert_eq!(wholesale.len(), 1);
        assert_eq!(wholesale[0].id, "d1");

        let any_type = store.search(&DistributorFilter {
            business_type: Some(ALL_TYPES.to_string()),
            location: Some("central".to_string()),
            crop_type: Some("pulse".to_string()),
        });
        assert_eq!(any_type.len(), 2);

        assert_eq!(store.get_by_name("fresh").map(|d| d.id), Some("d2".to_string()));
    }

    #[test]
    fn test_import_rejects_non_array() {
        let store = farmer_store();
        store.save(farmer("f1", "Ram", &["Rice"], "A", false)).unwrap();
        assert!(!store.import_json("{\"id\": \"x\"}").unwrap());
        assert_eq!(store.get_all().len(), 1);

        let exported = store.export_json().unwrap();
        let other = farmer_store();
        assert!(other.import_json(&exported).unwrap());
        assert_eq!(other.get_all(), store.get_all());
    }
}
