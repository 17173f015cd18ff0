//! Domain models for FarmConnect

mod distributor;
mod farmer;
mod ocr;

pub use distributor::*;
pub use farmer::*;
pub use ocr::*;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};
use uuid::Uuid;

use crate::types::Role;

/// Generate a profile id such as `farmer_1718000000000_3f9a1c2b7`
pub fn new_profile_id(role: Role, now: DateTime<Utc>) -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!("{}_{}_{}", role, now.timestamp_millis(), &suffix[..9])
}

/// Read an explicit `null` the same as a missing field
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
