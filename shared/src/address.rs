//! Best-effort breakdown of free-text Indian addresses
//!
//! Each component is found by an independent case-insensitive search that
//! keeps the first match. Nothing here rejects an address: text without any
//! recognisable marker simply yields empty components.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// States recognised in addresses, matched as written in the input
pub const INDIAN_STATES: &[&str] = &[
    "Punjab",
    "Haryana",
    "Maharashtra",
    "Gujarat",
    "Karnataka",
    "Tamil Nadu",
    "Uttar Pradesh",
    "Rajasthan",
    "Madhya Pradesh",
    "West Bengal",
    "Andhra Pradesh",
    "Kerala",
    "Odisha",
    "Bihar",
    "Jharkhand",
    "Assam",
    "Chhattisgarh",
    "Himachal Pradesh",
    "Uttarakhand",
    "Goa",
    "Manipur",
    "Meghalaya",
    "Mizoram",
    "Nagaland",
    "Sikkim",
    "Tripura",
    "Arunachal Pradesh",
];

static STATE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!("(?i)({})", INDIAN_STATES.join("|"))).expect("state pattern compiles")
});

static DISTRICT_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)District\s+([A-Za-z\s]+)|Dist\.?\s+([A-Za-z\s]+)|([A-Za-z\s]+)\s+District",
    )
    .expect("district pattern compiles")
});

static PINCODE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([0-9]{6})").expect("pincode pattern compiles"));

static TEHSIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)Tehsil\s+([A-Za-z\s]+)|Teh\.?\s+([A-Za-z\s]+)")
        .expect("tehsil pattern compiles")
});

static VILLAGE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)Village\s+([A-Za-z\s]+)|Vill\.?\s+([A-Za-z\s]+)")
        .expect("village pattern compiles")
});

/// Location components extracted from an address
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressComponents {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub district: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pincode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tehsil: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub village: Option<String>,
    /// Human-readable "village, tehsil, district, state" summary
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl AddressComponents {
    pub fn is_empty(&self) -> bool {
        self.state.is_none()
            && self.district.is_none()
            && self.pincode.is_none()
            && self.tehsil.is_none()
            && self.village.is_none()
    }
}

/// Parse an address into its location components
pub fn parse_address(address: &str) -> AddressComponents {
    if address.trim().is_empty() {
        return AddressComponents::default();
    }

    let state = first_capture(&STATE_PATTERN, address);
    let district = first_capture(&DISTRICT_PATTERN, address);
    let pincode = first_capture(&PINCODE_PATTERN, address);
    let tehsil = first_capture(&TEHSIL_PATTERN, address);
    let village = first_capture(&VILLAGE_PATTERN, address);

    let location = compose_location([
        village.as_deref(),
        tehsil.as_deref(),
        district.as_deref(),
        state.as_deref(),
    ]);

    AddressComponents {
        state,
        district,
        pincode,
        tehsil,
        village,
        location,
    }
}

/// Join the present parts with ", ", or `None` when every part is absent
pub fn compose_location(parts: [Option<&str>; 4]) -> Option<String> {
    let present: Vec<&str> = parts.into_iter().flatten().collect();
    if present.is_empty() {
        None
    } else {
        Some(present.join(", "))
    }
}

/// Text of the first participating group of the first match, trimmed
fn first_capture(pattern: &Regex, text: &str) -> Option<String> {
    pattern
        .captures(text)?
        .iter()
        .skip(1)
        .flatten()
        .next()
        .map(|m| m.as_str().trim().to_string())
        .filter(|value| !value.is_empty())
}


#[cfg(test)]
mod proptests {
    use proptest::prelude::*;

    use super::*;

    proptest! {
        /// Any text parses, and a location is present exactly when one of
        /// its parts was found
        #[test]
        fn test_parse_never_fails(address in "\\PC{0,120}") {
            let parsed = parse_address(&address);
            let has_part = parsed.village.is_some()
                || parsed.tehsil.is_some()
                || parsed.district.is_some()
                || parsed.state.is_some();
            prop_assert_eq!(parsed.location.is_some(), has_part);
        }

        /// Pincodes are always six digits taken from the input
        #[test]
        fn test_pincode_comes_from_input(
            prefix in "[A-Za-z ,]{0,30}",
            pin in "[1-9][0-9]{5}",
        ) {
            let parsed = parse_address(&format!("{}{}", prefix, pin));
            prop_assert_eq!(parsed.pincode, Some(pin));
        }
    }
}
