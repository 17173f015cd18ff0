//! Common types used across the platform

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Account role chosen at registration
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Farmer,
    Distributor,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Farmer => "farmer",
            Role::Distributor => "distributor",
        }
    }

    /// Role whose profiles this role browses: farmers look for distributors
    /// and distributors look for farmers
    pub fn counterpart(&self) -> Role {
        match self {
            Role::Farmer => Role::Distributor,
            Role::Distributor => Role::Farmer,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "farmer" => Ok(Role::Farmer),
            "distributor" => Ok(Role::Distributor),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

/// Metadata for an uploaded identity document image
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DocumentUpload {
    pub file_name: String,
    pub content_type: String,
    pub size_bytes: u64,
}

/// Which side of the Aadhaar card an image shows
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DocumentSide {
    Front,
    Back,
}

impl FromStr for DocumentSide {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "front" => Ok(DocumentSide::Front),
            "back" => Ok(DocumentSide::Back),
            other => Err(format!("unknown document side: {}", other)),
        }
    }
}
