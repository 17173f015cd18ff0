//! Shared types and models for FarmConnect
//!
//! This crate contains the profile models, Aadhaar text extraction, the
//! record store and the registration wizards shared between the backend
//! and the browser (via WASM).

pub mod aadhaar;
pub mod address;
pub mod models;
pub mod registration;
pub mod store;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
pub use validation::*;
