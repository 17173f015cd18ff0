//! External API integrations

pub mod document_ai;

pub use document_ai::DocumentAiClient;
