//! Business logic services for FarmConnect

pub mod auth;
pub mod directory;
pub mod ocr;

pub use auth::{AuthService, RegistrationInput};
pub use directory::{DirectoryQuery, DirectoryService, SearchResults};
pub use ocr::{DocumentImage, OcrService, SimulatedScan};
