//! Decoding of travel document MRZ text into identity fields, with the date
//! handling, validation and form-field mapping that sit around it.

pub mod config;
pub mod export;
pub mod models;
pub mod processing;
pub mod scan_pipeline;
pub mod utils;
pub mod validation;

pub use config::IntakeConfig;
pub use models::ParsedDocument;
pub use processing::{DateNormalizer, DateOrder, MrzDecoder};
pub use scan_pipeline::{ScanPipeline, ScanReport};
pub use utils::PassportError;
