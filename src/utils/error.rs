use thiserror::Error;

#[derive(Debug, Error)]
pub enum PassportError {
    /// Fewer than two usable MRZ lines were found in the OCR text.
    #[error("MRZ decoding error: expected at least 2 lines, found {found}")]
    InsufficientLines { found: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}
