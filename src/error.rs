use thiserror::Error;

/// Main error type for prcurve
#[derive(Error, Debug)]
pub enum PrcurveError {
    /// File system I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Malformed precision-recall data
    #[error("Parse error: {0}")]
    Parse(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Area-under-curve computation errors
    #[error("AUC error: {0}")]
    Auc(String),

    /// SVG writer errors
    #[error("Render error: {0}")]
    Render(String),

    /// JSON (de)serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenient Result type using PrcurveError
pub type Result<T> = std::result::Result<T, PrcurveError>;
