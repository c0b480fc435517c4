//! Error types for slicelight

use thiserror::Error;

/// Main error type for the crate
///
/// Capacity overflows are not errors: excess lights are dropped and logged.
#[derive(Debug, Error)]
pub enum Error {
    #[error("GPU error: {0}")]
    Gpu(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),
}
