//! Dastyar error taxonomy.

use thiserror::Error;

/// All errors produced by Dastyar crates.
#[derive(Debug, Error)]
pub enum DastyarError {
    /// The external generation call failed or returned an unusable response.
    /// Recovered inside the execution pipeline; never crosses a firing.
    #[error("Generation failed: {0}")]
    Generation(String),

    /// Schedule store read/write failure. Fatal to the current tick only.
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// Configuration file could not be read or parsed.
    #[error("Config error: {0}")]
    Config(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type used across Dastyar crates.
pub type Result<T> = std::result::Result<T, DastyarError>;
