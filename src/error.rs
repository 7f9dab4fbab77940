//! Error types for campaign-insights
//!
//! The pipeline itself degrades silently on bad historical data (zero
//! sentinels, neutral defaults) rather than failing; `Error` covers the
//! remaining genuinely fallible surfaces: caller contract violations and
//! report serialization.

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Campaign-insights error types
#[derive(Error, Debug)]
pub enum Error {
    /// Caller-supplied argument violated a function contract
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Report serialization failed
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
