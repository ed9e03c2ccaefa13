//! Error types for the cache
//!
//! Provides unified error handling using thiserror.
//!
//! A failed lookup is not an error: `get` expresses absence with `Option`.
//! The error surface covers configuration that would make the cache
//! misbehave silently.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache crate.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Default retention rejected by validation
    #[error("Invalid retention: {0}")]
    InvalidRetention(String),

    /// Sweep interval rejected by validation
    #[error("Invalid sweep interval: {0}")]
    InvalidSweepInterval(String),
}

// == Result Type Alias ==
/// Convenience Result type for the cache crate.
pub type Result<T> = std::result::Result<T, CacheError>;
