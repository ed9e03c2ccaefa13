//! Configuration Module
//!
//! Handles loading and validating cache configuration from environment
//! variables.

use std::env;
use std::time::Duration;

use crate::error::{CacheError, Result};

/// Cache configuration parameters.
///
/// All values can be configured via environment variables with sensible
/// defaults.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Retention applied to entries stored without an explicit one
    pub default_retention: Duration,
    /// Interval between background sweep passes
    pub sweep_interval: Duration,
}

impl CacheConfig {
    /// Creates a CacheConfig by loading values from environment variables.
    ///
    /// Unset or unparsable variables fall back to the defaults.
    ///
    /// # Environment Variables
    /// - `DEFAULT_RETENTION_MS` - Default retention in milliseconds (default: 300000)
    /// - `SWEEP_INTERVAL_MS` - Sweep frequency in milliseconds (default: 1000)
    pub fn from_env() -> Self {
        Self {
            default_retention: Duration::from_millis(
                env::var("DEFAULT_RETENTION_MS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(300_000),
            ),
            sweep_interval: Duration::from_millis(
                env::var("SWEEP_INTERVAL_MS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(1_000),
            ),
        }
    }

    // == Validate ==
    /// Rejects configurations under which expiration cannot work as
    /// intended.
    ///
    /// A zero default retention would expire every entry on arrival; a
    /// sweep interval of zero would spin; a sweep interval longer than the
    /// default retention would let expired entries pile up for longer than
    /// they were ever live.
    pub fn validate(&self) -> Result<()> {
        if self.default_retention.is_zero() {
            return Err(CacheError::InvalidRetention(
                "default retention must be nonzero".to_string(),
            ));
        }
        if self.sweep_interval.is_zero() {
            return Err(CacheError::InvalidSweepInterval(
                "sweep interval must be nonzero".to_string(),
            ));
        }
        if self.sweep_interval > self.default_retention {
            return Err(CacheError::InvalidSweepInterval(format!(
                "sweep interval {:?} exceeds default retention {:?}",
                self.sweep_interval, self.default_retention
            )));
        }
        Ok(())
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            default_retention: Duration::from_millis(300_000),
            sweep_interval: Duration::from_millis(1_000),
        }
    }
}
