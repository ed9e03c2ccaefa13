//! Aged Cache - a lightweight in-memory key/value cache
//!
//! Entries expire after a per-entry retention period measured against an
//! injectable clock. Lookups never return expired values; expired entries
//! are evicted lazily on read, with an optional background sweep for eager
//! cleanup.
//!
//! # Example
//! ```
//! use std::time::Duration;
//!
//! use aged_cache::{AgedCache, SystemClock};
//!
//! let mut cache = AgedCache::new(SystemClock, Duration::from_secs(300));
//! cache.put("session", "token", Some(Duration::from_secs(60)));
//! assert_eq!(cache.get(&"session"), Some(&"token"));
//! ```

pub mod cache;
pub mod config;
pub mod error;
pub mod tasks;

pub use cache::{AgedCache, CacheStats, Clock, ExpirableEntry, MockClock, SharedAgedCache, SystemClock};
pub use config::CacheConfig;
pub use error::{CacheError, Result};
pub use tasks::{spawn_sweep_task, SweepTask};
