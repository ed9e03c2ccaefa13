//! Background Tasks Module
//!
//! Contains background work the cache can run on its own schedule.
//!
//! # Tasks
//! - Expiration sweep: removes expired cache entries at configured intervals

mod sweep;

pub use sweep::{spawn_sweep_task, SweepTask};
