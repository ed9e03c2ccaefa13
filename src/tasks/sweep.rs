//! Expiration Sweep Task
//!
//! Background task that periodically removes expired cache entries.

use std::hash::Hash;
use std::sync::PoisonError;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::{Clock, SharedAgedCache};
use crate::error::{CacheError, Result};

// == Sweep Task Handle ==
/// Handle to a running sweep task.
///
/// The task is aborted when the handle is dropped, so a sweep can never
/// outlive the scope that owns it. The task also exits on its own once
/// every handle to the cache it sweeps has been dropped.
#[derive(Debug)]
pub struct SweepTask {
    handle: JoinHandle<()>,
}

impl SweepTask {
    /// Stops the sweep task immediately.
    pub fn abort(&self) {
        self.handle.abort();
    }

    /// Returns true once the task has stopped, whether by abort or because
    /// the cache was dropped.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for SweepTask {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

// == Spawn ==
/// Spawns a background task that periodically sweeps expired entries out of
/// the given cache.
///
/// The task sleeps for `interval` between passes and takes the same write
/// lock as `put`, so a sweep never races a concurrent insert. It holds only
/// a weak reference to the cache storage: dropping the last cache handle
/// ends the task at its next wakeup. The interval must be nonzero, and
/// should not exceed the smallest retention in use (see
/// [`CacheConfig::validate`](crate::config::CacheConfig::validate)).
///
/// # Arguments
/// * `cache` - Shared cache to sweep
/// * `interval` - Time between sweep passes
pub fn spawn_sweep_task<K, V, C>(
    cache: &SharedAgedCache<K, V, C>,
    interval: Duration,
) -> Result<SweepTask>
where
    K: Eq + Hash + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
    C: Clock + 'static,
{
    if interval.is_zero() {
        return Err(CacheError::InvalidSweepInterval(
            "sweep interval must be nonzero".to_string(),
        ));
    }

    let storage = cache.downgrade();

    let handle = tokio::spawn(async move {
        info!("Starting expiration sweep task with interval {:?}", interval);

        loop {
            tokio::time::sleep(interval).await;

            let Some(storage) = storage.upgrade() else {
                debug!("Cache dropped, stopping sweep task");
                break;
            };

            let removed = {
                let mut cache = storage.write().unwrap_or_else(PoisonError::into_inner);
                cache.sweep_expired()
            };

            if removed > 0 {
                info!("Sweep removed {} expired entries", removed);
            } else {
                debug!("Sweep found no expired entries");
            }
        }
    });

    Ok(SweepTask { handle })
}
