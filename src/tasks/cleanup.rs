//! TTL Cleanup Task
//!
//! Background task that periodically removes expired cache entries.

use std::panic::{self, AssertUnwindSafe};
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use crate::cache::{CacheStore, SharedCache};

/// Default interval between sweeps.
pub const DEFAULT_CLEANUP_INTERVAL: Duration = Duration::from_secs(300);

/// Handle to a running sweep loop.
///
/// Constructing a cache starts nothing; the owner calls [`CleanupTask::start`]
/// and later [`CleanupTask::stop`].
#[derive(Debug)]
pub struct CleanupTask {
    handle: JoinHandle<()>,
}

impl CleanupTask {
    /// Spawns a task that sleeps for `interval`, sweeps `cache`, and repeats.
    ///
    /// The sweep runs under the cache's write lock. A panic raised during a
    /// sweep is logged and the loop keeps going.
    ///
    /// # Example
    /// ```ignore
    /// let cache: SharedCache<CachedValue> = SharedCache::default();
    /// let task = CleanupTask::start(cache.clone(), Duration::from_secs(300));
    /// // Later, during shutdown:
    /// task.stop();
    /// ```
    pub fn start<V>(cache: SharedCache<V>, interval: Duration) -> Self
    where
        V: Send + Sync + 'static,
    {
        Self::start_with(cache, interval, |store| store.cleanup())
    }

    /// Same loop as [`CleanupTask::start`], with the sweep itself supplied.
    fn start_with<V, F>(cache: SharedCache<V>, interval: Duration, sweep: F) -> Self
    where
        V: Send + Sync + 'static,
        F: Fn(&mut CacheStore<V>) -> usize + Send + Sync + 'static,
    {
        let handle = tokio::spawn(async move {
            info!(
                "Starting TTL cleanup task with interval of {} seconds",
                interval.as_secs_f64()
            );

            loop {
                tokio::time::sleep(interval).await;

                let outcome = cache
                    .with_store(|store| run_guarded(|| sweep(store)))
                    .await;

                match outcome {
                    Some(0) => debug!("TTL cleanup: no expired entries found"),
                    Some(removed) => info!("TTL cleanup: removed {} expired entries", removed),
                    None => error!("TTL cleanup: sweep panicked, will retry next interval"),
                }
            }
        });

        Self { handle }
    }

    /// True until the loop has been stopped.
    pub fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }

    /// Aborts the loop.
    pub fn stop(self) {
        self.handle.abort();
        info!("TTL cleanup task stopped");
    }
}

/// Runs one sweep, turning a panic into `None`.
fn run_guarded<F>(sweep: F) -> Option<usize>
where
    F: FnOnce() -> usize,
{
    panic::catch_unwind(AssertUnwindSafe(sweep)).ok()
}
