//! Expiry Sweeper Task
//!
//! Background task that periodically purges expired entries from a
//! `MemoryStore`. Reads already ignore expired entries; the sweep only
//! reclaims their memory.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::store::MemoryStore;

/// Spawns a background task that purges expired entries every
/// `interval_secs` seconds.
///
/// Returns the task's JoinHandle so it can be aborted during shutdown.
///
/// # Example
/// ```ignore
/// let store = Arc::new(MemoryStore::<serde_json::Value>::new());
/// let sweeper = spawn_sweeper(store.clone(), 1);
/// // Later, during shutdown:
/// sweeper.abort();
/// ```
pub fn spawn_sweeper<V>(store: Arc<MemoryStore<V>>, interval_secs: u64) -> JoinHandle<()>
where
    V: Send + Sync + 'static,
{
    let period = Duration::from_secs(interval_secs.max(1));

    tokio::spawn(async move {
        info!(
            "Starting expiry sweeper with interval of {} seconds",
            period.as_secs()
        );

        let mut interval = tokio::time::interval(period);
        // First tick completes immediately
        interval.tick().await;

        loop {
            interval.tick().await;

            let removed = store.purge_expired();
            if removed > 0 {
                info!("Expiry sweep: removed {} expired entries", removed);
            } else {
                debug!("Expiry sweep: no expired entries found");
            }
        }
    })
}
