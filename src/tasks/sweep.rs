//! Stale Entry Sweep Task
//!
//! Optional background task that periodically purges expired and unreadable
//! signals, on top of the lazy eviction every read already does.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::signal::SignalCache;

/// Spawns a task that calls `purge_expired` every `interval`.
///
/// Returns the JoinHandle so shutdown can abort it.
pub fn spawn_sweep_task(cache: Arc<RwLock<SignalCache>>, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!("Starting stale entry sweep every {:?}", interval);

        loop {
            tokio::time::sleep(interval).await;

            let removed = {
                let mut cache_guard = cache.write().await;
                cache_guard.purge_expired()
            };

            if removed > 0 {
                info!("Sweep: removed {} stale entries", removed);
            } else {
                debug!("Sweep: no stale entries found");
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{ManualClock, MemoryStorage, TtlCache};
    use crate::signal::{DynStorage, SignalAction, TradingSignal};
    use chrono::Utc;

    fn shared_cache(clock: &ManualClock) -> Arc<RwLock<SignalCache>> {
        let storage: DynStorage = Box::new(MemoryStorage::new());
        Arc::new(RwLock::new(TtlCache::new(storage).with_clock(clock.clone())))
    }

    fn signal(symbol: &str) -> TradingSignal {
        TradingSignal {
            symbol: symbol.to_string(),
            action: SignalAction::Sell,
            confidence: 0.4,
            target_price: None,
            stop_loss: Some(10.0),
            rationale: String::new(),
            generated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_sweep_removes_only_stale_entries() {
        let clock = ManualClock::new(1_700_000_000_000);
        let cache = shared_cache(&clock);
        {
            let mut guard = cache.write().await;
            guard.set("OLD", &signal("OLD"), 1);
            guard.set("NEW", &signal("NEW"), 3600);
        }
        clock.advance_secs(2);

        let handle = spawn_sweep_task(cache.clone(), Duration::from_millis(20));
        tokio::time::sleep(Duration::from_millis(150)).await;
        handle.abort();

        let stats = cache.read().await.stats();
        assert_eq!(stats.total, 1);
        assert_eq!(stats.valid, 1);
    }

    #[tokio::test]
    async fn test_sweep_task_can_be_aborted() {
        let clock = ManualClock::new(0);
        let handle = spawn_sweep_task(shared_cache(&clock), Duration::from_secs(1));

        handle.abort();

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(handle.is_finished(), "Task should be finished after abort");
    }
}
