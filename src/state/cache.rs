use std::{
    sync::Arc,
    time::{Duration, Instant, SystemTime},
};

use tokio::sync::RwLock;

use crate::state::game::GameSnapshot;

/// Snapshot together with the moment it was fetched.
#[derive(Debug, Clone)]
pub struct CachedSnapshot {
    /// Game state as reported by the ledger.
    pub snapshot: GameSnapshot,
    /// Monotonic fetch time, used for staleness checks.
    pub fetched_at: Instant,
    /// Wall-clock fetch time, used for display.
    pub fetched_at_wall: SystemTime,
}

impl CachedSnapshot {
    /// Time elapsed between the fetch and `now`.
    pub fn age(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.fetched_at)
    }
}

/// Holds the most recently fetched snapshot.
///
/// Each store replaces the whole entry, so readers only ever observe complete snapshots.
#[derive(Debug, Default)]
pub struct SnapshotCache {
    current: RwLock<Option<Arc<CachedSnapshot>>>,
}

impl SnapshotCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the cached entry with a freshly fetched snapshot.
    pub async fn store(
        &self,
        snapshot: GameSnapshot,
        fetched_at: Instant,
        fetched_at_wall: SystemTime,
    ) {
        let entry = Arc::new(CachedSnapshot {
            snapshot,
            fetched_at,
            fetched_at_wall,
        });
        let mut guard = self.current.write().await;
        *guard = Some(entry);
    }

    /// Latest snapshot, if one has been fetched.
    pub async fn current(&self) -> Option<Arc<CachedSnapshot>> {
        self.current.read().await.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::game::fixtures::active_snapshot;

    #[tokio::test]
    async fn store_replaces_previous_entry() {
        let cache = SnapshotCache::new();
        assert!(cache.current().await.is_none());

        let first_at = Instant::now();
        let mut snapshot = active_snapshot(&[("0x1", true)], 1);
        cache.store(snapshot.clone(), first_at, SystemTime::now()).await;
        let first = cache.current().await.unwrap();

        snapshot.round = 4;
        snapshot.players.clear();
        let second_at = first_at + Duration::from_secs(1);
        cache.store(snapshot, second_at, SystemTime::now()).await;

        let current = cache.current().await.unwrap();
        assert_eq!(current.snapshot.round, 4);
        assert!(current.snapshot.players.is_empty());
        assert_eq!(current.fetched_at, second_at);
        // Readers holding the previous entry keep a consistent view.
        assert_eq!(first.snapshot.round, 3);
        assert_eq!(first.snapshot.players.len(), 1);
    }

    #[test]
    fn age_saturates() {
        let fetched_at = Instant::now();
        let entry = CachedSnapshot {
            snapshot: active_snapshot(&[], 1),
            fetched_at,
            fetched_at_wall: SystemTime::now(),
        };
        assert_eq!(entry.age(fetched_at), Duration::ZERO);
        assert_eq!(
            entry.age(fetched_at + Duration::from_millis(250)),
            Duration::from_millis(250)
        );
    }
}
