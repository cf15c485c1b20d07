use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// Registry of named async mutexes.
///
/// Scheduling serializes on `activity:{id}` so one caller's discard cannot
/// interleave with another's recreation; outcome recording serializes on
/// `match:{id}` so the complementary write is never evaluated against a
/// half-updated match. Distinct keys proceed in parallel.
#[derive(Clone, Default)]
pub struct KeyedLocks {
    locks: Arc<DashMap<String, Arc<Mutex<()>>>>,
}

impl KeyedLocks {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn acquire(&self, key: &str) -> OwnedMutexGuard<()> {
        let lock = self
            .locks
            .entry(key.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        lock.lock_owned().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn same_key_serializes() {
        let locks = KeyedLocks::new();
        let guard = locks.acquire("activity:a").await;
        assert!(locks.locks.get("activity:a").unwrap().try_lock().is_err());
        drop(guard);
        assert!(locks.locks.get("activity:a").unwrap().try_lock().is_ok());
    }

    #[tokio::test]
    async fn different_keys_are_independent() {
        let locks = KeyedLocks::new();
        let _a = locks.acquire("match:a").await;
        let _b = locks.acquire("match:b").await;
    }
}
